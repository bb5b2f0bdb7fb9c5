//! Second pass: headers, groups and the members they declare.

use super::{child_text, location};
use crate::error::Error;
use crate::model::{Define, Function, Header, Parameter, Symbol, SymbolId, SymbolKind, Typedef, Variable};
use crate::options::Options;
use crate::registry::Registry;
use crate::xml::Element;

pub(super) fn register(
    registry: &mut Registry,
    options: &Options,
    def: &Element,
) -> Result<(), Error> {
    let is_c = def.attr("language") == Some("C++");
    match def.attr("kind").unwrap_or_default() {
        "file" if is_c => header(registry, options, def),
        "group" => group(registry, options, def),
        _ => Ok(()),
    }
}

fn header(registry: &mut Registry, options: &Options, def: &Element) -> Result<(), Error> {
    let id = def.required_attr("id")?;
    let name = def.required("compoundname")?.text_content();
    // Sources, Markdown pages and the like get no page.
    if !name.to_lowercase().ends_with(".h") {
        return Ok(());
    }

    let mut members: Vec<String> = Vec::new();
    let mut remember = |id: &str| {
        if !members.iter().any(|m| m == id) {
            members.push(id.to_string());
        }
    };
    for sectiondef in def.find_all("sectiondef") {
        for memberdef in sectiondef.find_all("memberdef") {
            remember(memberdef.required_attr("id")?);
        }
        for member in sectiondef.find_all("member") {
            remember(member.required_attr("refid")?);
        }
    }
    for inner in def.find_all("innerclass") {
        remember(inner.required_attr("refid")?);
    }

    let symbol = Symbol::new(id, &name, SymbolKind::Header(Header { members })).with_page();
    registry.register(symbol)?;
    declarations(registry, options, def)
}

fn group(registry: &mut Registry, options: &Options, def: &Element) -> Result<(), Error> {
    let id = def.required_attr("id")?;
    let symbol = Symbol::new(id, &child_text(def, "title"), SymbolKind::Group);
    registry.register(symbol)?;
    declarations(registry, options, def)
}

fn declarations(registry: &mut Registry, options: &Options, def: &Element) -> Result<(), Error> {
    for sectiondef in def.find_all("sectiondef") {
        for memberdef in sectiondef.find_all("memberdef") {
            match memberdef.attr("kind") {
                Some("function") => function(registry, options, memberdef)?,
                Some("typedef") => typedef(registry, options, memberdef)?,
                Some("define") => define(registry, options, memberdef)?,
                Some("variable") => variable(registry, options, memberdef)?,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Register a member with its own page. Members seen before (e.g. in both a
/// header and a group) are left alone.
fn declare(
    registry: &mut Registry,
    options: &Options,
    memberdef: &Element,
    kind: SymbolKind,
) -> Result<(), Error> {
    let id = memberdef.required_attr("id")?;
    if registry.lookup(id).is_some() {
        return Ok(());
    }
    let symbol = Symbol::new(id, &child_text(memberdef, "name"), kind)
        .with_header(location(memberdef, options)?)
        .with_page();
    registry.register(symbol)?;
    Ok(())
}

fn function(registry: &mut Registry, options: &Options, memberdef: &Element) -> Result<(), Error> {
    let parameters = memberdef
        .find_all("param")
        .map(|param| Parameter {
            type_name: child_text(param, "type"),
            name: param.find("declname").map(Element::text_content),
            array: param.find("array").map(Element::text_content),
        })
        .collect();
    let kind = SymbolKind::Function(Function {
        return_type: child_text(memberdef, "type"),
        parameters,
        ..Function::default()
    });
    declare(registry, options, memberdef, kind)
}

fn typedef(registry: &mut Registry, options: &Options, memberdef: &Element) -> Result<(), Error> {
    // `typedef struct widget widget;` is documented on the struct's page so
    // the two never compete for the same file.
    let name = child_text(memberdef, "name");
    if let Some(target) = aliased(registry, memberdef, &name) {
        registry.alias(memberdef.required_attr("id")?, target);
        return Ok(());
    }

    let kind = SymbolKind::Typedef(Typedef {
        type_name: child_text(memberdef, "type"),
        argsstring: child_text(memberdef, "argsstring"),
        documented_params: Vec::new(),
    });
    declare(registry, options, memberdef, kind)
}

/// The struct, union or enum a typedef renames, if it keeps the same name.
fn aliased(registry: &Registry, memberdef: &Element, name: &str) -> Option<SymbolId> {
    let refid = memberdef.find("type")?.descendant("ref")?.attr("refid")?;
    let target = registry.lookup(refid)?;
    let symbol = registry.get(target);
    let renames_type = matches!(symbol.kind, SymbolKind::Composite(_) | SymbolKind::Enum(_));
    (renames_type && symbol.name == name).then_some(target)
}

fn define(registry: &mut Registry, options: &Options, memberdef: &Element) -> Result<(), Error> {
    let mut function_like = false;
    let mut parameters = Vec::new();
    for param in memberdef.find_all("param") {
        // Doxygen emits a single empty <param> for `#define F()`.
        function_like = true;
        match param.find("defname").map(Element::text_content) {
            Some(name) if !name.is_empty() => parameters.push(name),
            _ => {
                parameters.clear();
                break;
            }
        }
    }
    let initializer = memberdef
        .find("initializer")
        .map(Element::text_content)
        .filter(|init| !init.is_empty());

    let kind = SymbolKind::Define(Define {
        function_like,
        parameters,
        initializer,
        ..Define::default()
    });
    declare(registry, options, memberdef, kind)
}

fn variable(registry: &mut Registry, options: &Options, memberdef: &Element) -> Result<(), Error> {
    // Struct and union members are documented with their parent.
    if child_text(memberdef, "definition").contains("::") {
        let field = registry.resolve(memberdef.required_attr("id")?)?;
        if let SymbolKind::Field(f) = &mut registry.get_mut(field).kind {
            f.type_name = child_text(memberdef, "type");
            f.argsstring = child_text(memberdef, "argsstring");
        }
        return Ok(());
    }

    let kind = SymbolKind::Variable(Variable {
        type_name: child_text(memberdef, "type"),
        argsstring: child_text(memberdef, "argsstring"),
    });
    declare(registry, options, memberdef, kind)
}
