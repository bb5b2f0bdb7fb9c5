//! First pass: symbols other compounds may refer to by identifier.
//!
//! Structs, unions and enums must exist before typedefs are registered so a
//! typedef naming one of them can be folded into its page.

use super::{child_text, location};
use crate::error::Error;
use crate::model::{Composite, Enum, Field, Symbol, SymbolId, SymbolKind};
use crate::options::Options;
use crate::registry::Registry;
use crate::xml::Element;

pub(super) fn discover(
    registry: &mut Registry,
    options: &Options,
    def: &Element,
) -> Result<(), Error> {
    let is_c = def.attr("language") == Some("C++");
    match def.attr("kind").unwrap_or_default() {
        "struct" if is_c => composite(registry, options, def, true),
        "union" if is_c => composite(registry, options, def, false),
        "file" if is_c => enums(registry, options, def),
        "group" => enums(registry, options, def),
        "example" => example(registry, def),
        _ => Ok(()),
    }
}

fn composite(
    registry: &mut Registry,
    options: &Options,
    def: &Element,
    is_struct: bool,
) -> Result<(), Error> {
    let id = def.required_attr("id")?;
    if registry.lookup(id).is_some() {
        return Ok(());
    }

    let kind = SymbolKind::Composite(Composite {
        is_struct,
        ..Composite::default()
    });
    let symbol = Symbol::new(id, &child_text(def, "compoundname"), kind)
        .with_header(location(def, options)?)
        .with_page();
    let handle = registry.register(symbol)?;

    for sectiondef in def.find_all("sectiondef") {
        // Grouped structs list their fields as <member> references; free
        // standing ones define them inline with <memberdef>.
        for member in sectiondef.find_all("member") {
            let field = Symbol::new(
                member.required_attr("refid")?,
                &child_text(member, "name"),
                SymbolKind::Field(Field {
                    parent: handle,
                    type_name: String::new(),
                    argsstring: String::new(),
                }),
            );
            let field = registry.register(field)?;
            attach_field(registry, handle, field);
        }

        for memberdef in sectiondef.find_all("memberdef") {
            let field = Symbol::new(
                memberdef.required_attr("id")?,
                &child_text(memberdef, "name"),
                SymbolKind::Field(Field {
                    parent: handle,
                    type_name: child_text(memberdef, "type"),
                    argsstring: child_text(memberdef, "argsstring"),
                }),
            );
            let field = registry.register(field)?;
            attach_field(registry, handle, field);
        }
    }

    Ok(())
}

fn attach_field(registry: &mut Registry, parent: SymbolId, field: SymbolId) {
    if let SymbolKind::Composite(c) = &mut registry.get_mut(parent).kind {
        if !c.fields.contains(&field) {
            c.fields.push(field);
        }
    }
}

fn enums(registry: &mut Registry, options: &Options, def: &Element) -> Result<(), Error> {
    for sectiondef in def.find_all("sectiondef") {
        for memberdef in sectiondef.find_all("memberdef") {
            if memberdef.attr("kind") != Some("enum") {
                continue;
            }
            let id = memberdef.required_attr("id")?;
            if registry.lookup(id).is_some() {
                continue;
            }

            let symbol = Symbol::new(id, &child_text(memberdef, "name"), SymbolKind::Enum(Enum::default()))
                .with_header(location(memberdef, options)?)
                .with_page();
            let handle = registry.register(symbol)?;

            // Doxygen references enumerators by their own global identifier.
            for value in memberdef.find_all("enumvalue") {
                let element = Symbol::new(
                    value.required_attr("id")?,
                    &child_text(value, "name"),
                    SymbolKind::EnumElement { parent: handle },
                );
                let element = registry.register(element)?;
                if let SymbolKind::Enum(e) = &mut registry.get_mut(handle).kind {
                    if !e.elements.contains(&element) {
                        e.elements.push(element);
                    }
                }
            }
        }
    }
    Ok(())
}

fn example(registry: &mut Registry, def: &Element) -> Result<(), Error> {
    let id = def.required_attr("id")?;
    let symbol = Symbol::new(id, &child_text(def, "compoundname"), SymbolKind::Example);
    registry.register(symbol)?;
    Ok(())
}
