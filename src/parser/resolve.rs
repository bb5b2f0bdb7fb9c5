//! Third pass: briefs and detailed descriptions.
//!
//! Every symbol is registered by now, so references inside either resolve
//! regardless of which file declared their target.

use std::collections::HashSet;

use super::{describe, summarize};
use crate::error::Error;
use crate::model::{SymbolId, SymbolKind};
use crate::options::Options;
use crate::registry::Registry;
use crate::xml::Element;

pub(super) fn resolve(
    registry: &mut Registry,
    options: &Options,
    def: &Element,
    described: &mut HashSet<SymbolId>,
) -> Result<(), Error> {
    let is_c = def.attr("language") == Some("C++");
    let id = def.required_attr("id")?;

    match def.attr("kind").unwrap_or_default() {
        "struct" | "union" if is_c => {
            let composite = registry.resolve(id)?;
            overview(registry, options, composite, def)?;

            for sectiondef in def.find_all("sectiondef") {
                for memberdef in sectiondef.find_all("memberdef") {
                    let field = registry.resolve(memberdef.required_attr("id")?)?;
                    let brief = summarize(registry, options, composite, memberdef.find("briefdescription"))?;
                    let description =
                        describe(registry, options, composite, memberdef.find("detaileddescription"))?;
                    let field = registry.get_mut(field);
                    field.brief = brief;
                    field.description = description;
                }
            }
        }
        "file" if is_c => {
            // Only headers have a page, but enums in any file do.
            if let Some(header) = registry.lookup(id) {
                overview(registry, options, header, def)?;
            }
            members(registry, options, def, described)?;
        }
        "group" => {
            let group = registry.resolve(id)?;
            overview(registry, options, group, def)?;
            members(registry, options, def, described)?;
        }
        "example" => {
            let example = registry.resolve(id)?;
            overview(registry, options, example, def)?;
        }
        _ => {}
    }
    Ok(())
}

/// Brief and description of a compound.
fn overview(
    registry: &mut Registry,
    options: &Options,
    handle: SymbolId,
    def: &Element,
) -> Result<(), Error> {
    let brief = summarize(registry, options, handle, def.find("briefdescription"))?;
    let description = describe(registry, options, handle, def.find("detaileddescription"))?;
    let symbol = registry.get_mut(handle);
    symbol.brief = brief;
    symbol.description = description;
    Ok(())
}

fn members(
    registry: &mut Registry,
    options: &Options,
    def: &Element,
    described: &mut HashSet<SymbolId>,
) -> Result<(), Error> {
    for sectiondef in def.find_all("sectiondef") {
        for memberdef in sectiondef.find_all("memberdef") {
            let Some(handle) = registry.lookup(memberdef.required_attr("id")?) else {
                continue;
            };
            let kind = memberdef.attr("kind").unwrap_or_default();
            // A grouped struct's member; its description comes with the struct.
            if let SymbolKind::Field(field) = &registry.get(handle).kind {
                let parent = field.parent;
                if registry.get(handle).brief.is_none() {
                    let brief = summarize(registry, options, parent, memberdef.find("briefdescription"))?;
                    registry.get_mut(handle).brief = brief;
                }
                continue;
            }
            // A typedef folded into a struct or enum resolves to that symbol;
            // its own description must not replace the target's.
            let same_kind = matches!(
                (&registry.get(handle).kind, kind),
                (SymbolKind::Function(_), "function")
                    | (SymbolKind::Typedef(_), "typedef")
                    | (SymbolKind::Define(_), "define")
                    | (SymbolKind::Variable(_), "variable")
                    | (SymbolKind::Enum(_), "enum")
            );
            // Members listed by both a header and a group are described once.
            if !same_kind || !described.insert(handle) {
                continue;
            }

            let brief = summarize(registry, options, handle, memberdef.find("briefdescription"))?;
            let description = describe(registry, options, handle, memberdef.find("detaileddescription"))?;
            let symbol = registry.get_mut(handle);
            symbol.brief = brief;
            symbol.description = description;

            match kind {
                "function" => {
                    for param in memberdef.find_all("param") {
                        let target = param
                            .find("type")
                            .and_then(|t| t.descendant("ref"))
                            .and_then(|r| r.attr("refid"))
                            .and_then(|refid| registry.lookup(refid));
                        if let Some(target) = target {
                            registry.add_referenced(handle, target);
                        }
                    }
                }
                "enum" => {
                    for value in memberdef.find_all("enumvalue") {
                        let Some(element) = registry.lookup(value.required_attr("id")?) else {
                            continue;
                        };
                        let brief = summarize(registry, options, handle, value.find("briefdescription"))?;
                        let description =
                            describe(registry, options, handle, value.find("detaileddescription"))?;
                        let element = registry.get_mut(element);
                        element.brief = brief;
                        element.description = description;
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
