//! Header pages: an overview of everything a header declares, split into
//! its groups.

use std::collections::HashSet;

use super::Page;
use crate::model::{Header, SymbolId, SymbolKind};
use crate::roff::Document;

/// Summary table titles, in the order tables are emitted.
const CATEGORIES: [&str; 6] = [
    "Functions",
    "Defines",
    "Enumerations",
    "Structures",
    "Unions",
    "Variables",
];

pub(super) fn header(page: &Page<'_>, header: &Header) -> Document {
    let registry = page.registry;
    let mut doc = Document::new();
    page.introduction(&mut doc);
    doc.push_macro("SH", Some("SYNOPSIS"));
    doc.push_macro("nf", None);
    doc.push_macro("B", Some(&format!("#include <{}>", page.symbol.name)));
    doc.push_macro("fi", None);
    page.description(&mut doc);

    let mut seen = HashSet::new();
    let mut globals: Vec<SymbolId> = Vec::new();
    let mut groups: Vec<(SymbolId, Vec<SymbolId>)> = Vec::new();

    for id in &header.members {
        let Some(handle) = registry.lookup(id) else {
            continue;
        };
        if !seen.insert(handle) || category(&registry.get(handle).kind).is_none() {
            continue;
        }
        let group = registry
            .get(handle)
            .group_id
            .as_deref()
            .and_then(|group_id| registry.lookup(group_id));
        match group {
            None => globals.push(handle),
            Some(group) => match groups.iter_mut().find(|(g, _)| *g == group) {
                Some((_, members)) => members.push(handle),
                None => groups.push((group, vec![handle])),
            },
        }
    }

    doc.append(summary(page, &globals));

    groups.sort_by_key(|(group, _)| registry.group_position(&registry.get(*group).id));
    for (group, members) in &groups {
        let group = registry.get(*group);
        doc.push_macro("SS", Some(&group.name));
        if let Some(description) = &group.description {
            doc.append(description.clone());
        } else if let Some(brief) = &group.brief {
            doc.push_text(brief);
        }
        doc.append(summary(page, members));
    }

    page.closing(&mut doc);
    doc
}

fn category(kind: &SymbolKind) -> Option<usize> {
    match kind {
        SymbolKind::Function(_) => Some(0),
        SymbolKind::Define(_) => Some(1),
        SymbolKind::Enum(_) => Some(2),
        SymbolKind::Composite(c) if c.is_struct => Some(3),
        SymbolKind::Composite(_) => Some(4),
        SymbolKind::Variable(_) => Some(5),
        _ => None,
    }
}

/// A tbl(1) table listing each member with its brief, one block per
/// category.
fn summary(page: &Page<'_>, members: &[SymbolId]) -> Document {
    let mut doc = Document::new();
    if members.is_empty() {
        return doc;
    }

    let mut tables: [Vec<SymbolId>; 6] = Default::default();
    for &handle in members {
        if let Some(index) = category(&page.registry.get(handle).kind) {
            tables[index].push(handle);
        }
    }

    doc.push_macro("TS", None);
    doc.push_text("tab(;);\n");
    let mut emitted = false;
    for (title, table) in CATEGORIES.iter().zip(&tables) {
        if table.is_empty() {
            continue;
        }
        if emitted {
            doc.push_macro("T&", None);
        }
        let mut block = format!("l l.\n\\fB{title}\\fR;\\fBDescription\\fR\n_\n");
        for &handle in table {
            let member = page.registry.get(handle);
            let brief = member.brief.as_deref().unwrap_or_default();
            block.push_str(&format!(
                "\\fB{}\\fR({});T{{\n{brief}\nT}}\n",
                member.name, page.options.section
            ));
        }
        doc.push_text(&block);
        emitted = true;
    }
    doc.push_macro("TE", None);
    doc
}
