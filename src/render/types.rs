//! Struct, union, enum, typedef and variable pages.

use super::{declaration, indented, Page};
use crate::clex;
use crate::model::{Composite, Enum, SymbolId, SymbolKind, Typedef, Variable};
use crate::roff::Document;

pub(super) fn composite(page: &Page<'_>, composite: &Composite) -> Document {
    let name = &page.symbol.name;
    let keyword = if composite.is_struct { "struct" } else { "union" };

    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);
    doc.push_macro("B", Some(&format!("{keyword} {name} {{")));
    doc.push_macro("RS", None);
    for &handle in &composite.fields {
        let field = page.registry.get(handle);
        if let SymbolKind::Field(f) = &field.kind {
            let declarator = format!("{}{}", field.name, f.argsstring);
            doc.push_macro("B", Some(&format!("{};", declaration(&f.type_name, &declarator))));
        }
    }
    doc.push_macro("RE", None);
    doc.push_macro("B", Some("};"));
    if !composite.aliases.is_empty() {
        doc.push_macro("B", Some(&format!("typedef {keyword} {name} {name};")));
    }
    doc.push_macro("fi", None);

    page.description(&mut doc);
    if page.options.composite_fields && !composite.fields.is_empty() {
        doc.push_macro("SH", Some("FIELDS"));
        tagged_list(page, &mut doc, &composite.fields);
    }
    page.closing(&mut doc);
    doc
}

pub(super) fn enumeration(page: &Page<'_>, enumeration: &Enum) -> Document {
    let name = &page.symbol.name;

    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);
    doc.push_macro("B", Some(&format!("enum {name} {{")));
    doc.push_macro("RS", None);
    for &handle in &enumeration.elements {
        let element = page.registry.get(handle);
        doc.push_macro("B", Some(&format!("{},", element.name)));
    }
    doc.push_macro("RE", None);
    doc.push_macro("B", Some("};"));
    if !enumeration.aliases.is_empty() {
        doc.push_macro("B", Some(&format!("typedef enum {name} {name};")));
    }
    doc.push_macro("fi", None);

    page.description(&mut doc);
    if !enumeration.elements.is_empty() {
        doc.push_macro("SH", Some("CONSTANTS"));
        tagged_list(page, &mut doc, &enumeration.elements);
    }
    page.closing(&mut doc);
    doc
}

/// `.TP` entries for fields or enumerators, each with its documentation
/// indented below the name.
fn tagged_list(page: &Page<'_>, doc: &mut Document, members: &[SymbolId]) {
    for &handle in members {
        let member = page.registry.get(handle);
        doc.push_macro("TP", None);
        doc.push_macro("BR", Some(&member.name));
        if let Some(description) = &member.description {
            doc.append(indented(description));
        } else if let Some(brief) = &member.brief {
            doc.push_text(brief);
        }
    }
}

pub(super) fn typedef(page: &Page<'_>, typedef: &Typedef) -> Document {
    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);
    doc.push_macro("BI", Some(&typedef_declaration(&page.symbol.name, typedef)));
    doc.push_macro("fi", None);
    page.description(&mut doc);
    page.closing(&mut doc);
    doc
}

/// Declaration for `.BI`. Doxygen leaves the argument string of a function
/// pointer typedef untokenized, so documented parameter names are found here.
fn typedef_declaration(name: &str, typedef: &Typedef) -> String {
    let mut decl = format!("\"typedef {}", typedef.type_name);
    if !decl.ends_with('*') {
        decl.push(' ');
    }
    decl.push_str(name);
    for token in clex::tokenize(&typedef.argsstring) {
        if typedef.documented_params.iter().any(|p| p == token) {
            decl.push_str(&format!("\" {token} \""));
        } else {
            decl.push_str(token);
        }
    }
    decl.push_str(";\"");
    decl
}

pub(super) fn variable(page: &Page<'_>, variable: &Variable) -> Document {
    let declarator = format!("{}{}", page.symbol.name, variable.argsstring);

    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);
    doc.push_macro("B", Some(&format!("{};", declaration(&variable.type_name, &declarator))));
    doc.push_macro("fi", None);
    page.description(&mut doc);
    page.closing(&mut doc);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_pointer_parameters_are_italic() {
        let typedef = Typedef {
            type_name: "void(*".into(),
            argsstring: ")(void *ctx, int len)".into(),
            documented_params: vec!["ctx".into()],
        };
        assert_eq!(
            typedef_declaration("widget_cb", &typedef),
            r#""typedef void(* widget_cb)(void *" ctx ", int len);""#
        );
    }

    #[test]
    fn pointer_typedef_hugs_the_star() {
        let typedef = Typedef {
            type_name: "struct widget *".into(),
            argsstring: String::new(),
            documented_params: Vec::new(),
        };
        assert_eq!(
            typedef_declaration("widget_ptr", &typedef),
            r#""typedef struct widget *widget_ptr;""#
        );
    }
}
