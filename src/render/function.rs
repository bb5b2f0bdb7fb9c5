//! Function and macro pages.

use super::Page;
use crate::model::{Define, Function};
use crate::roff::Document;

pub(super) fn function(page: &Page<'_>, func: &Function) -> Document {
    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);
    doc.push_macro("BI", Some(&signature(&page.symbol.name, func)));
    doc.push_macro("fi", None);
    page.description(&mut doc);
    page.parameters(&mut doc, func.parameter_docs.as_ref(), func.return_docs.as_ref());
    page.closing(&mut doc);
    doc
}

/// Prototype for `.BI`: type text in bold, parameter names in italic.
fn signature(name: &str, func: &Function) -> String {
    let mut sig = format!("\"{}", func.return_type);
    if !func.return_type.ends_with('*') {
        sig.push(' ');
    }
    sig.push_str(name);
    sig.push('(');

    for (index, param) in func.parameters.iter().enumerate() {
        if index > 0 {
            sig.push_str(", ");
        }
        sig.push_str(&param.type_name);
        if (param.name.is_some() || param.array.is_some()) && !sig.ends_with('*') {
            sig.push(' ');
        }
        if let Some(name) = &param.name {
            sig.push_str(&format!("\" {name} \""));
        }
        if let Some(array) = &param.array {
            sig.push_str(array);
        }
    }

    sig.push_str(");\"");
    sig
}

pub(super) fn define(page: &Page<'_>, define: &Define) -> Document {
    let name = &page.symbol.name;
    let mut doc = Document::new();
    page.introduction(&mut doc);
    page.synopsis(&mut doc);

    if define.function_like {
        let params: Vec<String> = define
            .parameters
            .iter()
            .map(|p| format!("\" {p} \""))
            .collect();
        let sig = format!("\"#define {name}({});\"", params.join(", "));
        doc.push_macro("BI", Some(&sig));
    } else {
        let sig = match &define.initializer {
            Some(value) => format!("#define {name} {value}"),
            None => format!("#define {name}"),
        };
        doc.push_macro("B", Some(&sig));
    }
    doc.push_macro("fi", None);

    page.description(&mut doc);
    page.parameters(&mut doc, define.parameter_docs.as_ref(), define.return_docs.as_ref());
    page.closing(&mut doc);
    doc
}
