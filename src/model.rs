//! Symbol records: one per documented entity Doxygen assigned an identifier.

use crate::roff::Document;

/// Index of a symbol inside its [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) usize);

/// A documented entity. Common fields live here; kind-specific data lives in
/// [`SymbolKind`].
#[derive(Debug)]
pub struct Symbol {
    /// Doxygen identifier, unique across the registry.
    pub id: String,
    pub name: String,
    /// Identifier of the enclosing `\defgroup`, if any.
    pub group_id: Option<String>,
    /// Output page name without the section suffix; `None` for symbols that
    /// are documented on another symbol's page.
    pub page_name: Option<String>,
    /// Header the symbol is declared in, as it appears in `#include`.
    pub header: Option<String>,
    pub brief: Option<String>,
    pub description: Option<Document>,
    pub authors: Vec<Document>,
    pub bugs: Vec<Document>,
    pub deprecated: Vec<Document>,
    pub examples: Vec<SymbolId>,
    /// Symbols this one's documentation points at, in first-seen order.
    pub referenced: Vec<SymbolId>,
    pub kind: SymbolKind,
}

#[derive(Debug)]
pub enum SymbolKind {
    Function(Function),
    Composite(Composite),
    Field(Field),
    Enum(Enum),
    EnumElement { parent: SymbolId },
    Typedef(Typedef),
    Define(Define),
    Variable(Variable),
    Header(Header),
    Group,
    Example,
}

#[derive(Debug, Default)]
pub struct Function {
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub parameter_docs: Option<Document>,
    pub return_docs: Option<Document>,
}

#[derive(Debug, Default)]
pub struct Parameter {
    pub type_name: String,
    pub name: Option<String>,
    /// Array suffix such as `[16]`.
    pub array: Option<String>,
}

/// A struct or union.
#[derive(Debug, Default)]
pub struct Composite {
    pub is_struct: bool,
    pub fields: Vec<SymbolId>,
    /// Identifiers of same-named typedefs folded into this page.
    pub aliases: Vec<String>,
}

#[derive(Debug)]
pub struct Field {
    pub parent: SymbolId,
    pub type_name: String,
    pub argsstring: String,
}

#[derive(Debug, Default)]
pub struct Enum {
    pub elements: Vec<SymbolId>,
    pub aliases: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Typedef {
    pub type_name: String,
    pub argsstring: String,
    /// Parameter names documented with `\param`, used to italicize them in
    /// the declaration.
    pub documented_params: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Define {
    pub function_like: bool,
    pub parameters: Vec<String>,
    pub initializer: Option<String>,
    pub parameter_docs: Option<Document>,
    pub return_docs: Option<Document>,
}

#[derive(Debug, Default)]
pub struct Variable {
    pub type_name: String,
    pub argsstring: String,
}

/// A header file and the identifiers it declares, in declaration order.
#[derive(Debug, Default)]
pub struct Header {
    pub members: Vec<String>,
}

/// Side-channel content collected while rendering one brief or description.
///
/// The builder never mutates the registry; the caller folds a harvest into
/// the active symbol with [`Registry::absorb`](crate::registry::Registry::absorb).
#[derive(Debug, Default)]
pub struct Harvest {
    pub authors: Vec<Document>,
    pub bugs: Vec<Document>,
    pub deprecated: Vec<Document>,
    pub examples: Vec<SymbolId>,
    pub referenced: Vec<SymbolId>,
    /// Latest `\param` list; replaces any earlier one.
    pub parameters: Option<Document>,
    /// Latest `\return` or `\retval` text; replaces any earlier one.
    pub returns: Option<Document>,
    pub param_names: Vec<String>,
}

impl Harvest {
    /// Record a reference from `active` to `target`, once, never to itself.
    pub fn reference(&mut self, active: Option<SymbolId>, target: SymbolId) {
        if active != Some(target) && !self.referenced.contains(&target) {
            self.referenced.push(target);
        }
    }
}

impl Symbol {
    pub fn new(id: &str, name: &str, kind: SymbolKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            group_id: group_of(id),
            page_name: None,
            header: None,
            brief: None,
            description: None,
            authors: Vec::new(),
            bugs: Vec::new(),
            deprecated: Vec::new(),
            examples: Vec::new(),
            referenced: Vec::new(),
            kind,
        }
    }

    /// Give this symbol its own page, named after its display name.
    pub fn with_page(mut self) -> Self {
        let is_header = matches!(self.kind, SymbolKind::Header(_));
        self.page_name = Some(page_name(&self.name, is_header));
        self
    }

    pub fn with_header(mut self, header: String) -> Self {
        self.header = Some(header);
        self
    }

    /// Human readable kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SymbolKind::Function(_) => "function",
            SymbolKind::Composite(c) if c.is_struct => "struct",
            SymbolKind::Composite(_) => "union",
            SymbolKind::Field(_) => "field",
            SymbolKind::Enum(_) => "enumeration",
            SymbolKind::EnumElement { .. } => "enumerator",
            SymbolKind::Typedef(_) => "typedef",
            SymbolKind::Define(_) => "define",
            SymbolKind::Variable(_) => "variable",
            SymbolKind::Header(_) => "header",
            SymbolKind::Group => "group",
            SymbolKind::Example => "example",
        }
    }

    /// Whether `name` is a parameter of this function, macro or typedef.
    pub fn has_parameter(&self, name: &str) -> bool {
        match &self.kind {
            SymbolKind::Function(f) => f.parameters.iter().any(|p| p.name.as_deref() == Some(name)),
            SymbolKind::Define(d) => d.parameters.iter().any(|p| p == name),
            SymbolKind::Typedef(t) => crate::clex::contains_token(&t.argsstring, name),
            _ => false,
        }
    }
}

/// Members of a group carry the group identifier as their prefix, e.g.
/// `group__color_1ga3f...` belongs to `group__color`.
pub fn group_of(id: &str) -> Option<String> {
    if !id.starts_with("group__") {
        return None;
    }
    match id.find("_1") {
        Some(end) if end > 0 => Some(id[..end].to_string()),
        _ => None,
    }
}

/// Lowercase display name; headers drop their extension.
pub fn page_name(name: &str, is_header: bool) -> String {
    let stem = if is_header {
        match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        }
    } else {
        name
    };
    stem.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_prefix_is_extracted() {
        assert_eq!(
            group_of("group__color_1ga3f2b").as_deref(),
            Some("group__color")
        );
        assert_eq!(group_of("widget_8h_1a2c"), None);
        assert_eq!(group_of("group__color"), None);
    }

    #[test]
    fn page_names_are_lowercase() {
        assert_eq!(page_name("Widget_Open", false), "widget_open");
        assert_eq!(page_name("Widget.h", true), "widget");
        assert_eq!(page_name(".hidden", true), ".hidden");
    }

    #[test]
    fn harvest_references_are_unique_and_never_self() {
        let mut h = Harvest::default();
        let me = SymbolId(0);
        h.reference(Some(me), SymbolId(1));
        h.reference(Some(me), SymbolId(1));
        h.reference(Some(me), me);
        h.reference(Some(me), SymbolId(2));
        assert_eq!(h.referenced, vec![SymbolId(1), SymbolId(2)]);
    }

    #[test]
    fn parameters_are_found_by_kind() {
        let func = Symbol::new(
            "f",
            "f",
            SymbolKind::Function(Function {
                parameters: vec![Parameter {
                    type_name: "int".into(),
                    name: Some("count".into()),
                    array: None,
                }],
                ..Function::default()
            }),
        );
        assert!(func.has_parameter("count"));
        assert!(!func.has_parameter("cnt"));

        let typedef = Symbol::new(
            "t",
            "callback",
            SymbolKind::Typedef(Typedef {
                type_name: "void(*".into(),
                argsstring: ")(void *ctx, int len)".into(),
                documented_params: Vec::new(),
            }),
        );
        assert!(typedef.has_parameter("ctx"));
        assert!(!typedef.has_parameter("void *ctx"));
    }
}
