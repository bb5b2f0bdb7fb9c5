//! Owned tagged-node tree for Doxygen XML.
//!
//! `roxmltree` documents borrow their input; converting into this small owned
//! tree lets the parser passes keep every compound around for the whole run.

use crate::error::Error;

/// An XML element with its attributes and mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A child of an element: either a nested element or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Element::attr`] but a missing attribute is an error.
    pub fn required_attr(&self, name: &str) -> Result<&str, Error> {
        self.attr(name).ok_or_else(|| Error::MissingAttribute {
            tag: self.tag.clone(),
            attribute: name.to_string(),
        })
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element named `tag`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|e| e.tag == tag)
    }

    /// Like [`Element::find`] but a missing child is an error.
    pub fn required(&self, tag: &str) -> Result<&Element, Error> {
        self.find(tag).ok_or_else(|| Error::MissingElement {
            parent: self.tag.clone(),
            child: tag.to_string(),
        })
    }

    /// All child elements named `tag`.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.tag == tag)
    }

    /// All character data of this subtree concatenated, then trimmed.
    pub fn text_content(&self) -> String {
        fn collect(elem: &Element, out: &mut String) {
            for child in &elem.children {
                match child {
                    Node::Text(t) => out.push_str(t),
                    Node::Element(e) => collect(e, out),
                }
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out.trim().to_string()
    }

    /// Depth-first search for the first element named `tag`, including `self`.
    pub fn descendant(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.elements().find_map(|e| e.descendant(tag))
    }
}

/// Text content of an optional element; absent elements read as empty.
pub fn text_of(elem: Option<&Element>) -> String {
    elem.map(Element::text_content).unwrap_or_default()
}

/// Parse XML source text into its root element.
pub fn parse(source: &str) -> Result<Element, Error> {
    let doc = roxmltree::Document::parse(source)?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut elem = Element::new(node.tag_name().name());
    elem.attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    for child in node.children() {
        if child.is_element() {
            elem.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                elem.children.push(Node::Text(text.to_string()));
            }
        }
    }
    elem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_content_in_order() {
        let root = parse("<para>Hello <bold>big</bold> world</para>").unwrap();
        assert_eq!(root.tag, "para");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.text_content(), "Hello big world");
    }

    #[test]
    fn finds_children_and_attributes() {
        let root = parse(r#"<a><b id="1"/><c/><b id="2"><ref refid="x">X</ref></b></a>"#).unwrap();
        let ids: Vec<_> = root.find_all("b").filter_map(|b| b.attr("id")).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(root.find("c").is_some());
        assert!(root.find("d").is_none());
        assert_eq!(root.descendant("ref").and_then(|r| r.attr("refid")), Some("x"));
    }

    #[test]
    fn missing_pieces_are_errors() {
        let root = parse("<a/>").unwrap();
        assert!(matches!(root.required("b"), Err(Error::MissingElement { .. })));
        assert!(matches!(root.required_attr("id"), Err(Error::MissingAttribute { .. })));
    }

    #[test]
    fn cdata_is_text() {
        let root = parse("<value><![CDATA[My Project]]></value>").unwrap();
        assert_eq!(root.text_content(), "My Project");
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(parse("<a><b></a>"), Err(Error::Xml(_))));
    }
}
