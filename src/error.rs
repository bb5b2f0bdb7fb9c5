//! Crate-level error types.
//!
//! Only conditions that would silently lose documentation or produce
//! overlapping pages are errors. Everything recoverable is a `log::warn!`.

/// Fatal errors raised while building, resolving or rendering documentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element the document builder has no rule for.
    #[error("unknown element <{tag}>")]
    UnknownElement { tag: String },

    /// An element in a position where the schema does not allow it.
    #[error("unexpected <{tag}> inside <{parent}>")]
    UnexpectedElement { parent: String, tag: String },

    /// A `<simplesect>` kind the builder has no rule for.
    #[error("unknown simplesect kind: {kind}")]
    UnknownAdmonition { kind: String },

    /// Two distinct symbols map onto the same output page.
    #[error("cannot have {first} and {second} man pages both named '{page}'")]
    PageCollision {
        page: String,
        first: &'static str,
        second: &'static str,
    },

    /// An identifier that discovery should have registered is missing.
    #[error("unresolved symbol identifier: {id}")]
    UnresolvedSymbol { id: String },

    #[error("missing <{child}> in <{parent}>")]
    MissingElement { parent: String, child: String },

    #[error("missing attribute '{attribute}' on <{tag}>")]
    MissingAttribute { tag: String, attribute: String },

    #[error("expected section in the inclusive range 1-9, found {section}")]
    InvalidSection { section: u8 },

    /// Neither a topic nor a PROJECT_NAME is available for the page heading.
    #[error("missing project name; pass --topic or include doxyfile.xml")]
    MissingProjectName,

    #[error("xml: {0}")]
    Xml(#[from] roxmltree::Error),
}
