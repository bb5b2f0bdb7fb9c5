//! manos: generate man(7) pages from Doxygen XML for C libraries.
//!
//! The pipeline is
//! XML → [`xml::Element`] tree → [`parser::load`] (symbol [`Registry`]) →
//! [`render::render_pages`] (one [`roff::Document`] per page) → text.
//!
//! ```no_run
//! use manos::{generate, xml, Options, Source};
//!
//! let root = xml::parse(&std::fs::read_to_string("xml/widget_8h.xml")?)?;
//! let pages = generate(&[Source::new("widget_8h.xml", root)], &Options::default())?;
//! for page in pages {
//!     println!("{}", page.file_name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod clex;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod options;
pub mod parser;
pub mod registry;
pub mod render;
pub mod roff;
pub mod sentence;
pub mod xml;

pub use error::Error;
pub use options::{IncludePath, Options};
pub use parser::Source;
pub use registry::Registry;
pub use render::ManPage;

/// Run the whole pipeline over already parsed XML files.
pub fn generate(sources: &[Source], options: &Options) -> Result<Vec<ManPage>, Error> {
    options.validate()?;
    let registry = parser::load(sources, options)?;
    render::render_pages(&registry, options)
}
