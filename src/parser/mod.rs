//! Parser module: turns Doxygen's XML output into a populated [`Registry`].
//!
//! Ingestion runs in strict phases so every cross reference can be resolved
//! by the time descriptions are rendered:
//!
//! 1. project metadata (`doxyfile.xml`) and group ordering (`index.xml`)
//! 2. [`discover`]: structs, unions, their fields, enums and examples
//! 3. [`members`]: headers, groups, functions, typedefs, macros, variables
//! 4. [`resolve`]: briefs and detailed descriptions, which may reference
//!    anything above

mod discover;
mod members;
mod project;
mod resolve;

use std::collections::HashSet;

use crate::builder::{self, RenderContext};
use crate::error::Error;
use crate::model::SymbolId;
use crate::options::Options;
use crate::registry::Registry;
use crate::roff::Document;
use crate::xml::{text_of, Element};

/// One parsed XML file.
#[derive(Debug, Clone)]
pub struct Source {
    /// Where the file came from, for diagnostics.
    pub name: String,
    pub root: Element,
}

impl Source {
    pub fn new(name: impl Into<String>, root: Element) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// The `<compounddef>` of a compound file, if this is one.
    fn compound(&self) -> Option<&Element> {
        if self.root.tag != "doxygen" {
            return None;
        }
        self.root.find("compounddef")
    }
}

/// Build a fresh registry from every source.
pub fn load(sources: &[Source], options: &Options) -> Result<Registry, Error> {
    let mut registry = Registry::new();

    for source in sources {
        match source.root.tag.as_str() {
            "doxyfile" => project::read_settings(&mut registry.project, &source.root),
            "doxygenindex" => project::read_index(&mut registry, &source.root),
            _ => {}
        }
    }

    for source in sources {
        if let Some(def) = source.compound() {
            log::debug!("discovering {}", source.name);
            discover::discover(&mut registry, options, def)?;
        }
    }

    for source in sources {
        if let Some(def) = source.compound() {
            log::debug!("registering {}", source.name);
            members::register(&mut registry, options, def)?;
        }
    }

    let mut described = HashSet::new();
    for source in sources {
        if let Some(def) = source.compound() {
            log::debug!("resolving {}", source.name);
            resolve::resolve(&mut registry, options, def, &mut described)?;
        }
    }

    Ok(registry)
}

// -- Shared helpers ------------------------------------------------------------

/// Render a brief on behalf of `active`, folding side channels into it.
fn summarize(
    registry: &mut Registry,
    options: &Options,
    active: SymbolId,
    elem: Option<&Element>,
) -> Result<Option<String>, Error> {
    let mut ctx = RenderContext::new(registry, options, Some(active));
    let brief = builder::extract_brief(&mut ctx, elem)?;
    let harvest = ctx.into_harvest();
    registry.absorb(active, harvest);
    Ok(brief)
}

/// Render a detailed description on behalf of `active`.
fn describe(
    registry: &mut Registry,
    options: &Options,
    active: SymbolId,
    elem: Option<&Element>,
) -> Result<Option<Document>, Error> {
    let mut ctx = RenderContext::new(registry, options, Some(active));
    let description = builder::extract_description(&mut ctx, elem)?;
    let harvest = ctx.into_harvest();
    registry.absorb(active, harvest);
    Ok(description)
}

/// Header path of a compound or member, shaped by the include style.
fn location(elem: &Element, options: &Options) -> Result<String, Error> {
    let file = elem.required("location")?.required_attr("file")?;
    Ok(options.header_path(file))
}

fn child_text(elem: &Element, tag: &str) -> String {
    text_of(elem.find(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    const HEADER: &str = r#"<doxygen><compounddef id="widget_8h" kind="file" language="C++">
        <compoundname>widget.h</compoundname>
        <sectiondef kind="enum">
          <memberdef kind="enum" id="widget_8h_1e0">
            <name>color</name>
            <enumvalue id="widget_8h_1e1"><name>RED</name><briefdescription><para>Red.</para></briefdescription></enumvalue>
            <briefdescription><para>Primary colors.</para></briefdescription>
            <location file="include/widget.h"/>
          </memberdef>
        </sectiondef>
        <sectiondef kind="func">
          <memberdef kind="function" id="widget_8h_1a1">
            <type>int</type><name>widget_open</name>
            <param><type>const char *</type><declname>path</declname></param>
            <briefdescription><para>Opens <computeroutput>path</computeroutput>.</para></briefdescription>
            <location file="include/widget.h"/>
          </memberdef>
        </sectiondef>
        <location file="include/widget.h"/>
      </compounddef></doxygen>"#;

    const WIDGET: &str = r#"<doxygen><compounddef id="structwidget" kind="struct" language="C++">
        <compoundname>widget</compoundname>
        <sectiondef kind="public-attrib">
          <memberdef kind="variable" id="structwidget_1a1">
            <type>int</type><name>fd</name><argsstring></argsstring>
            <briefdescription><para>From <ref refid="widget_8h_1a1" kindref="member">widget_open</ref>.</para></briefdescription>
          </memberdef>
        </sectiondef>
        <briefdescription><para>A widget.</para></briefdescription>
        <location file="include/widget.h"/>
      </compounddef></doxygen>"#;

    fn sources() -> Vec<Source> {
        vec![
            Source::new("structwidget.xml", parse(WIDGET).unwrap()),
            Source::new("widget_8h.xml", parse(HEADER).unwrap()),
        ]
    }

    fn brief(registry: &Registry, id: &str) -> Option<String> {
        registry.get(registry.lookup(id).unwrap()).brief.clone()
    }

    #[test]
    fn briefs_are_filled_in_once_everything_is_registered() {
        let registry = load(&sources(), &Options::default()).unwrap();
        assert_eq!(brief(&registry, "structwidget").as_deref(), Some("A widget."));
        assert_eq!(brief(&registry, "structwidget_1a1").as_deref(), Some("From widget_open."));
        assert_eq!(brief(&registry, "widget_8h_1e0").as_deref(), Some("Primary colors."));
        assert_eq!(brief(&registry, "widget_8h_1e1").as_deref(), Some("Red."));
        assert_eq!(
            brief(&registry, "widget_8h_1a1").as_deref(),
            Some("Opens \\f[I]path\\f[R].")
        );

        let widget = registry.lookup("structwidget").unwrap();
        assert!(registry.get(widget).referenced.is_empty());
    }

    #[test]
    fn styled_briefs_reference_later_symbols() {
        let opts = Options {
            brief_suppresses_refs: false,
            ..Options::default()
        };
        let registry = load(&sources(), &opts).unwrap();
        assert_eq!(
            brief(&registry, "structwidget_1a1").as_deref(),
            Some("From \\f[B]widget_open\\f[R](3).")
        );
        let widget = registry.lookup("structwidget").unwrap();
        let open = registry.lookup("widget_8h_1a1").unwrap();
        assert_eq!(registry.get(widget).referenced, vec![open]);
    }
}
