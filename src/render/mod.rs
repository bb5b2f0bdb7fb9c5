//! Page templates: one man page per symbol that owns a page name.
//!
//! Every page shares the same skeleton (NAME, LIBRARY, SYNOPSIS,
//! DESCRIPTION, the kind-specific sections, then DEPRECATION, BUGS,
//! EXAMPLES, AUTHORS and SEE ALSO). Kind-specific layouts live in the
//! submodules.

mod function;
mod header;
mod types;

use chrono::{Datelike, NaiveDate};

use crate::error::Error;
use crate::model::{Symbol, SymbolKind};
use crate::options::Options;
use crate::registry::{Project, Registry};
use crate::roff::{Document, PARAGRAPH};

/// A rendered page, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManPage {
    /// `<page name>.<section>`
    pub file_name: String,
    pub content: String,
}

/// Render every page in the registry, in registration order.
pub fn render_pages(registry: &Registry, options: &Options) -> Result<Vec<ManPage>, Error> {
    if registry.pages().next().is_none() {
        return Ok(Vec::new());
    }
    let today = chrono::Local::now().date_naive();
    let heading = heading(&registry.project, options, today)?;

    let mut pages = Vec::new();
    for handle in registry.pages() {
        let symbol = registry.get(handle);
        let Some(page_name) = &symbol.page_name else {
            continue;
        };
        let page = Page {
            registry,
            options,
            symbol,
        };
        let body = match &symbol.kind {
            SymbolKind::Function(f) => function::function(&page, f),
            SymbolKind::Define(d) => function::define(&page, d),
            SymbolKind::Composite(c) => types::composite(&page, c),
            SymbolKind::Enum(e) => types::enumeration(&page, e),
            SymbolKind::Typedef(t) => types::typedef(&page, t),
            SymbolKind::Variable(v) => types::variable(&page, v),
            SymbolKind::Header(h) => header::header(&page, h),
            SymbolKind::Field(_)
            | SymbolKind::EnumElement { .. }
            | SymbolKind::Group
            | SymbolKind::Example => continue,
        };
        log::debug!("rendered {} page {page_name}", symbol.kind_name());
        pages.push(ManPage {
            file_name: format!("{page_name}.{}", options.section),
            content: assemble(options, &heading, &body),
        });
    }
    Ok(pages)
}

fn assemble(options: &Options, heading: &str, body: &Document) -> String {
    let mut content = String::new();
    if let Some(preamble) = &options.preamble {
        content.push_str(preamble.trim_end());
        content.push('\n');
    }
    content.push_str(heading);
    content.push('\n');
    content.push_str(&body.to_string());
    if let Some(epilogue) = &options.epilogue {
        content.push('\n');
        content.push_str(epilogue.trim_end());
    }
    content.push('\n');
    content
}

// -- Heading ------------------------------------------------------------------

/// Build the `.TH` line. Empty middle arguments are written as `""`; empty
/// trailing arguments are omitted.
fn heading(project: &Project, options: &Options, today: NaiveDate) -> Result<String, Error> {
    let topic = match (&options.topic, &project.name) {
        (Some(topic), _) => topic.clone(),
        (None, Some(name)) => name.to_uppercase(),
        (None, None) => return Err(Error::MissingProjectName),
    };

    let footer_middle = match &options.footer_middle {
        Some(text) => Some(text.clone()),
        None if options.autofill => Some(ordinal_date(today)),
        None => None,
    };
    let footer_inside = match (&options.footer_inside, &project.version) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(version)) if options.autofill => {
            let name = project.name.as_deref().unwrap_or(&topic);
            Some(format!("{name} {version}"))
        }
        _ => None,
    };

    let mut params = vec![
        Some(topic),
        Some(options.section.to_string()),
        footer_middle,
        footer_inside,
        options.header_middle.clone(),
    ];
    while params.last().is_some_and(Option::is_none) {
        params.pop();
    }

    let quoted: Vec<String> = params
        .iter()
        .map(|p| format!("\"{}\"", p.as_deref().unwrap_or_default()))
        .collect();
    Ok(format!(".TH {}", quoted.join(" ")))
}

/// Format a date like `Oct 16th 2026`.
fn ordinal_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = if (11..=13).contains(&(day % 100)) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{} {day}{suffix} {}", date.format("%b"), date.year())
}

// -- Shared sections ----------------------------------------------------------

/// Everything a template needs to render one symbol's page.
struct Page<'a> {
    registry: &'a Registry,
    options: &'a Options,
    symbol: &'a Symbol,
}

impl Page<'_> {
    /// NAME and LIBRARY.
    fn introduction(&self, doc: &mut Document) {
        doc.push_macro("SH", Some("NAME"));
        match &self.symbol.brief {
            Some(brief) => doc.push_text(&format!("{} \\- {}", self.symbol.name, briefify(brief))),
            None => doc.push_text(&self.symbol.name),
        }

        if let Some(brief) = &self.registry.project.brief {
            doc.push_macro("SH", Some("LIBRARY"));
            doc.push_text(brief.trim());
        }
    }

    /// Open the SYNOPSIS block with the `#include` line. The caller adds the
    /// declaration and closes the block with `.fi`.
    fn synopsis(&self, doc: &mut Document) {
        doc.push_macro("SH", Some("SYNOPSIS"));
        doc.push_macro("nf", None);
        let header = self.symbol.header.as_deref().unwrap_or_default();
        doc.push_macro("B", Some(&format!("#include <{header}>")));
        doc.push_macro(PARAGRAPH, None);
    }

    fn description(&self, doc: &mut Document) {
        if let Some(description) = &self.symbol.description {
            doc.push_macro("SH", Some("DESCRIPTION"));
            doc.append(description.clone());
        } else if let Some(brief) = &self.symbol.brief {
            doc.push_macro("SH", Some("DESCRIPTION"));
            doc.push_text(brief);
        }
    }

    /// PARAMETERS (when enabled) and RETURN VALUE.
    fn parameters(&self, doc: &mut Document, parameters: Option<&Document>, returns: Option<&Document>) {
        if let Some(parameters) = parameters.filter(|_| self.options.function_parameters) {
            doc.push_macro("SH", Some("PARAMETERS"));
            doc.append(parameters.clone());
        }
        if let Some(returns) = returns {
            doc.push_macro("SH", Some("RETURN VALUE"));
            doc.append(returns.clone());
        }
    }

    /// DEPRECATION, BUGS, EXAMPLES, AUTHORS and SEE ALSO.
    fn closing(&self, doc: &mut Document) {
        let symbol = self.symbol;
        separated(doc, "DEPRECATION", symbol.deprecated.iter().map(Document::simplify));
        separated(doc, "BUGS", symbol.bugs.iter().map(Document::simplify));

        let examples = symbol.examples.iter().map(|&handle| {
            let example = self.registry.get(handle);
            match (&example.description, &example.brief) {
                (Some(description), _) => description.simplify(),
                (None, Some(brief)) => {
                    let mut doc = Document::new();
                    doc.push_text(brief);
                    doc
                }
                (None, None) => Document::new(),
            }
        });
        separated(doc, "EXAMPLES", examples);
        separated(doc, "AUTHORS", symbol.authors.iter().map(Document::simplify));

        if !symbol.referenced.is_empty() {
            doc.push_macro("SH", Some("SEE ALSO"));
            let last = symbol.referenced.len() - 1;
            for (index, &handle) in symbol.referenced.iter().enumerate() {
                let trailing = if index < last { "," } else { "" };
                let name = &self.registry.get(handle).name;
                let section = self.options.section;
                doc.push_macro("BR", Some(&format!("{name} ({section}){trailing}")));
            }
        }
    }
}

/// A titled section whose items are separated by paragraph breaks.
fn separated(doc: &mut Document, title: &str, items: impl Iterator<Item = Document>) {
    let mut items = items.peekable();
    if items.peek().is_none() {
        return;
    }
    doc.push_macro("SH", Some(title));
    for (index, item) in items.enumerate() {
        if index > 0 {
            doc.push_macro(PARAGRAPH, None);
        }
        doc.append(item);
    }
}

/// Indent a description under a `.TP` tag.
fn indented(description: &Document) -> Document {
    let mut doc = description.clone();
    doc.rename_macros(PARAGRAPH, "IP");
    doc
}

/// Join a type and a declarator, without a space after a pointer star.
fn declaration(type_name: &str, declarator: &str) -> String {
    if type_name.ends_with('*') {
        format!("{type_name}{declarator}")
    } else {
        format!("{type_name} {declarator}")
    }
}

/// Lowercase the first letter unless it starts an acronym.
fn lowerify(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && !second.is_uppercase() => {
            first.to_lowercase().chain(text[first.len_utf8()..].chars()).collect()
        }
        _ => text.to_string(),
    }
}

/// Shape a brief for the NAME line.
fn briefify(brief: &str) -> String {
    lowerify(brief).trim_end_matches('.').to_string()
}
