//! Document tree builder: walks Doxygen's description markup and produces a
//! roff [`Document`].
//!
//! Rendering reads the registry but never writes to it. Content that belongs
//! somewhere other than the prose being built (authors, bugs, parameter
//! lists, cross references) is collected in a [`Harvest`] which the caller
//! folds into the active symbol afterwards.

use crate::error::Error;
use crate::lexicon;
use crate::model::{Harvest, Symbol, SymbolId, SymbolKind};
use crate::options::Options;
use crate::registry::Registry;
use crate::roff::{Document, Entry, PARAGRAPH};
use crate::xml::{Element, Node};

/// Traversal state for one brief or description.
pub struct RenderContext<'a> {
    registry: &'a Registry,
    options: &'a Options,
    active: Option<SymbolId>,
    ignore_refs: bool,
    harvest: Harvest,
}

impl<'a> RenderContext<'a> {
    pub fn new(registry: &'a Registry, options: &'a Options, active: Option<SymbolId>) -> Self {
        Self {
            registry,
            options,
            active,
            ignore_refs: false,
            harvest: Harvest::default(),
        }
    }

    pub fn into_harvest(self) -> Harvest {
        self.harvest
    }

    fn active_symbol(&self) -> Option<&'a Symbol> {
        self.active.map(|id| self.registry.get(id))
    }

    /// Run `f` with cross-reference styling suppressed, restoring the
    /// previous setting afterwards.
    fn without_refs<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.ignore_refs;
        self.ignore_refs = true;
        let result = f(self);
        self.ignore_refs = previous;
        result
    }
}

// -- Tag classification -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Space,
    Bold,
    Italic,
    Strike,
    InlineCode,
    ParameterName,
    Paragraph,
    ParameterList,
    PassThrough,
    Ref,
    Link,
    Section(u32),
    Title,
    List { ordered: bool },
    CodeBlock,
    SimpleSect,
    XrefSect,
    Table,
    LineBreak,
    Ignored,
    Unsupported,
    Entity(&'static str),
}

impl Tag {
    fn classify(tag: &str) -> Option<Tag> {
        let kind = match tag {
            "sp" => Tag::Space,
            "bold" => Tag::Bold,
            "emphasis" | "underline" => Tag::Italic,
            "strike" => Tag::Strike,
            "computeroutput" => Tag::InlineCode,
            "parametername" => Tag::ParameterName,
            "para" => Tag::Paragraph,
            "parameterlist" => Tag::ParameterList,
            "type" | "briefdescription" | "detaileddescription" | "parameterdescription"
            | "anchor" | "highlight" => Tag::PassThrough,
            "ref" => Tag::Ref,
            "ulink" => Tag::Link,
            "title" => Tag::Title,
            "itemizedlist" => Tag::List { ordered: false },
            "orderedlist" => Tag::List { ordered: true },
            "programlisting" => Tag::CodeBlock,
            "simplesect" => Tag::SimpleSect,
            "xrefsect" => Tag::XrefSect,
            "table" => Tag::Table,
            "linebreak" => Tag::LineBreak,
            "indexentry" => Tag::Ignored,
            "emoji" | "image" | "formula" => Tag::Unsupported,
            "ndash" => Tag::Entity("\\[en]"),
            "mdash" => Tag::Entity("\\[em]"),
            other => {
                let depth = other.strip_prefix("sect")?.parse::<u32>().ok()?;
                Tag::Section(depth)
            }
        };
        Some(kind)
    }
}

// -- Entry points -------------------------------------------------------------

/// Render one element and everything below it.
pub fn render(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let tag = Tag::classify(&elem.tag).ok_or_else(|| Error::UnknownElement {
        tag: elem.tag.clone(),
    })?;

    match tag {
        Tag::Space => Ok(text(" ")),
        Tag::Bold => styled(ctx, elem, "B"),
        Tag::Italic => styled(ctx, elem, "I"),
        Tag::Strike => {
            log::warn!("ignoring \\strike command");
            render_children(ctx, elem)
        }
        Tag::InlineCode => inline_code(ctx, elem),
        Tag::ParameterName => {
            let content = render_children(ctx, elem)?;
            Ok(text(&format!("\\f[I]{content}\\f[R]")))
        }
        Tag::Paragraph => {
            let mut doc = Document::new();
            doc.push_macro(PARAGRAPH, None);
            doc.append(render_children(ctx, elem)?);
            Ok(doc)
        }
        Tag::ParameterList => parameter_list(ctx, elem),
        Tag::PassThrough => render_children(ctx, elem),
        Tag::Ref => reference(ctx, elem),
        Tag::Link => {
            let mut doc = Document::new();
            doc.push_macro("UR", elem.attr("url"));
            doc.append(render_children(ctx, elem)?);
            doc.push_macro("UE", None);
            Ok(doc)
        }
        Tag::Section(depth) => section(ctx, elem, depth),
        Tag::Title | Tag::Ignored => Ok(Document::new()),
        Tag::List { ordered } => list(ctx, elem, ordered),
        Tag::CodeBlock => ctx.without_refs(|ctx| code_block(ctx, elem)),
        Tag::SimpleSect => simple_section(ctx, elem),
        Tag::XrefSect => xref_section(ctx, elem),
        Tag::Table => Ok(table(elem)),
        Tag::LineBreak => {
            let mut doc = Document::new();
            doc.push_macro("br", None);
            Ok(doc)
        }
        Tag::Unsupported => {
            log::warn!("ignoring \\{} command", elem.tag);
            Ok(Document::new())
        }
        Tag::Entity(escape) => Ok(text(escape)),
    }
}

/// Render the children of `elem` in document order.
pub fn render_children(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let mut doc = Document::new();
    for child in &elem.children {
        match child {
            Node::Text(t) => doc.push_text(t),
            Node::Element(e) => doc.append(render(ctx, e)?),
        }
    }
    Ok(doc)
}

/// Reduce a `<briefdescription>` to a single line of prose.
///
/// Structural macros are dropped. Cross references are left unstyled when
/// [`Options::brief_suppresses_refs`] is set.
pub fn extract_brief(
    ctx: &mut RenderContext<'_>,
    elem: Option<&Element>,
) -> Result<Option<String>, Error> {
    let Some(elem) = elem else {
        return Ok(None);
    };
    let doc = if ctx.options.brief_suppresses_refs {
        ctx.without_refs(|ctx| render(ctx, elem))?
    } else {
        render(ctx, elem)?
    };
    let rendered = doc.into_text_only().to_string();
    let brief = rendered
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Ok((!brief.is_empty()).then_some(brief))
}

/// Render a `<detaileddescription>`; `None` when it has no visible content.
pub fn extract_description(
    ctx: &mut RenderContext<'_>,
    elem: Option<&Element>,
) -> Result<Option<Document>, Error> {
    let Some(elem) = elem else {
        return Ok(None);
    };
    let doc = render(ctx, elem)?;
    if doc.to_string().trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(doc.simplify()))
}

// -- Inline markup ------------------------------------------------------------

fn text(content: &str) -> Document {
    let mut doc = Document::new();
    doc.push_text(content);
    doc
}

fn styled(ctx: &mut RenderContext<'_>, elem: &Element, font: &str) -> Result<Document, Error> {
    let content = render_children(ctx, elem)?;
    if !ctx.options.preserve_styles {
        return Ok(content);
    }
    Ok(text(&format!("\\f[{font}]{content}\\f[R]")))
}

fn inline_code(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let content = ctx.without_refs(|ctx| render_children(ctx, elem))?;
    if !content.is_text() {
        return Ok(content);
    }

    let raw = content.to_string();
    let is_parameter = ctx
        .active_symbol()
        .is_some_and(|sym| sym.has_parameter(&raw));

    let styled = if is_parameter {
        format!("\\f[I]{raw}\\f[R]")
    } else if lexicon::is_known_function(&raw) {
        format!("\\f[B]{raw}\\f[R](3)")
    } else {
        format!("\\f[C]{raw}\\f[R]")
    };
    Ok(text(&styled))
}

fn reference(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let content = render_children(ctx, elem)?;
    if ctx.ignore_refs || !content.is_text() {
        return Ok(content);
    }
    let registry = ctx.registry;
    let Some(target) = elem.attr("refid").and_then(|id| registry.lookup(id)) else {
        return Ok(content);
    };

    let symbol = registry.get(target);
    let shown = content.to_string();
    let matches_name = shown == symbol.name;
    let active = ctx.active;

    match &symbol.kind {
        SymbolKind::Example => {
            if active.is_some() && !ctx.harvest.examples.contains(&target) {
                ctx.harvest.examples.push(target);
            }
            Ok(content)
        }
        SymbolKind::Function(_)
        | SymbolKind::Composite(_)
        | SymbolKind::Enum(_)
        | SymbolKind::Typedef(_)
        | SymbolKind::Define(_)
        | SymbolKind::Variable(_) => {
            ctx.harvest.reference(active, target);
            if matches_name {
                let section = ctx.options.section;
                Ok(text(&format!("\\f[B]{shown}\\f[R]({section})")))
            } else {
                Ok(content)
            }
        }
        SymbolKind::EnumElement { parent } => {
            ctx.harvest.reference(active, *parent);
            Ok(italic_if(matches_name, content, &shown))
        }
        SymbolKind::Field(field) => {
            ctx.harvest.reference(active, field.parent);
            Ok(italic_if(matches_name, content, &shown))
        }
        SymbolKind::Header(_) | SymbolKind::Group => Ok(content),
    }
}

fn italic_if(matches: bool, content: Document, shown: &str) -> Document {
    if matches {
        text(&format!("\\f[I]{shown}\\f[R]"))
    } else {
        content
    }
}

// -- Block structure ----------------------------------------------------------

fn section(ctx: &mut RenderContext<'_>, elem: &Element, depth: u32) -> Result<Document, Error> {
    if depth > 1 {
        log::warn!("flattening subsections");
    }
    let mut doc = Document::new();
    if ctx.options.subsections {
        let title = capitalize(&crate::xml::text_of(elem.find("title")));
        doc.push_macro("SS", Some(&title));
    }
    doc.append(render_children(ctx, elem)?);
    Ok(doc)
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn list(ctx: &mut RenderContext<'_>, elem: &Element, ordered: bool) -> Result<Document, Error> {
    let mut doc = Document::new();
    doc.push_macro("RS", None);

    for (index, item) in elem.elements().enumerate() {
        if item.tag != "listitem" {
            return Err(Error::UnexpectedElement {
                parent: elem.tag.clone(),
                tag: item.tag.clone(),
            });
        }
        let marker = if ordered {
            let number = (index + 1).to_string();
            format!("{number}. {}", number.len() + 2)
        } else {
            "\\[bu] 2".to_string()
        };
        doc.push_macro("IP", Some(&marker));

        // An item's own paragraph breaks would push its text below the marker.
        let mut body = render_children(ctx, item)?;
        body.retain(|e| !e.is_macro(PARAGRAPH));
        doc.append(body);
    }

    doc.push_macro("RE", None);
    Ok(doc)
}

fn code_block(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let mut doc = Document::new();
    doc.push_macro(PARAGRAPH, None);
    doc.push_macro("in", Some("+4n"));
    doc.push_macro("EX", None);

    for line in elem.elements() {
        if line.tag != "codeline" {
            return Err(Error::UnexpectedElement {
                parent: elem.tag.clone(),
                tag: line.tag.clone(),
            });
        }
        let rendered = render_children(ctx, line)?;
        let mut source = String::new();
        for entry in rendered.entries() {
            match entry {
                Entry::Text(t) | Entry::Literal(t) => source.push_str(t),
                Entry::Macro { name, .. } => {
                    return Err(Error::UnexpectedElement {
                        parent: line.tag.clone(),
                        tag: name.clone(),
                    });
                }
            }
        }
        doc.push(Entry::Literal(source));
    }

    doc.push_macro("EE", None);
    doc.push_macro("in", None);
    doc.push_macro(PARAGRAPH, None);
    Ok(doc)
}

fn simple_section(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let kind = elem.required_attr("kind")?;
    match kind {
        "par" => render_children(ctx, elem),
        "return" => {
            let content = render_children(ctx, elem)?;
            ctx.harvest.returns = Some(content.simplify());
            Ok(Document::new())
        }
        "see" => {
            // Rendered only so references inside are recorded.
            render_children(ctx, elem)?;
            Ok(Document::new())
        }
        "since" | "note" | "warning" | "attention" => {
            log::warn!("excluding admonition from generated documentation");
            Ok(Document::new())
        }
        "author" | "authors" => {
            let content = render_children(ctx, elem)?;
            ctx.harvest.authors.push(content);
            Ok(Document::new())
        }
        other => Err(Error::UnknownAdmonition {
            kind: other.to_string(),
        }),
    }
}

fn xref_section(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let title = crate::xml::text_of(elem.find("xreftitle"));
    match title.as_str() {
        "Bug" => {
            let content = render_children(ctx, elem.required("xrefdescription")?)?;
            ctx.harvest.bugs.push(content);
        }
        "Deprecated" => {
            let content = render_children(ctx, elem.required("xrefdescription")?)?;
            ctx.harvest.deprecated.push(content);
        }
        other => log::warn!("unsupported xrefsect: {other}"),
    }
    Ok(Document::new())
}

fn parameter_list(ctx: &mut RenderContext<'_>, elem: &Element) -> Result<Document, Error> {
    let kind = elem.attr("kind").unwrap_or_default();
    if kind != "param" && kind != "retval" {
        return Ok(Document::new());
    }
    let collect_names = kind == "param"
        && ctx
            .active_symbol()
            .is_some_and(|sym| matches!(sym.kind, SymbolKind::Typedef(_)));

    let mut doc = Document::new();
    for item in elem.find_all("parameteritem") {
        let names: Vec<String> = item
            .find_all("parameternamelist")
            .flat_map(|list| list.find_all("parametername"))
            .map(Element::text_content)
            .collect();
        if collect_names {
            ctx.harvest.param_names.extend(names.iter().cloned());
        }

        doc.push_macro("TP", None);
        doc.push_literal(&names.join(", "));

        if let Some(description) = item.find("parameterdescription") {
            let mut body = render(ctx, description)?.simplify();
            body.rename_macros(PARAGRAPH, "IP");
            doc.append(body);
        }
    }

    let doc = doc.simplify();
    if kind == "param" {
        ctx.harvest.parameters = Some(doc);
    } else {
        ctx.harvest.returns = Some(doc);
    }
    Ok(Document::new())
}

fn table(elem: &Element) -> Document {
    let columns = elem
        .attr("cols")
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0);
    if columns == 0 {
        log::warn!("found table without columns");
        return Document::new();
    }

    let mut body = String::from("allbox tab(|);\n");
    body.push_str(&vec!["l"; columns].join(" "));
    body.push_str(".\n");

    let rows: Vec<&Element> = elem.find_all("row").collect();
    for (row_index, row) in rows.iter().enumerate() {
        let entries: Vec<&Element> = row.find_all("entry").collect();
        let is_heading = entries.iter().any(|e| e.attr("thead") == Some("yes"));
        let cells: Vec<String> = entries.iter().map(|e| e.text_content()).collect();

        if is_heading && row_index == 0 {
            let heading: Vec<String> = cells.iter().map(|c| format!("\\fB{c}\\fR")).collect();
            body.push_str(&heading.join("|"));
            body.push('\n');
            continue;
        }
        if is_heading {
            log::warn!("found table with multiple headings; emitting only the first");
        }

        let data: Vec<String> = cells.iter().map(|c| format!("T{{\n{c}\nT}}")).collect();
        body.push_str(&data.join("|"));
        if row_index + 1 < rows.len() {
            body.push('\n');
        }
    }

    let mut doc = Document::new();
    doc.push_macro("TS", None);
    doc.push_text(&body);
    doc.push_macro("TE", None);
    doc
}
