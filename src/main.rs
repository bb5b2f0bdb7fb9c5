//! manos: man page generator for C projects documented with Doxygen.
//!
//! Reads the XML directory Doxygen produced (`GENERATE_XML = YES`) and
//! writes one page per function, macro, type, variable and header:
//!
//! `manos -o man/man3 build/xml`

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use manos::{xml, IncludePath, Options, Source};

#[derive(Parser)]
#[command(name = "manos", version, about = "Man page generator for C projects")]
struct Cli {
    /// Directory containing Doxygen's XML output
    xml_dir: PathBuf,

    /// Directory to write the generated man pages to
    #[arg(short = 'o', long, default_value = "man", value_name = "PATH")]
    output: PathBuf,

    /// XML files whose name matches this pattern are excluded
    #[arg(short = 'f', long, value_name = "REGEX")]
    filter: Option<String>,

    /// Suppress warnings
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Include a PARAMETERS section in function and macro pages
    #[arg(long)]
    with_parameters: bool,

    /// Include a FIELDS section in structure and union pages
    #[arg(long)]
    with_fields: bool,

    /// Include subsection titles in detailed descriptions
    #[arg(long)]
    with_subsections: bool,

    /// Keep bold, italic and underline styles
    #[arg(long)]
    with_styles: bool,

    /// Text at the top of every page; defaults to PROJECT_NAME
    #[arg(long, value_name = "TEXT")]
    topic: Option<String>,

    /// Manual section, 1-9
    #[arg(long, default_value_t = 3, value_name = "NUMBER")]
    section: u8,

    /// Text centered at the bottom
    #[arg(long, value_name = "TEXT")]
    footer_middle: Option<String>,

    /// Text at the bottom left
    #[arg(long, value_name = "TEXT")]
    footer_inside: Option<String>,

    /// Text centered in the header
    #[arg(long, value_name = "TEXT")]
    header_middle: Option<String>,

    /// Fill the footer with today's date and the project version
    #[arg(long)]
    autofill: bool,

    /// File whose content is written before every page
    #[arg(long, value_name = "FILE")]
    preamble: Option<PathBuf>,

    /// File whose content is written after every page
    #[arg(long, value_name = "FILE")]
    epilogue: Option<PathBuf>,

    /// How `#include` lines name headers
    #[arg(long, value_enum, default_value = "short")]
    include_path: IncludeStyle,
}

#[derive(Clone, Copy, ValueEnum)]
enum IncludeStyle {
    Short,
    Full,
}

impl From<IncludeStyle> for IncludePath {
    fn from(style: IncludeStyle) -> Self {
        match style {
            IncludeStyle::Short => IncludePath::Short,
            IncludeStyle::Full => IncludePath::Full,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let options = options(&cli)?;
    let filter = cli
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --filter pattern")?;

    let files = xml_files(&cli.xml_dir, filter.as_ref())?;
    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let root = xml::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        sources.push(Source::new(path.display().to_string(), root));
    }

    let pages = manos::generate(&sources, &options)?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;
    for page in &pages {
        let out_path = cli.output.join(&page.file_name);
        fs::write(&out_path, &page.content)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        log::debug!("wrote {}", out_path.display());
    }

    Ok(())
}

/// Diagnostics go to stderr as `warning: <message>`; `RUST_LOG` overrides
/// the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| {
            let label = match record.level() {
                log::Level::Warn => "warning".to_string(),
                level => level.as_str().to_lowercase(),
            };
            writeln!(buf, "{label}: {}", record.args())
        })
        .init();
}

fn options(cli: &Cli) -> Result<Options> {
    Ok(Options {
        subsections: cli.with_subsections,
        preserve_styles: cli.with_styles,
        function_parameters: cli.with_parameters,
        composite_fields: cli.with_fields,
        section: cli.section,
        topic: cli.topic.clone(),
        footer_middle: cli.footer_middle.clone(),
        footer_inside: cli.footer_inside.clone(),
        header_middle: cli.header_middle.clone(),
        autofill: cli.autofill,
        preamble: read_optional(cli.preamble.as_deref())?,
        epilogue: read_optional(cli.epilogue.as_deref())?,
        include_path: cli.include_path.into(),
        ..Options::default()
    })
}

fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not find: {}", path.display()))?;
    Ok(Some(text.trim().to_string()))
}

/// Every `*.xml` file in `dir` whose name does not match `filter`, sorted.
fn xml_files(dir: &Path, filter: Option<&Regex>) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.xml");
    let pattern = pattern.to_string_lossy();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {pattern}"))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| !is_excluded(p, filter))
        .collect();
    if files.is_empty() {
        anyhow::bail!("no XML files found in {}", dir.display());
    }
    files.sort();
    Ok(files)
}

fn is_excluded(path: &Path, filter: Option<&Regex>) -> bool {
    let Some(filter) = filter else {
        return false;
    };
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    filter.is_match(&name)
}
