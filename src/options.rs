//! Run configuration shared by the builder and the page templates.

use crate::error::Error;

/// How the `#include` line names a header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IncludePath {
    /// File name only, e.g. `widget.h`.
    #[default]
    Short,
    /// The location as recorded by Doxygen, e.g. `include/widget.h`.
    Full,
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Emit `.SS` headings for `\section` and friends.
    pub subsections: bool,
    /// Keep bold, italic and underline markers in prose.
    pub preserve_styles: bool,
    /// Extract briefs with cross-reference styling suppressed.
    pub brief_suppresses_refs: bool,
    /// Emit a PARAMETERS section for functions and macros.
    pub function_parameters: bool,
    /// Emit a FIELDS section for structures and unions.
    pub composite_fields: bool,
    /// Manual section, 1-9.
    pub section: u8,
    pub topic: Option<String>,
    pub footer_middle: Option<String>,
    pub footer_inside: Option<String>,
    pub header_middle: Option<String>,
    /// Fill the footer with today's date and the project version.
    pub autofill: bool,
    /// Written verbatim before the `.TH` line of every page.
    pub preamble: Option<String>,
    /// Written verbatim after every page.
    pub epilogue: Option<String>,
    pub include_path: IncludePath,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            subsections: false,
            preserve_styles: false,
            brief_suppresses_refs: true,
            function_parameters: false,
            composite_fields: false,
            section: 3,
            topic: None,
            footer_middle: None,
            footer_inside: None,
            header_middle: None,
            autofill: false,
            preamble: None,
            epilogue: None,
            include_path: IncludePath::Short,
        }
    }
}

impl Options {
    /// Check values that clap cannot express.
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=9).contains(&self.section) {
            return Err(Error::InvalidSection {
                section: self.section,
            });
        }
        Ok(())
    }

    /// Apply the configured include style to a recorded header location.
    pub fn header_path(&self, location: &str) -> String {
        match self.include_path {
            IncludePath::Full => location.to_string(),
            IncludePath::Short => location
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or(location)
                .to_string(),
        }
    }
}
