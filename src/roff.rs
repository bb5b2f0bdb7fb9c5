//! Intermediate roff document model, format-agnostic until serialized.
//!
//! A [`Document`] is an ordered list of entries: prose runs, literal lines and
//! macros. Documents are built incrementally while walking the Doxygen tree,
//! normalized with [`Document::simplify`] and turned into man(7) markup with
//! `to_string()`.

use crate::sentence::segment;
use std::fmt;

/// The paragraph macro. It is implied at the start of every document.
pub const PARAGRAPH: &str = "PP";

/// The "end hyperlink" macro, which accepts trailing punctuation.
pub const URL_END: &str = "UE";

/// A single document entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Prose: segmented into sentences and escaped when serialized.
    Text(String),
    /// One verbatim line, e.g. a line of source code.
    Literal(String),
    /// A structural macro such as `.PP` or `.SH NAME`.
    Macro {
        name: String,
        argument: Option<String>,
    },
}

impl Entry {
    pub fn is_macro(&self, command: &str) -> bool {
        matches!(self, Entry::Macro { name, .. } if name == command)
    }
}

/// An ordered sequence of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every entry is prose (vacuously true when empty).
    pub fn is_text(&self) -> bool {
        self.entries.iter().all(|e| matches!(e, Entry::Text(_)))
    }

    pub fn push_text(&mut self, text: &str) {
        self.entries.push(Entry::Text(escape(text)));
    }

    /// Append verbatim content; every line becomes its own literal entry so a
    /// literal never carries an embedded line break.
    pub fn push_literal(&mut self, text: &str) {
        for line in text.split('\n') {
            self.entries.push(Entry::Literal(escape(line)));
        }
    }

    pub fn push_macro(&mut self, name: &str, argument: Option<&str>) {
        debug_assert!(!name.starts_with('.'), "omit the dot when appending a macro");
        self.entries.push(Entry::Macro {
            name: name.to_string(),
            argument: argument.map(str::to_string),
        });
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn append(&mut self, other: Document) {
        self.entries.extend(other.entries);
    }

    pub fn retain(&mut self, keep: impl FnMut(&Entry) -> bool) {
        self.entries.retain(keep);
    }

    /// Rename every occurrence of macro `from` to `to`.
    pub fn rename_macros(&mut self, from: &str, to: &str) {
        for entry in &mut self.entries {
            if let Entry::Macro { name, .. } = entry {
                if name == from {
                    *name = to.to_string();
                }
            }
        }
    }

    /// Keep only prose entries.
    pub fn into_text_only(mut self) -> Self {
        self.retain(|e| matches!(e, Entry::Text(_)));
        self
    }

    /// Produce the minimal equivalent document.
    ///
    /// Blank prose is dropped, leading and trailing paragraph breaks are
    /// removed and runs of paragraph breaks collapse into one.
    pub fn simplify(&self) -> Document {
        let mut keep: Vec<Entry> = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            match entry {
                Entry::Text(content) if content.trim().is_empty() => {}
                Entry::Macro { name, .. } if name == PARAGRAPH => {
                    let redundant = match keep.last() {
                        None => true,
                        Some(prev) => prev.is_macro(PARAGRAPH),
                    };
                    if !redundant {
                        keep.push(entry.clone());
                    }
                }
                _ => keep.push(entry.clone()),
            }
        }

        while keep.last().is_some_and(|e| e.is_macro(PARAGRAPH)) {
            keep.pop();
        }

        Document { entries: keep }
    }

    /// Coalesce neighboring prose so segmentation sees whole sentences, and
    /// move punctuation that trails a hyperlink onto the `.UE` macro.
    fn serializable(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = Vec::new();
        let mut blob = String::new();

        for entry in self.simplify().entries {
            match entry {
                Entry::Text(content) => blob.push_str(&content),
                other => {
                    if !blob.is_empty() {
                        entries.push(Entry::Text(std::mem::take(&mut blob)));
                    }
                    entries.push(other);
                }
            }
        }
        if !blob.is_empty() {
            entries.push(Entry::Text(blob));
        }

        for i in 1..entries.len() {
            let (head, tail) = entries.split_at_mut(i);
            let Some(Entry::Macro { name, argument }) = head.last_mut() else {
                continue;
            };
            if name.as_str() != URL_END {
                continue;
            }
            let content = match &mut tail[0] {
                Entry::Text(c) | Entry::Literal(c) => c,
                Entry::Macro { .. } => continue,
            };
            let punctuation: String = content
                .chars()
                .take_while(|c| matches!(c, '.' | '!' | '?' | ','))
                .collect();
            if !punctuation.is_empty() {
                argument.get_or_insert_with(String::new).push_str(&punctuation);
                content.drain(..punctuation.len());
            }
        }

        entries
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        let mut prev: Option<&Entry> = None;
        let entries = self.serializable();

        for curr in &entries {
            match curr {
                Entry::Macro { name, argument } => {
                    // Macros always sit on their own line.
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push('.');
                    text.push_str(name);
                    if let Some(arg) = argument {
                        text.push(' ');
                        text.push_str(arg);
                    }
                }
                Entry::Literal(content) => {
                    if prev.is_some() {
                        text.push('\n');
                    }
                    text.push_str(&escape_control(&content.replace('\\', "\\\\")));
                }
                Entry::Text(content) => {
                    let sentences = segment(content);
                    if sentences.iter().all(String::is_empty) {
                        continue;
                    }
                    if prev.is_some() {
                        text.push('\n');
                    }
                    let lines: Vec<String> = sentences.iter().map(|s| escape_control(s)).collect();
                    text.push_str(&lines.join("\n"));
                }
            }
            prev = Some(curr);
        }

        f.write_str(&text)
    }
}

/// Replace typographic quotes with their ASCII counterparts.
fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// A line starting with `.` or `'` would be read as a control line.
fn escape_control(line: &str) -> String {
    if let Some(rest) = line.strip_prefix('.') {
        format!("\\[char46]{rest}")
    } else if let Some(rest) = line.strip_prefix('\'') {
        format!("\\[char39]{rest}")
    } else {
        line.to_string()
    }
}
