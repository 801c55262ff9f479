//! Renders the body of a validated gate into a styled HTML fragment.

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::classes::normalize_class_name;
use crate::escape::escape_html;

const CONTAINER_CLASS: &str = "glass-card p-6 border-l-4 border-orange-500 mb-8";
const HEADING_CLASS: &str = "text-xl font-bold text-text-primary mb-4";
const SECTION_LABEL_CLASS: &str = "font-semibold text-text-primary mb-2";
const BULLET_CLASS: &str = "text-text-secondary ml-4";
const CLOSING_NOTE_CLASS: &str = "text-sm text-text-tertiary mt-4 italic";
const PARAGRAPH_CLASS: &str = "text-text-secondary";

const HEADING_PREFIX: &str = "### ";
const BULLET_PREFIX: &str = "- ";
const CLOSING_NOTE_PREFIX: &str = "Past this point,";

/// Failure while writing a gate's markup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying formatter reported an error.
    #[error("failed to write gate markup: {0}")]
    Write(#[from] fmt::Error),
}

/// One of the two recognized section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLabel {
    /// `**Continue local debugging only if:**`
    Continue,
    /// `**Stop here if any apply:**`
    Stop,
}

impl SectionLabel {
    /// Parses a trimmed line that matches a label verbatim.
    pub fn parse(trimmed: &str) -> Option<Self> {
        match trimmed {
            "**Continue local debugging only if:**" => Some(SectionLabel::Continue),
            "**Stop here if any apply:**" => Some(SectionLabel::Stop),
            _ => None,
        }
    }

    /// Label text without the bold markers.
    pub fn text(self) -> &'static str {
        match self {
            SectionLabel::Continue => "Continue local debugging only if:",
            SectionLabel::Stop => "Stop here if any apply:",
        }
    }

    fn wrapper_class(self) -> &'static str {
        match self {
            SectionLabel::Continue => "mb-4",
            SectionLabel::Stop => "mt-6",
        }
    }
}

/// Classification of a single gate body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentElement<'a> {
    /// `### ` heading; holds the text after the prefix.
    Heading(&'a str),
    /// One of the recognized section labels.
    Section(SectionLabel),
    /// `- ` bullet; holds the text after the prefix.
    Bullet(&'a str),
    /// `Past this point, ... .`; holds the whole line.
    ClosingNote(&'a str),
    /// Anything else that is not blank.
    Paragraph(&'a str),
    /// Empty or whitespace-only line.
    Blank,
}

impl<'a> ContentElement<'a> {
    /// Classifies `line` after trimming it.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ContentElement::Blank;
        }
        if let Some(text) = trimmed.strip_prefix(HEADING_PREFIX) {
            return ContentElement::Heading(text);
        }
        if let Some(label) = SectionLabel::parse(trimmed) {
            return ContentElement::Section(label);
        }
        if let Some(text) = trimmed.strip_prefix(BULLET_PREFIX) {
            return ContentElement::Bullet(text);
        }
        if trimmed.starts_with(CLOSING_NOTE_PREFIX) && trimmed.ends_with('.') {
            return ContentElement::ClosingNote(trimmed);
        }
        ContentElement::Paragraph(trimmed)
    }
}

/// Accumulates markup lines joined by `\n`.
struct Fragment {
    out: String,
}

impl Fragment {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
        }
    }

    fn new_line(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    fn open(&mut self, tag: &str, class: &str) -> fmt::Result {
        self.new_line();
        write!(self.out, "<{tag} class=\"{}\">", normalize_class_name(class))
    }

    fn element(&mut self, tag: &str, class: &str, text: &str) -> fmt::Result {
        self.open(tag, class)?;
        write!(self.out, "{}</{tag}>", escape_html(text))
    }

    fn close(&mut self, tag: &str) -> fmt::Result {
        self.new_line();
        write!(self.out, "</{tag}>")
    }
}

/// Renders the body lines of one gate.
///
/// Section wrappers are opened but never closed; the fragment is a flat
/// sequence ending with the container's closing tag.
pub fn render_gate(lines: &[&str]) -> Result<String, RenderError> {
    let capacity = lines.iter().map(|line| line.len() + 48).sum::<usize>() + 96;
    let mut fragment = Fragment::with_capacity(capacity);

    fragment.open("div", CONTAINER_CLASS)?;

    for line in lines {
        match ContentElement::classify(line) {
            ContentElement::Blank => {}
            ContentElement::Heading(text) => fragment.element("h3", HEADING_CLASS, text)?,
            ContentElement::Section(label) => {
                fragment.open("div", label.wrapper_class())?;
                fragment.element("p", SECTION_LABEL_CLASS, label.text())?;
            }
            ContentElement::Bullet(text) => fragment.element("div", BULLET_CLASS, text)?,
            ContentElement::ClosingNote(text) => {
                fragment.element("p", CLOSING_NOTE_CLASS, text)?
            }
            ContentElement::Paragraph(text) => fragment.element("p", PARAGRAPH_CLASS, text)?,
        }
    }

    fragment.close("div")?;
    Ok(fragment.out)
}
