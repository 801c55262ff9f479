use std::collections::BTreeSet;

use gatemark_core::{ALLOWED_CLASSES, normalize_class_name};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::SanitizeError;

const DEFAULT_TAGS: &[&str] = &[
    "a", "blockquote", "br", "code", "del", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "li", "ol", "p", "pre", "span", "strong", "table", "tbody", "td", "th", "thead", "tr", "ul",
];
const DEFAULT_STRIP: &[&str] = &["script", "style"];
/// Raw-text, RCDATA, and foreign elements. Their content is never tokenized
/// as markup, so unwrapping them would turn inert text into live tags. They
/// are removed whatever the schema says.
const ALWAYS_STRIP: &[&str] = &[
    "iframe", "math", "noembed", "noframes", "noscript", "plaintext", "script", "style", "svg",
    "template", "textarea", "title", "xmp",
];
const DEFAULT_ATTRIBUTES: &[&str] = &["class", "href", "title"];
const DEFAULT_PROTOCOLS: &[&str] = &["http", "https", "mailto"];

/// Shared default schema.
pub static DEFAULT_SCHEMA: Lazy<SanitizeSchema> = Lazy::new(SanitizeSchema::default);

/// What the sanitizer lets through. Missing JSON fields fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizeSchema {
    /// Tags kept as-is. Other tags are unwrapped, keeping their children.
    pub tag_names: BTreeSet<String>,
    /// Tags removed together with their content.
    pub strip: BTreeSet<String>,
    /// Attribute names kept on allowed tags.
    pub attributes: BTreeSet<String>,
    /// Class tokens kept inside `class` attributes.
    pub class_names: BTreeSet<String>,
    /// URL schemes accepted in `href`. Relative URLs are always accepted.
    pub protocols: BTreeSet<String>,
}

fn owned_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Default for SanitizeSchema {
    fn default() -> Self {
        Self {
            tag_names: owned_set(DEFAULT_TAGS),
            strip: owned_set(DEFAULT_STRIP),
            attributes: owned_set(DEFAULT_ATTRIBUTES),
            class_names: owned_set(&ALLOWED_CLASSES),
            protocols: owned_set(DEFAULT_PROTOCOLS),
        }
    }
}

impl SanitizeSchema {
    /// Loads a schema from JSON.
    pub fn from_json(json: &str) -> Result<Self, SanitizeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Gate classes this schema would strip.
    pub fn missing_gate_classes(&self) -> Vec<&'static str> {
        ALLOWED_CLASSES
            .iter()
            .copied()
            .filter(|class| !self.class_names.contains(*class))
            .collect()
    }

    /// True when every class the gate renderer emits survives sanitizing.
    pub fn covers_gate_allowlist(&self) -> bool {
        self.missing_gate_classes().is_empty()
    }

    /// Whether `tag` is kept.
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tag_names.contains(tag)
    }

    /// Whether `tag` is removed with its content.
    pub fn strips(&self, tag: &str) -> bool {
        ALWAYS_STRIP.contains(&tag) || self.strip.contains(tag)
    }

    /// Whether attribute `name` is kept.
    pub fn allows_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Whether `url` is relative or uses an allowed scheme.
    ///
    /// `url` is the raw attribute text: entities are decoded and ASCII
    /// control characters (tab and newline included) removed before the
    /// scheme is read, as a browser would.
    pub fn allows_url(&self, url: &str) -> bool {
        let decoded = html_escape::decode_html_entities(url);
        let url: String = decoded
            .trim_start_matches(|c: char| c == ' ' || c.is_ascii_control())
            .chars()
            .filter(|c| !c.is_ascii_control())
            .collect();
        match url.find([':', '/', '?', '#']) {
            Some(index) if url[index..].starts_with(':') => self
                .protocols
                .contains(&url[..index].to_ascii_lowercase()),
            _ => true,
        }
    }

    /// Keeps allowed class tokens; `None` when nothing is left.
    pub fn filter_classes(&self, value: &str) -> Option<String> {
        let kept: Vec<&str> = value
            .split_whitespace()
            .filter(|token| self.class_names.contains(*token))
            .collect();
        let normalized = normalize_class_name(&kept.join(" "));
        (!normalized.is_empty()).then_some(normalized)
    }
}
