//! CSS class allowlist and class-string hygiene for gate markup.

use std::collections::HashSet;

use thiserror::Error;

/// Every class token the gate renderer is allowed to emit.
///
/// The downstream sanitizer schema must contain at least these names.
pub const ALLOWED_CLASSES: [&str; 18] = [
    "glass-card",
    "p-6",
    "border-l-4",
    "border-orange-500",
    "mb-8",
    "mb-4",
    "mb-2",
    "mt-6",
    "mt-4",
    "text-xl",
    "font-bold",
    "text-text-primary",
    "font-semibold",
    "text-text-secondary",
    "text-text-tertiary",
    "text-sm",
    "italic",
    "ml-4",
];

/// Returns true when `token` is in [`ALLOWED_CLASSES`].
pub fn is_allowed_class(token: &str) -> bool {
    ALLOWED_CLASSES.contains(&token)
}

/// Normalizes a class string.
///
/// Splits on runs of whitespace, drops empty tokens, removes duplicates while
/// keeping the first occurrence, and joins the result with single spaces.
pub fn normalize_class_name(classes: &str) -> String {
    let mut seen = HashSet::new();
    classes
        .split_whitespace()
        .filter(|token| seen.insert(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true iff every class is in the allowlist. An empty list is valid.
pub fn validate_allowed_classes<S: AsRef<str>>(classes: &[S]) -> bool {
    classes.iter().all(|class| is_allowed_class(class.as_ref()))
}

/// A class attribute that breaks the hygiene rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassViolation {
    /// Token outside the allowlist.
    #[error("class `{0}` is not in the allowlist")]
    NotAllowed(String),
    /// Token repeated within one attribute.
    #[error("class `{0}` appears more than once in one attribute")]
    Duplicate(String),
    /// Leading, trailing, or doubled whitespace.
    #[error("class attribute `{0}` is not whitespace-normalized")]
    Whitespace(String),
}

/// Iterates the values of every `class="..."` attribute in `markup`.
pub fn class_attributes(markup: &str) -> impl Iterator<Item = &str> {
    const NEEDLE: &str = "class=\"";
    let mut rest = markup;
    std::iter::from_fn(move || {
        let start = rest.find(NEEDLE)? + NEEDLE.len();
        let len = rest[start..].find('"')?;
        let value = &rest[start..start + len];
        rest = &rest[start + len + 1..];
        Some(value)
    })
}

/// Checks every class attribute in `markup` against the allowlist and the
/// normalization rules, returning the first violation found.
pub fn audit_markup_classes(markup: &str) -> Result<(), ClassViolation> {
    for value in class_attributes(markup) {
        if value.split(' ').any(str::is_empty)
            || value.contains(|c: char| c.is_whitespace() && c != ' ')
        {
            return Err(ClassViolation::Whitespace(value.to_string()));
        }
        let mut seen = HashSet::new();
        for token in value.split(' ') {
            if !is_allowed_class(token) {
                return Err(ClassViolation::NotAllowed(token.to_string()));
            }
            if !seen.insert(token) {
                return Err(ClassViolation::Duplicate(token.to_string()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_and_duplicates() {
        assert_eq!(
            normalize_class_name("  mb-4   mb-4\tmt-6 mb-4 "),
            "mb-4 mt-6"
        );
        assert_eq!(normalize_class_name(""), "");
        assert_eq!(normalize_class_name("   "), "");
    }

    #[test]
    fn allowlist_accepts_known_classes() {
        assert!(validate_allowed_classes(&[
            "glass-card",
            "p-6",
            "border-l-4",
            "text-text-primary"
        ]));
    }

    #[test]
    fn allowlist_rejects_unknown_classes() {
        assert!(!validate_allowed_classes(&[
            "custom-class",
            "text-xl",
            "not-in-allowlist"
        ]));
    }

    #[test]
    fn empty_class_list_is_valid() {
        let empty: [&str; 0] = [];
        assert!(validate_allowed_classes(&empty));
    }

    #[test]
    fn allowlist_has_no_duplicates() {
        let unique: HashSet<_> = ALLOWED_CLASSES.iter().collect();
        assert_eq!(unique.len(), ALLOWED_CLASSES.len());
    }

    #[test]
    fn finds_class_attribute_values() {
        let markup = r#"<div class="mb-4"><p class="italic text-sm">x</p></div>"#;
        let values: Vec<_> = class_attributes(markup).collect();
        assert_eq!(values, vec!["mb-4", "italic text-sm"]);
    }

    #[test]
    fn audit_reports_violations() {
        assert_eq!(audit_markup_classes(r#"<p class="mb-4 mt-6">"#), Ok(()));
        assert_eq!(
            audit_markup_classes(r#"<p class="mb-4 evil">"#),
            Err(ClassViolation::NotAllowed("evil".into()))
        );
        assert_eq!(
            audit_markup_classes(r#"<p class="mb-4 mb-4">"#),
            Err(ClassViolation::Duplicate("mb-4".into()))
        );
        assert_eq!(
            audit_markup_classes(r#"<p class="mb-4 ">"#),
            Err(ClassViolation::Whitespace("mb-4 ".into()))
        );
    }
}
