#![deny(missing_docs)]
//! Node.js bindings that surface gatemark's Rust implementation.

use gatemark_core::{GateError, load_post, rewrite_gate_blocks};
use gatemark_sanitize::{DEFAULT_SCHEMA, SanitizeSchema};
use napi::{Error, Status};
use napi_derive::napi;

/// Batch processing types and functions.
pub mod batch;
/// NAPI-exposed data structures.
pub mod types;

pub use batch::*;
pub use types::*;

fn to_napi_error(err: GateError) -> Error {
    match err {
        GateError::Frontmatter(e) => Error::new(Status::InvalidArg, e.to_string()),
        other => Error::from_reason(other.to_string()),
    }
}

/// Rewrites every decision gate, returning the input unchanged when any gate
/// is malformed.
#[napi(js_name = "preprocessGateBlocks")]
pub fn preprocess_gate_blocks(content: String) -> String {
    gatemark_core::preprocess_gate_blocks(&content)
}

/// Like `preprocessGateBlocks`, but also reports the gate count and why a
/// document was rejected.
#[napi(js_name = "rewriteGateBlocks")]
pub fn rewrite_gate_blocks_napi(content: String) -> GateRewriteResult {
    match rewrite_gate_blocks(&content) {
        Ok(rewrite) => GateRewriteResult {
            content: rewrite.content,
            gate_count: rewrite.gate_count as u32,
            error: None,
            error_line: None,
        },
        Err(err) => GateRewriteResult {
            error_line: err.location().map(|loc| loc.line as u32),
            error: Some(err.to_string()),
            content,
            gate_count: 0,
        },
    }
}

/// Returns true when every class is in the gate allowlist.
#[napi(js_name = "validateAllowedClasses")]
pub fn validate_allowed_classes(classes: Vec<String>) -> bool {
    gatemark_core::validate_allowed_classes(&classes[..])
}

/// Splits, de-duplicates, and re-joins a class string.
#[napi(js_name = "normalizeClassName")]
pub fn normalize_class_name(classes: String) -> String {
    gatemark_core::normalize_class_name(&classes)
}

/// Escapes `& < > " '` for insertion into HTML.
#[napi(js_name = "escapeHtml")]
pub fn escape_html(text: String) -> String {
    gatemark_core::escape_html(&text).into_owned()
}

/// Sanitizes HTML against the default schema or a JSON schema override.
#[napi(js_name = "sanitizeHtml")]
pub fn sanitize_html(html: String, schema_json: Option<String>) -> napi::Result<String> {
    let custom = schema_json
        .as_deref()
        .map(SanitizeSchema::from_json)
        .transpose()
        .map_err(|e| Error::new(Status::InvalidArg, e.to_string()))?;
    let schema = custom.as_ref().unwrap_or(&*DEFAULT_SCHEMA);
    gatemark_sanitize::sanitize_html(&html, schema).map_err(|e| Error::from_reason(e.to_string()))
}

/// Splits frontmatter and preprocesses the body of a post.
#[napi(js_name = "loadPost")]
pub fn load_post_napi(source: String) -> napi::Result<LoadedPostResult> {
    let post = load_post(&source).map_err(to_napi_error)?;
    let meta = serde_json::to_value(&post.meta).map_err(|e| Error::from_reason(e.to_string()))?;
    Ok(LoadedPostResult {
        meta,
        body: post.body,
        gate_count: post.gate_count as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_reports_rejection_line() {
        let result = rewrite_gate_blocks_napi(":::decision-gate\n:::decision-gate\n:::".into());
        assert_eq!(result.error_line, Some(2));
        assert_eq!(result.gate_count, 0);
        assert_eq!(result.content, ":::decision-gate\n:::decision-gate\n:::");
    }

    #[test]
    fn sanitize_with_schema_override() {
        let out = sanitize_html(
            r#"<p class="italic mb-4">x</p>"#.into(),
            Some(r#"{"classNames": ["mb-4"]}"#.into()),
        )
        .unwrap();
        assert!(out.contains(r#"class="mb-4""#));
        assert!(sanitize_html("<p>x</p>".into(), Some("not json".into())).is_err());
    }

    #[test]
    fn load_post_serializes_meta() {
        let post = load_post_napi("---\ntitle: Guide\nseoKeywords: [a]\n---\nBody".into()).unwrap();
        assert_eq!(post.meta["title"], "Guide");
        assert_eq!(post.meta["seoKeywords"][0], "a");
        assert_eq!(post.body, "Body");
    }

    #[test]
    fn class_helpers() {
        assert!(validate_allowed_classes(vec!["mb-4".into(), "ml-4".into()]));
        assert!(!validate_allowed_classes(vec!["custom".into()]));
        assert_eq!(normalize_class_name(" a  a b ".into()), "a b");
        assert_eq!(escape_html("<'>".into()), "&lt;&#39;&gt;");
    }
}
