use gatemark_core::{GateError, is_allowed_class};
use gatemark_sanitize::{DEFAULT_SCHEMA, SanitizeSchema};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Result Types
// ============================================================================

/// Outcome of rewriting the gates in one document.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    /// Rewritten document, or the input unchanged when it was rejected.
    pub content: String,
    /// Number of gates rewritten.
    pub gate_count: usize,
    /// Why the document was left untouched, when it was.
    pub error: Option<String>,
    /// 1-indexed line the rejection points at.
    pub error_line: Option<usize>,
}

/// A post split into metadata and a preprocessed body.
#[derive(Debug, Clone, Serialize)]
pub struct LoadPostResult {
    /// Serialized frontmatter as JSON string (`null` when absent).
    pub frontmatter_json: String,
    /// Body with gates rewritten.
    pub body: String,
    /// Number of gates rewritten.
    pub gate_count: usize,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Gate API
// ============================================================================

/// Rewrites every decision gate, returning the input unchanged when any gate
/// is malformed.
#[wasm_bindgen(js_name = preprocessGateBlocks)]
pub fn preprocess_gate_blocks(content: &str) -> String {
    gatemark_core::preprocess_gate_blocks(content)
}

/// Rewrites every decision gate and reports the gate count or the rejection
/// reason.
#[wasm_bindgen(js_name = rewriteGateBlocks)]
pub fn rewrite_gate_blocks(content: &str) -> Result<JsValue, JsError> {
    let result = match gatemark_core::rewrite_gate_blocks(content) {
        Ok(rewrite) => RewriteResult {
            content: rewrite.content,
            gate_count: rewrite.gate_count,
            error: None,
            error_line: None,
        },
        Err(err) => RewriteResult {
            content: content.to_string(),
            gate_count: 0,
            error_line: err.location().map(|loc| loc.line),
            error: Some(err.to_string()),
        },
    };
    to_js(&result)
}

/// Returns true when every entry is a string in the gate allowlist.
#[wasm_bindgen(js_name = validateAllowedClasses)]
pub fn validate_allowed_classes(classes: js_sys::Array) -> bool {
    classes
        .iter()
        .all(|value| value.as_string().is_some_and(|class| is_allowed_class(&class)))
}

/// Splits, de-duplicates, and re-joins a class string.
#[wasm_bindgen(js_name = normalizeClassName)]
pub fn normalize_class_name(classes: &str) -> String {
    gatemark_core::normalize_class_name(classes)
}

/// Escapes `& < > " '` for insertion into HTML.
#[wasm_bindgen(js_name = escapeHtml)]
pub fn escape_html(text: &str) -> String {
    gatemark_core::escape_html(text).into_owned()
}

// ============================================================================
// Sanitizer & Content API
// ============================================================================

/// Sanitizes HTML. `schema` may be `undefined`/`null` for the default schema,
/// or a partial schema object (`{ classNames: [...] }`).
#[wasm_bindgen(js_name = sanitizeHtml)]
pub fn sanitize_html(html: &str, schema: JsValue) -> Result<String, JsError> {
    let custom: Option<SanitizeSchema> = if schema.is_undefined() || schema.is_null() {
        None
    } else {
        Some(
            serde_wasm_bindgen::from_value(schema)
                .map_err(|e| JsError::new(&format!("Invalid schema: {}", e)))?,
        )
    };
    let schema = custom.as_ref().unwrap_or(&*DEFAULT_SCHEMA);
    gatemark_sanitize::sanitize_html(html, schema).map_err(|e| JsError::new(&e.to_string()))
}

/// Splits frontmatter and preprocesses the body of a post.
#[wasm_bindgen(js_name = loadPost)]
pub fn load_post(source: &str) -> Result<JsValue, JsError> {
    let post = gatemark_core::load_post(source).map_err(|e| match e {
        GateError::Frontmatter(err) => JsError::new(&format!("Frontmatter error: {}", err)),
        other => JsError::new(&other.to_string()),
    })?;

    let frontmatter_json = serde_json::to_string(&post.meta)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))?;

    to_js(&LoadPostResult {
        frontmatter_json,
        body: post.body,
        gate_count: post.gate_count,
    })
}
