//! NAPI-exposed data structures.

use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Outcome of rewriting the gates in one document.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct GateRewriteResult {
    /// Rewritten document, or the input unchanged when it was rejected.
    pub content: String,
    /// Number of gates rewritten.
    pub gate_count: u32,
    /// Why the document was left untouched, when it was.
    pub error: Option<String>,
    /// 1-indexed line the rejection points at.
    pub error_line: Option<u32>,
}

/// A post split into metadata and a preprocessed body.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct LoadedPostResult {
    /// Frontmatter metadata as JSON (`null` when absent).
    pub meta: JsonValue,
    /// Body with gates rewritten.
    pub body: String,
    /// Number of gates rewritten.
    pub gate_count: u32,
}
