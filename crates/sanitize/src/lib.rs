#![deny(missing_docs)]
//! gatemark sanitizer: allowlist enforcement for rendered page HTML.
//!
//! Gate markup is already escaped and allowlisted when it is produced; this
//! crate re-checks the final HTML against a configurable schema before it is
//! served.

/// Streaming sanitizer built on lol_html.
pub mod sanitize;
/// Sanitizer schema (allowed tags, attributes, classes, protocols).
pub mod schema;

pub use sanitize::sanitize_html;
pub use schema::{DEFAULT_SCHEMA, SanitizeSchema};

use thiserror::Error;

/// Errors raised while loading a schema or sanitizing HTML.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Schema JSON could not be deserialized.
    #[error("invalid sanitize schema: {0}")]
    Schema(#[from] serde_json::Error),
    /// lol_html failed while rewriting the document.
    #[error("HTML rewrite failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}
