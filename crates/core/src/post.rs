//! Loads a post: frontmatter plus a gate-preprocessed body.

use crate::error::GateError;
use crate::frontmatter::{PostMeta, extract_frontmatter};
use crate::preprocess::rewrite_gate_blocks;

/// A post ready for the Markdown renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPost {
    /// Frontmatter metadata, when present.
    pub meta: Option<PostMeta>,
    /// Body with decision gates rewritten (or untouched if any was malformed).
    pub body: String,
    /// Number of gates rewritten in the body.
    pub gate_count: usize,
}

/// Extracts frontmatter and preprocesses the body.
///
/// Only frontmatter errors fail the load. A malformed gate leaves the body
/// exactly as authored so the raw markers show up on the rendered page.
pub fn load_post(source: &str) -> Result<LoadedPost, GateError> {
    let frontmatter = extract_frontmatter(source)?;
    let body = &source[frontmatter.body_start..];

    let (body, gate_count) = match rewrite_gate_blocks(body) {
        Ok(rewrite) => (rewrite.content, rewrite.gate_count),
        Err(err) => {
            let title = frontmatter
                .meta
                .as_ref()
                .map(|meta| meta.title.as_str())
                .unwrap_or("<untitled>");
            log::warn!("post `{title}`: {err}; decision gates rendered as written");
            (body.to_string(), 0)
        }
    };

    Ok(LoadedPost {
        meta: frontmatter.meta,
        body,
        gate_count,
    })
}
