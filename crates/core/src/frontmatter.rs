//! YAML frontmatter for blog posts and guides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata authored at the top of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// URL slug; usually derived from the file name when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Post title.
    pub title: String,
    /// Short summary used for listings and meta descriptions.
    #[serde(default)]
    pub description: String,
    /// Publication date as written (e.g. `2026-02-01`).
    #[serde(default)]
    pub date: String,
    /// Author display name.
    #[serde(default)]
    pub author: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Single listing category.
    #[serde(default)]
    pub category: String,
    /// Whether the post is pinned on the index page.
    #[serde(default)]
    pub featured: bool,
    /// Extra keywords for search metadata.
    #[serde(default)]
    pub seo_keywords: Vec<String>,
}

/// Frontmatter split from a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// Parsed metadata, or `None` when the post has no frontmatter block.
    pub meta: Option<PostMeta>,
    /// Byte offset where the body starts.
    pub body_start: usize,
}

/// Errors emitted while reading frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Opening `---` without a closing one.
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse or did not match [`PostMeta`].
    #[error("Frontmatter parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

const BOM: char = '\u{feff}';

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

/// Splits the leading `---` fenced YAML block from `source` and parses it.
///
/// A byte order mark and blank lines before the opening fence are skipped.
pub fn extract_frontmatter(source: &str) -> Result<Frontmatter, FrontmatterError> {
    let mut offset = if source.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };

    let mut lines = source[offset..].split_inclusive('\n');
    let opened = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => offset += line.len(),
            Some(line) if is_fence(line) => {
                offset += line.len();
                break true;
            }
            _ => break false,
        }
    };
    if !opened {
        return Ok(Frontmatter {
            meta: None,
            body_start: 0,
        });
    }

    let yaml_start = offset;
    for line in lines {
        if is_fence(line) {
            let yaml = &source[yaml_start..offset];
            let meta = serde_yaml::from_str::<PostMeta>(yaml)?;
            return Ok(Frontmatter {
                meta: Some(meta),
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}
