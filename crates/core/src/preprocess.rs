//! Document-level entry points for decision-gate rewriting.
//!
//! Converts:
//! ```text
//! :::decision-gate
//! ### Should you keep fixing this locally?
//! - You can reinstall Node.js
//! :::
//! ```
//!
//! To:
//! ```text
//! <div class="glass-card p-6 border-l-4 border-orange-500 mb-8">
//! <h3 class="text-xl font-bold text-text-primary mb-4">Should you keep fixing this locally?</h3>
//! <div class="text-text-secondary ml-4">You can reinstall Node.js</div>
//! </div>
//! ```
//!
//! Either every gate in a document is rewritten or none is.

use crate::classes::audit_markup_classes;
use crate::error::GateError;
use crate::render::render_gate;
use crate::scan::{GATE_START, scan_lines};

/// Result of rewriting every gate in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRewrite {
    /// Document with each gate replaced by its markup.
    pub content: String,
    /// Number of gates rewritten.
    pub gate_count: usize,
}

impl GateRewrite {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            gate_count: 0,
        }
    }
}

/// Rewrites every gate in `content`, or reports why the document is not
/// transformable.
///
/// Text outside gates is copied byte for byte. Each replaced span runs from the
/// start of the opening marker line to the end of the closing marker line; line
/// terminators around it are kept.
pub fn rewrite_gate_blocks(content: &str) -> Result<GateRewrite, GateError> {
    if !content.contains(GATE_START) {
        return Ok(GateRewrite::unchanged(content));
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let ranges = scan_lines(&lines)?;

    let mut offsets = Vec::with_capacity(lines.len());
    let mut offset = 0usize;
    for line in &lines {
        offsets.push(offset);
        offset += line.len() + 1;
    }

    let mut out = String::with_capacity(content.len() * 2);
    let mut cursor = 0usize;

    for range in &ranges {
        let span_start = offsets[range.start_line];
        let end_line = lines[range.end_line];
        let span_end = offsets[range.end_line] + end_line.trim_end_matches('\r').len();

        let fragment = render_gate(&lines[range.body_lines()])
            .map_err(|err| GateError::render_error(err.to_string(), range.start_line + 1))?;
        debug_assert_eq!(audit_markup_classes(&fragment), Ok(()));

        out.push_str(&content[cursor..span_start]);
        out.push_str(&fragment);
        cursor = span_end;
    }
    out.push_str(&content[cursor..]);

    Ok(GateRewrite {
        content: out,
        gate_count: ranges.len(),
    })
}

/// Rewrites every gate in `content`, returning the input unchanged when any
/// gate is malformed or fails to render.
pub fn preprocess_gate_blocks(content: &str) -> String {
    match rewrite_gate_blocks(content) {
        Ok(rewrite) => rewrite.content,
        Err(err) => {
            log::debug!("decision gates left untouched: {err}");
            content.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanError;

    #[test]
    fn rewrites_single_gate() {
        let input = ":::decision-gate\n### Test\n- Item\n:::";
        let rewrite = rewrite_gate_blocks(input).unwrap();
        assert_eq!(rewrite.gate_count, 1);
        assert_eq!(
            rewrite.content,
            "<div class=\"glass-card p-6 border-l-4 border-orange-500 mb-8\">\n\
             <h3 class=\"text-xl font-bold text-text-primary mb-4\">Test</h3>\n\
             <div class=\"text-text-secondary ml-4\">Item</div>\n\
             </div>"
        );
    }

    #[test]
    fn keeps_surrounding_text_and_terminators() {
        let input = "before\r\n:::decision-gate\r\n- a\r\n:::\r\nafter";
        let out = preprocess_gate_blocks(input);
        assert!(out.starts_with("before\r\n<div class=\"glass-card"));
        assert!(out.ends_with("</div>\r\nafter"));
        assert!(out.contains(">a</div>"));
    }

    #[test]
    fn padded_markers_are_replaced_whole() {
        let input = "intro\n  :::decision-gate  \n- a\n  :::\noutro";
        let rewrite = rewrite_gate_blocks(input).unwrap();
        assert_eq!(rewrite.gate_count, 1);
        assert_eq!(
            rewrite.content,
            "intro\n<div class=\"glass-card p-6 border-l-4 border-orange-500 mb-8\">\n\
             <div class=\"text-text-secondary ml-4\">a</div>\n\
             </div>\noutro"
        );
        assert!(!rewrite.content.contains(":::"));
    }

    #[test]
    fn reports_rejection_reason() {
        let err = rewrite_gate_blocks(":::decision-gate\n- a").unwrap_err();
        assert!(matches!(
            err,
            GateError::Malformed(ScanError::Unterminated { line: 1 })
        ));
    }

    #[test]
    fn documents_without_gates_are_untouched() {
        for input in ["", "plain", ":::", ":::note\nhi\n:::", "a ::: b"] {
            assert_eq!(preprocess_gate_blocks(input), input);
        }
    }

    #[test]
    fn inline_start_marker_is_not_a_gate() {
        let input = "see :::decision-gate for details";
        let rewrite = rewrite_gate_blocks(input).unwrap();
        assert_eq!(rewrite.gate_count, 0);
        assert_eq!(rewrite.content, input);
    }

    #[test]
    fn hundred_bullets_render_quickly() {
        let bullets: Vec<String> = (1..=100).map(|i| format!("- Item {i}")).collect();
        let input = format!(
            ":::decision-gate\n### Large Decision Gate\n\n**Continue local debugging only if:**\n{}\n\n**Stop here if any apply:**\n- Item A\n:::\n\nSome outro",
            bullets.join("\n")
        );
        let start = std::time::Instant::now();
        let out = preprocess_gate_blocks(&input);
        assert!(start.elapsed() < std::time::Duration::from_millis(100));
        assert!(out.contains("glass-card"));
        assert!(out.contains(">Item 1</div>"));
        assert!(out.contains(">Item 100</div>"));
    }
}
