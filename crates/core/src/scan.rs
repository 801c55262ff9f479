//! Structural validation of decision-gate blocks.
//!
//! A single forward pass over the document's lines both validates the gate
//! markers and extracts the line ranges to rewrite. Any ambiguity anywhere in
//! the document rejects the whole document.

use std::ops::Range;

use thiserror::Error;

/// Opening marker line, compared after trimming.
pub const GATE_START: &str = ":::decision-gate";
/// Closing marker line, compared after trimming.
pub const GATE_END: &str = ":::";

/// A gate closing with this many non-blank lines or fewer must not be
/// immediately followed by another opening marker.
const SHORT_GATE_MAX_LINES: usize = 2;

/// A well-formed gate: its opening and closing marker lines (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRange {
    /// Line holding `:::decision-gate`.
    pub start_line: usize,
    /// Line holding the matching `:::`.
    pub end_line: usize,
}

impl GateRange {
    /// Lines strictly between the two markers.
    pub fn body_lines(&self) -> Range<usize> {
        self.start_line + 1..self.end_line
    }
}

/// Why a document's gate structure was rejected. Lines are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `:::decision-gate` inside an open gate.
    #[error("nested gate opened at line {line}")]
    NestedStart {
        /// Offending line
        line: usize,
    },
    /// `:::` with no open gate.
    #[error("closing marker without an open gate at line {line}")]
    UnmatchedEnd {
        /// Offending line
        line: usize,
    },
    /// A line containing `:::` inside a gate body.
    #[error("stray directive marker inside a gate at line {line}")]
    StrayMarker {
        /// Offending line
        line: usize,
    },
    /// The document ended while a gate was still open.
    #[error("gate opened at line {line} is never closed")]
    Unterminated {
        /// Line of the opening marker
        line: usize,
    },
    /// A near-empty gate immediately followed by another opening marker.
    #[error("short gate closed at line {closed_at} is directly followed by another gate at line {line}")]
    BackToBack {
        /// Line of the following opening marker
        line: usize,
        /// Line where the short gate closed
        closed_at: usize,
    },
}

impl ScanError {
    /// Line the error points at (1-indexed).
    pub fn line(&self) -> usize {
        match *self {
            ScanError::NestedStart { line }
            | ScanError::UnmatchedEnd { line }
            | ScanError::StrayMarker { line }
            | ScanError::Unterminated { line }
            | ScanError::BackToBack { line, .. } => line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerLine {
    Start,
    End,
    Stray,
    Text,
}

fn classify_marker(trimmed: &str) -> MarkerLine {
    if trimmed == GATE_START {
        MarkerLine::Start
    } else if trimmed == GATE_END {
        MarkerLine::End
    } else if trimmed.contains(GATE_END) {
        MarkerLine::Stray
    } else {
        MarkerLine::Text
    }
}

/// Validates `content` and returns every gate range in document order.
///
/// Lines are split on `\n`; a trailing `\r` is removed by trimming.
pub fn validate(content: &str) -> Result<Vec<GateRange>, ScanError> {
    let lines: Vec<&str> = content.split('\n').collect();
    scan_lines(&lines)
}

/// Validates pre-split lines. See [`validate`].
pub fn scan_lines(lines: &[&str]) -> Result<Vec<GateRange>, ScanError> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    let mut body_lines = 0usize;
    // Closing line of a short gate, until the next non-blank line is seen.
    let mut short_close: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let marker = classify_marker(trimmed);

        if let Some(closed_at) = short_close.take()
            && marker == MarkerLine::Start
        {
            return Err(ScanError::BackToBack {
                line: index + 1,
                closed_at: closed_at + 1,
            });
        }

        match marker {
            MarkerLine::Start => {
                if open.is_some() {
                    return Err(ScanError::NestedStart { line: index + 1 });
                }
                open = Some(index);
                body_lines = 0;
            }
            MarkerLine::End => {
                let Some(start_line) = open.take() else {
                    return Err(ScanError::UnmatchedEnd { line: index + 1 });
                };
                ranges.push(GateRange {
                    start_line,
                    end_line: index,
                });
                if body_lines <= SHORT_GATE_MAX_LINES {
                    short_close = Some(index);
                }
            }
            MarkerLine::Stray if open.is_some() => {
                return Err(ScanError::StrayMarker { line: index + 1 });
            }
            MarkerLine::Stray => {}
            MarkerLine::Text => {
                if open.is_some() {
                    body_lines += 1;
                }
            }
        }
    }

    if let Some(start_line) = open {
        return Err(ScanError::Unterminated {
            line: start_line + 1,
        });
    }

    Ok(ranges)
}
