use thiserror::Error;

use crate::frontmatter::FrontmatterError;
use crate::scan::ScanError;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that stop a document from being transformed.
///
/// Every variant means the same thing to [`crate::preprocess_gate_blocks`]:
/// the document is returned exactly as it was given.
#[derive(Debug, Error)]
pub enum GateError {
    /// Gate markers are missing, nested, or ambiguous somewhere in the document.
    #[error("malformed decision gate: {0}")]
    Malformed(#[from] ScanError),
    /// Writing the markup for a single gate failed.
    #[error("render error at {location}: {message}")]
    Render {
        /// Error message
        message: String,
        /// Location of the gate's opening marker
        location: SourceLocation,
    },
    /// The post's YAML frontmatter could not be read.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

impl GateError {
    /// Create a render error for the gate opening at `line`.
    pub fn render_error(message: impl Into<String>, line: usize) -> Self {
        Self::Render {
            message: message.into(),
            location: SourceLocation::new(line, 1),
        }
    }

    /// Location associated with this error, when it has one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            GateError::Malformed(scan) => Some(SourceLocation::new(scan.line(), 1)),
            GateError::Render { location, .. } => Some(*location),
            GateError::Frontmatter(_) => None,
        }
    }
}
