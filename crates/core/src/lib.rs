#![deny(missing_docs)]
//! gatemark core: fail-closed `:::decision-gate` preprocessing for Markdown/MDX.

/// CSS class allowlist and class-string hygiene.
pub mod classes;
/// Core error types.
pub mod error;
/// HTML escaping.
pub mod escape;
/// YAML frontmatter extraction.
pub mod frontmatter;
/// Post loading (frontmatter + gate preprocessing).
pub mod post;
/// Document-level gate rewriting.
pub mod preprocess;
/// Gate body rendering.
pub mod render;
/// Structural validation of gate markers.
pub mod scan;

pub use classes::{
    ALLOWED_CLASSES, ClassViolation, audit_markup_classes, class_attributes, is_allowed_class,
    normalize_class_name, validate_allowed_classes,
};
pub use error::{GateError, SourceLocation};
pub use escape::escape_html;
pub use frontmatter::{Frontmatter, FrontmatterError, PostMeta, extract_frontmatter};
pub use post::{LoadedPost, load_post};
pub use preprocess::{GateRewrite, preprocess_gate_blocks, rewrite_gate_blocks};
pub use render::{ContentElement, RenderError, SectionLabel, render_gate};
pub use scan::{GATE_END, GATE_START, GateRange, ScanError, scan_lines, validate};
