//! Compiler for the tagline directive language: a compact, line-oriented
//! markup dialect that expands to nested HTML.
//!
//! Each directive line opens one element, encoding nesting depth, tag name,
//! id, classes, a `name` attribute and explicit attributes in a single line:
//!
//! ```text
//! <1 div .container>
//! <2 p #intro>Hello
//! ```
//!
//! The entry point is [`render`], a pure function from source text to an
//! HTML fragment plus the diagnostics collected while parsing. No state
//! survives a call, so renders may run concurrently without coordination.

pub mod diagnostics;
pub mod parsing;
pub mod render;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use diagnostics::{Diagnostic, DiagnosticKind, RenderError};
pub use parsing::{ParsedDoc, parse_document};
pub use tree::{Document, Node, NodeContent};

/// Caller-supplied switches for one render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Reject malformed directives with a line-numbered error instead of
    /// demoting them to text.
    pub strict: bool,
    /// Re-emit stripped comments as literal HTML comments in the output.
    pub preserve_comments: bool,
}

/// Output of a successful render: the HTML fragment and any non-fatal
/// diagnostics collected while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compiles directive-language source into an HTML fragment suitable for
/// embedding inside an existing page body.
pub fn render(source: &str, options: RenderOptions) -> Result<Rendered, RenderError> {
    let parsed = parsing::parse_document(source, options)?;
    Ok(Rendered {
        html: crate::render::to_html(&parsed.document),
        diagnostics: parsed.diagnostics,
    })
}
