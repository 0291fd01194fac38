use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Fatal conditions. Under lenient mode only an unterminated comment
/// aborts; strict mode additionally rejects malformed directives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("line {line}: {reason}: {text}")]
    Syntax {
        line: usize,
        reason: String,
        text: String,
    },
    #[error("line {line}: unterminated comment")]
    UnterminatedComment { line: usize },
}

/// A recoverable problem noted while parsing; rendering continues and the
/// diagnostic is returned alongside the HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number in the original source.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Directive nested deeper than its parent allows; the depth was
    /// clamped to parent depth + 1.
    DepthJump { requested: usize, clamped: usize },
    /// Text before any directive has opened an element; discarded.
    OrphanText,
    /// Unparsable directive demoted to plain text (lenient mode).
    MalformedDirective,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::DepthJump { requested, clamped } => write!(
                f,
                "line {}: depth {} exceeds parent depth + 1, clamped to {}",
                self.line, requested, clamped
            ),
            DiagnosticKind::OrphanText => {
                write!(f, "line {}: text before any directive is discarded", self.line)
            }
            DiagnosticKind::MalformedDirective => {
                write!(f, "line {}: malformed directive kept as text", self.line)
            }
        }
    }
}
