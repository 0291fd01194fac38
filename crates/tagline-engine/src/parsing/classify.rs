use std::sync::LazyLock;

use regex::Regex;

use super::comments::StrippedLine;

/// Directive heads open with `<`, then either an explicit decimal depth or
/// a run of further `<` characters, then a space or tab before the tag
/// name. Requiring the separator keeps rendered HTML output such as
/// `<p>text</p>` from re-parsing as a directive when fed back in as text.
static DIRECTIVE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*<(?:[0-9]+|<*)[ \t]").expect("directive head pattern"));

/// Classification of a single stripped line on local facts only.
///
/// This is phase 1 of parsing: no surrounding context is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The line held nothing but comment content; skipped entirely.
    Comment,
    /// Whitespace only; terminates the current text run, emits nothing.
    Blank,
    /// Matches the directive head; handed to the directive parser.
    Directive,
    /// Everything else; accumulated as text content.
    Text,
}

pub fn classify(line: &StrippedLine) -> LineClass {
    if line.all_comment {
        LineClass::Comment
    } else if line.text.trim().is_empty() {
        LineClass::Blank
    } else if DIRECTIVE_HEAD.is_match(&line.text) {
        LineClass::Directive
    } else {
        LineClass::Text
    }
}
