pub mod builder;
pub mod classify;
pub mod comments;
pub mod directive;

use crate::RenderOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind, RenderError};
use crate::tree::Document;

use builder::TreeBuilder;
use classify::{LineClass, classify};
use comments::strip_comments;
use directive::parse_directive;

/// Result of one parse: the tree plus the non-fatal diagnostics collected
/// along the way.
#[derive(Debug)]
pub struct ParsedDoc {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses directive-language source into a document tree.
///
/// Pipeline: comment stripper → line classifier → (directive parser |
/// text accumulator) → nesting resolver. Single pass, no lookahead.
pub fn parse_document(source: &str, options: RenderOptions) -> Result<ParsedDoc, RenderError> {
    let lines = strip_comments(source)?;
    let mut builder = TreeBuilder::new(options.preserve_comments);

    for line in &lines {
        match classify(line) {
            LineClass::Comment => {}
            LineClass::Blank => builder.blank_line(),
            LineClass::Text => builder.push_text(&line.text, line.number),
            LineClass::Directive => match parse_directive(&line.text) {
                Ok(directive) => builder.push_directive(directive, line.number),
                Err(reason) if options.strict => {
                    return Err(RenderError::Syntax {
                        line: line.number,
                        reason: reason.to_string(),
                        text: line.text.trim().to_string(),
                    });
                }
                Err(_) => {
                    builder.diagnose(line.number, DiagnosticKind::MalformedDirective);
                    builder.push_text(&line.text, line.number);
                }
            },
        }
        for comment in &line.comments {
            builder.push_comment(comment);
        }
    }

    let (document, diagnostics) = builder.finish();
    Ok(ParsedDoc {
        document,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeContent;
    use pretty_assertions::assert_eq;

    #[test]
    fn strict_mode_rejects_malformed_directives_with_line_numbers() {
        let source = "<1 div>\n<2 p\n";
        let err = parse_document(
            source,
            RenderOptions {
                strict: true,
                ..RenderOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::Syntax {
                line: 2,
                reason: "missing closing '>'".to_string(),
                text: "<2 p".to_string(),
            }
        );
    }

    #[test]
    fn lenient_mode_demotes_malformed_directives_to_text() {
        let parsed = parse_document("<1 div>\n<2 p\n", RenderOptions::default()).unwrap();
        assert_eq!(
            parsed.diagnostics[0].kind,
            DiagnosticKind::MalformedDirective
        );
        let NodeContent::Child(div) = &parsed.document.roots[0] else {
            panic!("expected element root");
        };
        assert_eq!(div.content, [NodeContent::Text("<2 p".to_string())]);
    }

    #[test]
    fn comment_lines_do_not_break_a_text_run() {
        let source = "<1 p>\none\n<!-- aside -->\ntwo\n";
        let parsed = parse_document(source, RenderOptions::default()).unwrap();
        let NodeContent::Child(p) = &parsed.document.roots[0] else {
            panic!("expected element root");
        };
        assert_eq!(p.content, [NodeContent::Text("one\ntwo".to_string())]);
    }

    #[test]
    fn unterminated_comment_is_fatal_in_both_modes() {
        for strict in [false, true] {
            let err = parse_document(
                "<1 div>\n<!-- open",
                RenderOptions {
                    strict,
                    ..RenderOptions::default()
                },
            )
            .unwrap_err();
            assert_eq!(err, RenderError::UnterminatedComment { line: 2 });
        }
    }
}
