//! Comment stripping, the pass that runs before line classification.
//!
//! `<!-- ... -->` spans may cross line boundaries. A `<!--` inside an
//! already-open span has no special meaning; the first `-->` closes it.

use crate::diagnostics::RenderError;

/// One source line after comment stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedLine {
    /// 1-based line number in the original source.
    pub number: usize,
    /// Line text with comment content removed.
    pub text: String,
    /// The line held nothing but comment content.
    pub all_comment: bool,
    /// Bodies of comment spans that started on this line.
    pub comments: Vec<String>,
}

/// Removes comment spans from `source`, keeping per-line records so later
/// stages still report original line numbers. A span with no closing
/// marker is fatal in every mode: the rest of the document cannot be
/// classified.
pub fn strip_comments(source: &str) -> Result<Vec<StrippedLine>, RenderError> {
    let mut out: Vec<StrippedLine> = Vec::new();
    // Span still open from a previous line: (start line, body so far).
    let mut open: Option<(usize, String)> = None;

    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let mut text = String::new();
        let mut comments = Vec::new();
        let mut had_comment = false;
        let mut rest = raw;

        if let Some((start, mut body)) = open.take() {
            had_comment = true;
            match rest.find("-->") {
                Some(end) => {
                    body.push('\n');
                    body.push_str(&rest[..end]);
                    attach_to_start(&mut out, start, number, &mut comments, body);
                    rest = &rest[end + 3..];
                }
                None => {
                    body.push('\n');
                    body.push_str(rest);
                    open = Some((start, body));
                    out.push(StrippedLine {
                        number,
                        text,
                        all_comment: true,
                        comments,
                    });
                    continue;
                }
            }
        }

        loop {
            match rest.find("<!--") {
                Some(at) => {
                    had_comment = true;
                    text.push_str(&rest[..at]);
                    let after = &rest[at + 4..];
                    match after.find("-->") {
                        Some(end) => {
                            comments.push(after[..end].to_string());
                            rest = &after[end + 3..];
                        }
                        None => {
                            open = Some((number, after.to_string()));
                            break;
                        }
                    }
                }
                None => {
                    text.push_str(rest);
                    break;
                }
            }
        }

        let all_comment = had_comment && text.trim().is_empty();
        out.push(StrippedLine {
            number,
            text,
            all_comment,
            comments,
        });
    }

    if let Some((start, _)) = open {
        return Err(RenderError::UnterminatedComment { line: start });
    }
    Ok(out)
}

/// A multi-line span belongs to the line where it opened, which was
/// already pushed when the span turned out to continue.
fn attach_to_start(
    out: &mut Vec<StrippedLine>,
    start: usize,
    current: usize,
    comments: &mut Vec<String>,
    body: String,
) {
    if start == current {
        comments.push(body);
    } else if let Some(line) = out.iter_mut().find(|line| line.number == start) {
        line.comments.push(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_lines_pass_through() {
        let lines = strip_comments("<1 div>\ntext\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "<1 div>");
        assert_eq!(lines[1].text, "text");
        assert!(!lines[0].all_comment);
        assert!(lines[0].comments.is_empty());
    }

    #[test]
    fn single_line_span_is_removed() {
        let lines = strip_comments("before <!-- note --> after").unwrap();
        assert_eq!(lines[0].text, "before  after");
        assert!(!lines[0].all_comment);
        assert_eq!(lines[0].comments, vec![" note ".to_string()]);
    }

    #[test]
    fn whole_comment_line_is_not_a_blank_line() {
        let lines = strip_comments("<!-- heading -->").unwrap();
        assert!(lines[0].all_comment);
        assert_eq!(lines[0].text, "");
    }

    #[test]
    fn spans_cross_lines_and_attach_to_the_start_line() {
        let lines = strip_comments("a <!-- one\ntwo\nthree --> b").unwrap();
        assert_eq!(lines[0].text, "a ");
        assert_eq!(lines[0].comments, vec![" one\ntwo\nthree ".to_string()]);
        assert!(lines[1].all_comment);
        assert_eq!(lines[2].text, " b");
        assert!(lines[2].comments.is_empty());
    }

    #[test]
    fn nested_open_marker_has_no_meaning() {
        let lines = strip_comments("x <!-- a <!-- b --> y").unwrap();
        assert_eq!(lines[0].text, "x  y");
        assert_eq!(lines[0].comments, vec![" a <!-- b ".to_string()]);
    }

    #[test]
    fn two_spans_on_one_line() {
        let lines = strip_comments("a <!--1--> b <!--2--> c").unwrap();
        assert_eq!(lines[0].text, "a  b  c");
        assert_eq!(lines[0].comments, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn unterminated_span_is_fatal_with_the_start_line() {
        let err = strip_comments("ok\n<!-- never closed\nmore").unwrap_err();
        assert_eq!(err, RenderError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn blank_line_stays_blank() {
        let lines = strip_comments("\n").unwrap();
        assert!(!lines[0].all_comment);
        assert_eq!(lines[0].text, "");
    }
}
