//! Tree building: the open-ancestor stack plus text accumulation.
//!
//! Single pass, no lookahead. Directives pop the stack down to their
//! (clamped) depth and push a new node; text lines append to the run for
//! the innermost open node; blank lines close the run.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::tree::{Document, Node, NodeContent, is_void_tag};

use super::directive::Directive;

#[derive(Debug)]
struct OpenNode {
    depth: usize,
    node: Node,
}

/// Builds one document tree. Recreated per render call; nothing leaks
/// across invocations.
#[derive(Debug)]
pub struct TreeBuilder {
    preserve_comments: bool,
    stack: Vec<OpenNode>,
    roots: Vec<NodeContent>,
    text_run: Option<String>,
    orphan_run: bool,
    diagnostics: Vec<Diagnostic>,
}

impl TreeBuilder {
    pub fn new(preserve_comments: bool) -> Self {
        Self {
            preserve_comments,
            stack: Vec::new(),
            roots: Vec::new(),
            text_run: None,
            orphan_run: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnose(&mut self, line: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { line, kind });
    }

    /// A blank line ends the current text run; later text starts a new
    /// run under the same parent.
    pub fn blank_line(&mut self) {
        self.flush_text();
        self.orphan_run = false;
    }

    pub fn push_text(&mut self, text: &str, line: usize) {
        if self.stack.is_empty() {
            // Text with no open element has no home; one diagnostic per run.
            if !self.orphan_run {
                self.orphan_run = true;
                self.diagnose(line, DiagnosticKind::OrphanText);
            }
            return;
        }
        let trimmed = text.trim_end();
        match &mut self.text_run {
            Some(run) => {
                run.push('\n');
                run.push_str(trimmed);
            }
            None => self.text_run = Some(trimmed.to_string()),
        }
    }

    pub fn push_directive(&mut self, directive: Directive, line: usize) {
        self.flush_text();
        self.orphan_run = false;

        let max = self.stack.last().map_or(1, |open| open.depth + 1);
        let depth = if directive.depth > max {
            self.diagnose(
                line,
                DiagnosticKind::DepthJump {
                    requested: directive.depth,
                    clamped: max,
                },
            );
            max
        } else {
            directive.depth
        };

        self.close_to(depth);

        let mut node = Node {
            tag: directive.tag,
            id: directive.id,
            classes: directive.classes,
            name: directive.name,
            attrs: directive.attrs,
            content: Vec::new(),
        };
        if is_void_tag(&node.tag) {
            // Void nodes take no content; inline text is dropped and later
            // lines belong to the enclosing parent.
            self.attach(NodeContent::Child(node));
            return;
        }
        if let Some(text) = directive.inline_text {
            node.content.push(NodeContent::Text(text));
        }
        self.stack.push(OpenNode { depth, node });
    }

    /// Attaches a preserved comment at the point its span started.
    pub fn push_comment(&mut self, body: &str) {
        if !self.preserve_comments {
            return;
        }
        self.flush_text();
        self.attach(NodeContent::Comment(body.to_string()));
    }

    /// Implicitly closes every open node; there is no close syntax.
    pub fn finish(mut self) -> (Document, Vec<Diagnostic>) {
        self.flush_text();
        self.close_to(0);
        (Document { roots: self.roots }, self.diagnostics)
    }

    fn close_to(&mut self, depth: usize) {
        while self.stack.last().is_some_and(|open| open.depth >= depth) {
            if let Some(finished) = self.stack.pop() {
                self.attach(NodeContent::Child(finished.node));
            }
        }
    }

    fn attach(&mut self, content: NodeContent) {
        match self.stack.last_mut() {
            Some(open) => open.node.content.push(content),
            None => self.roots.push(content),
        }
    }

    fn flush_text(&mut self) {
        if let Some(text) = self.text_run.take() {
            self.attach(NodeContent::Text(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directive(depth: usize, tag: &str) -> Directive {
        Directive {
            depth,
            tag: tag.to_string(),
            ..Directive::default()
        }
    }

    fn child<'a>(content: &'a NodeContent) -> &'a Node {
        match content {
            NodeContent::Child(node) => node,
            other => panic!("expected child node, got {other:?}"),
        }
    }

    #[test]
    fn equal_depths_become_siblings() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "div"), 1);
        builder.push_directive(directive(2, "p"), 2);
        builder.push_directive(directive(2, "p"), 3);
        let (doc, diagnostics) = builder.finish();

        assert!(diagnostics.is_empty());
        assert_eq!(doc.roots.len(), 1);
        let div = child(&doc.roots[0]);
        assert_eq!(div.tag, "div");
        assert_eq!(div.content.len(), 2);
        assert_eq!(child(&div.content[0]).tag, "p");
        assert_eq!(child(&div.content[1]).tag, "p");
    }

    #[test]
    fn depth_jump_is_clamped_and_diagnosed() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "div"), 1);
        builder.push_directive(directive(4, "p"), 2);
        let (doc, diagnostics) = builder.finish();

        assert_eq!(
            diagnostics,
            [Diagnostic {
                line: 2,
                kind: DiagnosticKind::DepthJump {
                    requested: 4,
                    clamped: 2
                },
            }]
        );
        let div = child(&doc.roots[0]);
        assert_eq!(child(&div.content[0]).tag, "p");
    }

    #[test]
    fn first_directive_deeper_than_one_clamps_to_a_root() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(3, "p"), 1);
        let (doc, diagnostics) = builder.finish();

        assert_eq!(doc.roots.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::DepthJump {
                requested: 3,
                clamped: 1
            }
        );
    }

    #[test]
    fn depth_zero_closes_everything() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(0, "section"), 1);
        builder.push_directive(directive(1, "div"), 2);
        builder.push_directive(directive(0, "section"), 3);
        let (doc, diagnostics) = builder.finish();

        assert!(diagnostics.is_empty());
        assert_eq!(doc.roots.len(), 2);
        assert_eq!(child(&doc.roots[0]).content.len(), 1);
        assert!(child(&doc.roots[1]).content.is_empty());
    }

    #[test]
    fn text_accumulates_and_blank_lines_split_runs() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "p"), 1);
        builder.push_text("one", 2);
        builder.push_text("two", 3);
        builder.blank_line();
        builder.push_text("three", 5);
        let (doc, _) = builder.finish();

        let p = child(&doc.roots[0]);
        assert_eq!(
            p.content,
            [
                NodeContent::Text("one\ntwo".to_string()),
                NodeContent::Text("three".to_string()),
            ]
        );
    }

    #[test]
    fn orphan_text_is_discarded_with_one_diagnostic_per_run() {
        let mut builder = TreeBuilder::new(false);
        builder.push_text("lost", 1);
        builder.push_text("also lost", 2);
        builder.push_directive(directive(1, "p"), 3);
        let (doc, diagnostics) = builder.finish();

        assert_eq!(
            diagnostics,
            [Diagnostic {
                line: 1,
                kind: DiagnosticKind::OrphanText,
            }]
        );
        assert!(child(&doc.roots[0]).content.is_empty());
    }

    #[test]
    fn void_nodes_are_never_pushed_and_following_text_goes_to_the_parent() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "div"), 1);
        let mut img = directive(2, "img");
        img.inline_text = Some("dropped".to_string());
        builder.push_directive(img, 2);
        builder.push_text("after", 3);
        let (doc, diagnostics) = builder.finish();

        assert!(diagnostics.is_empty());
        let div = child(&doc.roots[0]);
        assert_eq!(div.content.len(), 2);
        let img = child(&div.content[0]);
        assert_eq!(img.tag, "img");
        assert!(img.content.is_empty());
        assert_eq!(div.content[1], NodeContent::Text("after".to_string()));
    }

    #[test]
    fn directive_after_a_void_sibling_clamps_against_the_parent() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "div"), 1);
        builder.push_directive(directive(2, "img"), 2);
        builder.push_directive(directive(3, "p"), 3);
        let (doc, diagnostics) = builder.finish();

        // img was not pushed, so depth 3 exceeds div's children level.
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::DepthJump {
                requested: 3,
                clamped: 2
            }
        );
        let div = child(&doc.roots[0]);
        assert_eq!(child(&div.content[1]).tag, "p");
    }

    #[test]
    fn comments_attach_only_when_preserved() {
        let mut builder = TreeBuilder::new(false);
        builder.push_directive(directive(1, "div"), 1);
        builder.push_comment(" hidden ");
        let (doc, _) = builder.finish();
        assert!(child(&doc.roots[0]).content.is_empty());

        let mut builder = TreeBuilder::new(true);
        builder.push_directive(directive(1, "div"), 1);
        builder.push_comment(" kept ");
        let (doc, _) = builder.finish();
        assert_eq!(
            child(&doc.roots[0]).content,
            [NodeContent::Comment(" kept ".to_string())]
        );
    }
}
