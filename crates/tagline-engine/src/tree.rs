//! The document tree produced by one parse and consumed by the renderer.

/// Tag kinds that never take children or text and render without a
/// closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// One content item of an element, in source order. Text runs, child
/// elements and preserved comments interleave the way they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// A run of text lines joined with line breaks; ends at a blank line.
    Text(String),
    Child(Node),
    /// Body of a source comment, kept only under `preserve_comments`.
    Comment(String),
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    /// Deduplicated, first-appearance order preserved.
    pub classes: Vec<String>,
    /// Literal token text, including a `[]` suffix when present.
    pub name: Option<String>,
    /// Explicit attributes in source order; duplicate keys were merged.
    pub attrs: Vec<(String, String)>,
    pub content: Vec<NodeContent>,
}

impl Node {
    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }
}

/// Top-level siblings of one parsed document. Owned by the render call
/// that created it and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub roots: Vec<NodeContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_tags_cover_the_self_closing_kinds() {
        for tag in ["img", "input", "br", "hr", "meta"] {
            assert!(is_void_tag(tag), "{tag} should be void");
        }
        for tag in ["div", "p", "span", "table", "form"] {
            assert!(!is_void_tag(tag), "{tag} should not be void");
        }
    }
}
