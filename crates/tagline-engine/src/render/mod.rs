//! HTML serialization: depth-first pre-order walk over the document tree.
//!
//! Attribute order on every opening tag is fixed: `id`, `class`, `name`,
//! then explicit attributes in source order. All text and attribute
//! values are escaped; the dialect has no raw passthrough.

use html_escape::{encode_double_quoted_attribute, encode_safe};

use crate::tree::{Document, Node, NodeContent};

/// Serializes a document to an HTML fragment. Top-level siblings are
/// separated with a newline.
pub fn to_html(document: &Document) -> String {
    let mut out = String::new();
    for (index, root) in document.roots.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_content(&mut out, root);
    }
    out
}

fn write_content(out: &mut String, content: &NodeContent) {
    match content {
        NodeContent::Text(text) => out.push_str(&encode_safe(text)),
        NodeContent::Child(node) => write_node(out, node),
        NodeContent::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
    }
}

fn write_node(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(&node.tag);
    if let Some(id) = &node.id {
        write_attr(out, "id", id);
    }
    if !node.classes.is_empty() {
        write_attr(out, "class", &node.classes.join(" "));
    }
    if let Some(name) = &node.name {
        write_attr(out, "name", name);
    }
    for (key, value) in &node.attrs {
        write_attr(out, key, value);
    }
    out.push('>');

    if node.is_void() {
        // No closing tag, and never recurse even if content slipped in.
        return;
    }
    let mut last_was_text = false;
    for content in &node.content {
        let is_text = matches!(content, NodeContent::Text(_));
        // Keep the paragraph boundary between runs split by a blank line.
        if is_text && last_was_text {
            out.push('\n');
        }
        write_content(out, content);
        last_was_text = is_text;
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
