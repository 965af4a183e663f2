//! Deterministic HTML serialization
//!
//! Output is stable: child order follows the tree, attributes are
//! emitted in insertion order, and escaping is minimal but explicit, so
//! tests can assert on exact strings.

use crate::document::Document;
use crate::node::{NodeData, NodeId};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub(crate) fn to_html(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, root, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let node = doc.node(id);
    match &node.data {
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(el.tag());
            for (name, value) in el.attributes() {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_TAGS.contains(&el.tag()) {
                return;
            }
            for &child in &node.children {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(el.tag());
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
