//! Text aggregation over a boundary element's subtree

use crate::boundary::is_list_container;
use ittijah_core::WordStats;
use ittijah_dom::{Document, NodeRef};

/// Gather word statistics for a boundary element.
///
/// List containers aggregate their full flattened text; generic
/// containers aggregate depth-first over rendered, non-whitespace leaf
/// text nodes. Runs continue across node boundaries either way, so
/// markup splits do not break up a passage. Returns the empty sentinel
/// when the subtree has no meaningful text.
pub fn aggregate(doc: &Document, element: NodeRef) -> WordStats {
    if is_list_container(doc, element) {
        return WordStats::from_text(&doc.flattened_text(element));
    }
    let mut stats = WordStats::default();
    for leaf in doc.leaf_text_nodes(element) {
        if let Some(text) = doc.text(leaf) {
            stats.absorb_text(text);
        }
    }
    stats
}
