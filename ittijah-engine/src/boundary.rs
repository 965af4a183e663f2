//! Block boundary resolution
//!
//! A direction verdict is never attached finer than the nearest
//! block-level container, so inline runs cannot individually flip
//! direction.

use ittijah_dom::{Document, NodeRef};

/// Tags treated as list containers; they are boundaries regardless of
/// their computed display.
pub const LIST_TAGS: &[&str] = &["ul", "ol"];

/// True when the element is a `ul`/`ol` container.
pub fn is_list_container(doc: &Document, node: NodeRef) -> bool {
    doc.tag(node).is_some_and(|tag| LIST_TAGS.contains(&tag))
}

/// True when the element establishes a direction boundary: computed
/// display block, flex or grid, or a list container tag.
pub fn is_boundary_element(doc: &Document, node: NodeRef) -> bool {
    if !doc.resolve(node).is_some_and(|n| n.is_element()) {
        return false;
    }
    is_list_container(doc, node) || doc.display(node).is_boundary()
}

/// Find the nearest boundary ancestor of a text node.
///
/// Walks from the immediate parent upward and stops without a result at
/// the body; the root content container itself is never a boundary.
pub fn resolve_boundary(doc: &Document, text_node: NodeRef) -> Option<NodeRef> {
    let body = doc.body();
    let mut current = doc.parent(text_node)?;
    while current != body {
        if is_boundary_element(doc, current) {
            return Some(current);
        }
        current = doc.parent(current)?;
    }
    None
}

/// Boundary ancestors affected by a change at `node`, nearest first.
///
/// A mutation invalidates more than the nearest boundary: an outer
/// boundary's aggregate includes nested subtree text, so every boundary
/// on the ancestor chain up to the body is affected.
pub fn containing_boundary(doc: &Document, node: NodeRef) -> Vec<NodeRef> {
    let body = doc.body();
    let mut affected = Vec::new();
    let mut current = match doc.resolve(node) {
        Some(n) if n.is_element() => Some(node),
        Some(_) => doc.parent(node),
        None => None,
    };
    while let Some(candidate) = current {
        if candidate == body {
            break;
        }
        if is_boundary_element(doc, candidate) {
            affected.push(candidate);
        }
        current = doc.parent(candidate);
    }
    affected
}
