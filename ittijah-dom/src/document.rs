//! The document arena and its mutation surface

use crate::display::{display_override, Display};
use crate::error::DomError;
use crate::html;
use crate::mutation::{MutationKind, MutationRecord, ObserveOptions};
use crate::node::{ElementData, Node, NodeData, NodeId, NodeRef};
use slab::Slab;
use std::collections::VecDeque;

/// A mutable document tree.
///
/// Nodes live in a slab arena addressed by [`NodeRef`] handles. The
/// document synthesizes `html`, `head` and `body` containers on
/// construction, the way a browser does, so `body()` always resolves.
#[derive(Debug)]
pub struct Document {
    nodes: Slab<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    next_generation: u64,
    observer: Option<ObserveOptions>,
    records: VecDeque<MutationRecord>,
}

impl Document {
    /// Create an empty document with synthesized `html`, `head` and
    /// `body` containers.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Slab::new(),
            root: 0,
            head: 0,
            body: 0,
            next_generation: 0,
            observer: None,
            records: VecDeque::new(),
        };
        let root = doc.alloc(NodeData::Element(ElementData::new("html")), None);
        let head = doc.alloc(NodeData::Element(ElementData::new("head")), Some(root));
        let body = doc.alloc(NodeData::Element(ElementData::new("body")), Some(root));
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Parse an HTML document or fragment.
    ///
    /// Parsing is lenient and never fails; content outside explicit
    /// `html`/`head`/`body` tags is grafted into the synthesized
    /// containers.
    pub fn parse(input: &str) -> Self {
        let mut doc = Self::new();
        html::parse_document(&mut doc, input);
        doc
    }

    // --- identity -----------------------------------------------------

    fn alloc(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let generation = self.next_generation;
        self.next_generation += 1;
        let id = self.nodes.insert(Node {
            parent,
            children: Vec::new(),
            generation,
            data,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    fn make_ref(&self, id: NodeId) -> NodeRef {
        NodeRef {
            id,
            generation: self.nodes[id].generation,
        }
    }

    /// Resolve a handle, returning the node only when the handle is
    /// still current.
    pub fn resolve(&self, node: NodeRef) -> Option<&Node> {
        self.nodes
            .get(node.id)
            .filter(|n| n.generation == node.generation)
    }

    fn resolve_id(&self, node: NodeRef) -> Option<NodeId> {
        self.resolve(node).map(|_| node.id)
    }

    /// True while the handle still refers to a live node.
    pub fn contains(&self, node: NodeRef) -> bool {
        self.resolve(node).is_some()
    }

    /// The `html` element.
    pub fn root(&self) -> NodeRef {
        self.make_ref(self.root)
    }

    /// The `head` element.
    pub fn head(&self) -> NodeRef {
        self.make_ref(self.head)
    }

    /// The `body` element, the root content container.
    pub fn body(&self) -> NodeRef {
        self.make_ref(self.body)
    }

    // --- structure ----------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeRef {
        let id = self.alloc(NodeData::Element(ElementData::new(tag)), None);
        self.make_ref(id)
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeRef {
        let id = self.alloc(NodeData::Text(text.to_string()), None);
        self.make_ref(id)
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeRef, child: NodeRef) -> Result<(), DomError> {
        let parent_id = self.resolve_id(parent).ok_or(DomError::Stale(parent))?;
        let child_id = self.resolve_id(child).ok_or(DomError::Stale(child))?;
        if let Some(old_parent) = self.nodes[child_id].parent {
            self.nodes[old_parent].children.retain(|&c| c != child_id);
        }
        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);
        self.record(parent, MutationKind::ChildList);
        Ok(())
    }

    /// Parse an HTML fragment and append it under `parent`.
    ///
    /// Emits a single child-list record for the parent, the way an
    /// injected subtree batches in a real observer callback.
    pub fn insert_html(&mut self, parent: NodeRef, input: &str) -> Result<Vec<NodeRef>, DomError> {
        let parent_id = self.resolve_id(parent).ok_or(DomError::Stale(parent))?;
        let inserted = html::parse_fragment(self, parent_id, input);
        let refs = inserted.iter().map(|&id| self.make_ref(id)).collect();
        self.record(parent, MutationKind::ChildList);
        Ok(refs)
    }

    /// Remove a node and its whole subtree from the document.
    pub fn remove_node(&mut self, node: NodeRef) -> Result<(), DomError> {
        let id = self.resolve_id(node).ok_or(DomError::Stale(node))?;
        let parent = self.nodes[id].parent;
        if let Some(parent_id) = parent {
            self.nodes[parent_id].children.retain(|&c| c != id);
        }
        self.free_subtree(id);
        if let Some(parent_id) = parent {
            let parent_ref = self.make_ref(parent_id);
            self.record(parent_ref, MutationKind::ChildList);
        }
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes.remove(id);
    }

    /// Replace a text node's character data.
    pub fn set_text(&mut self, node: NodeRef, text: &str) -> Result<(), DomError> {
        let id = self.resolve_id(node).ok_or(DomError::Stale(node))?;
        match &mut self.nodes[id].data {
            NodeData::Text(data) => {
                *data = text.to_string();
                self.record(node, MutationKind::CharacterData);
                Ok(())
            }
            NodeData::Element(_) => Err(DomError::NotAText(node)),
        }
    }

    // --- attributes ---------------------------------------------------

    /// Set an attribute on an element.
    pub fn set_attribute(
        &mut self,
        node: NodeRef,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let id = self.resolve_id(node).ok_or(DomError::Stale(node))?;
        match &mut self.nodes[id].data {
            NodeData::Element(el) => {
                el.set_attribute(name, value);
                self.record(
                    node,
                    MutationKind::Attribute {
                        name: name.to_string(),
                    },
                );
                Ok(())
            }
            NodeData::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    /// Remove an attribute from an element. Absent attributes are a
    /// silent no-op, as in the host API.
    pub fn remove_attribute(&mut self, node: NodeRef, name: &str) -> Result<(), DomError> {
        let id = self.resolve_id(node).ok_or(DomError::Stale(node))?;
        match &mut self.nodes[id].data {
            NodeData::Element(el) => {
                if el.remove_attribute(name) {
                    self.record(
                        node,
                        MutationKind::Attribute {
                            name: name.to_string(),
                        },
                    );
                }
                Ok(())
            }
            NodeData::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    /// Attribute value on an element, if the handle is live and the
    /// attribute present.
    pub fn attribute(&self, node: NodeRef, name: &str) -> Option<&str> {
        self.resolve(node)?.as_element()?.attribute(name)
    }

    // --- traversal ----------------------------------------------------

    /// Parent handle, if the node is live and attached.
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        let parent_id = self.resolve(node)?.parent?;
        Some(self.make_ref(parent_id))
    }

    /// Child handles in tree order.
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        match self.resolve(node) {
            Some(n) => n.children.iter().map(|&c| self.make_ref(c)).collect(),
            None => Vec::new(),
        }
    }

    /// Tag name, if the handle is a live element.
    pub fn tag(&self, node: NodeRef) -> Option<&str> {
        self.resolve(node)?.tag()
    }

    /// Character data, if the handle is a live text node.
    pub fn text(&self, node: NodeRef) -> Option<&str> {
        self.resolve(node)?.text()
    }

    /// Computed display of an element: inline `style` override first,
    /// then the tag-default table. Text nodes report `Inline`.
    pub fn display(&self, node: NodeRef) -> Display {
        let Some(n) = self.resolve(node) else {
            return Display::None;
        };
        match n.as_element() {
            Some(el) => el
                .attribute("style")
                .and_then(display_override)
                .unwrap_or_else(|| Display::for_tag(el.tag())),
            None => Display::Inline,
        }
    }

    /// All elements with one of the given tags, in document order.
    pub fn elements_by_tag(&self, tags: &[&str]) -> Vec<NodeRef> {
        let mut out = Vec::new();
        self.walk(self.root, &mut |doc, id| {
            if let Some(tag) = doc.nodes[id].tag() {
                if tags.contains(&tag) {
                    out.push(doc.make_ref(id));
                }
            }
        });
        out
    }

    /// Non-whitespace text nodes under `node`, depth-first, skipping
    /// subtrees that are not rendered (`display: none`).
    pub fn leaf_text_nodes(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let Some(id) = self.resolve_id(node) else {
            return out;
        };
        self.collect_leaf_text(id, &mut out);
        out
    }

    fn collect_leaf_text(&self, id: NodeId, out: &mut Vec<NodeRef>) {
        let node = &self.nodes[id];
        match &node.data {
            NodeData::Text(text) => {
                if !text.trim().is_empty() {
                    out.push(self.make_ref(id));
                }
            }
            NodeData::Element(_) => {
                if self.display(self.make_ref(id)) == Display::None {
                    return;
                }
                for &child in &node.children {
                    self.collect_leaf_text(child, out);
                }
            }
        }
    }

    /// Full flattened text of a subtree, the `textContent` equivalent,
    /// concatenating character data in tree order with no separators.
    pub fn flattened_text(&self, node: NodeRef) -> String {
        let mut out = String::new();
        if let Some(id) = self.resolve_id(node) {
            self.walk(id, &mut |doc, id| {
                if let Some(text) = doc.nodes[id].text() {
                    out.push_str(text);
                }
            });
        }
        out
    }

    fn walk(&self, id: NodeId, visit: &mut impl FnMut(&Self, NodeId)) {
        visit(self, id);
        for &child in &self.nodes[id].children {
            self.walk(child, visit);
        }
    }

    // --- observation --------------------------------------------------

    /// Start recording mutations matching `options`, clearing any
    /// leftover records first.
    pub fn observe(&mut self, options: ObserveOptions) {
        self.records.clear();
        self.observer = Some(options);
    }

    /// Stop recording mutations and drop anything queued.
    pub fn disconnect(&mut self) {
        self.observer = None;
        self.records.clear();
    }

    /// Drain the queued mutation records.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.records.drain(..).collect()
    }

    /// True when records are queued.
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    fn record(&mut self, target: NodeRef, kind: MutationKind) {
        if let Some(observer) = &self.observer {
            if observer.accepts(&kind) {
                self.records.push_back(MutationRecord { target, kind });
            }
        }
    }

    // --- serialization ------------------------------------------------

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> String {
        crate::serialize::to_html(self, self.root)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }

    pub(crate) fn head_id(&self) -> NodeId {
        self.head
    }

    pub(crate) fn body_id(&self) -> NodeId {
        self.body
    }

    pub(crate) fn alloc_in(&mut self, data: NodeData, parent: NodeId) -> NodeId {
        self.alloc(data, Some(parent))
    }

    pub(crate) fn set_element_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element(el) = &mut self.nodes[id].data {
            el.set_attribute(name, value);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_containers() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()), Some("html"));
        assert_eq!(doc.tag(doc.body()), Some("body"));
        assert_eq!(doc.parent(doc.body()), Some(doc.root()));
    }

    #[test]
    fn stale_ref_never_resolves_after_removal() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        assert!(doc.contains(div));

        doc.remove_node(div).unwrap();
        assert!(!doc.contains(div));
        assert!(doc.resolve(div).is_none());
        assert_eq!(doc.set_attribute(div, "dir", "rtl"), Err(DomError::Stale(div)));

        // A new node may reuse the slab slot, but the old handle still
        // resolves to nothing.
        let replacement = doc.create_element("p");
        doc.append_child(doc.body(), replacement).unwrap();
        assert!(!doc.contains(div));
        assert!(doc.contains(replacement));
    }

    #[test]
    fn subtree_removal_frees_descendants() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        let text = doc.create_text("hello");
        doc.append_child(div, text).unwrap();

        doc.remove_node(div).unwrap();
        assert!(!doc.contains(text));
    }

    #[test]
    fn records_honor_observe_options() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();

        doc.observe(ObserveOptions {
            child_list: true,
            character_data: true,
            attributes: true,
            attribute_filter: Some(vec!["dir".to_string()]),
        });

        let text = doc.create_text("hi");
        doc.append_child(div, text).unwrap();
        doc.set_text(text, "hello").unwrap();
        doc.set_attribute(div, "dir", "rtl").unwrap();
        doc.set_attribute(div, "class", "x").unwrap(); // filtered out

        let records = doc.take_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kind, MutationKind::ChildList);
        assert_eq!(records[0].target, div);
        assert_eq!(records[1].kind, MutationKind::CharacterData);
        assert_eq!(records[1].target, text);
        assert_eq!(
            records[2].kind,
            MutationKind::Attribute {
                name: "dir".to_string()
            }
        );
        assert!(!doc.has_records());
    }

    #[test]
    fn no_records_without_observation() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        assert!(!doc.has_records());

        doc.observe(ObserveOptions {
            child_list: true,
            ..Default::default()
        });
        doc.disconnect();
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p).unwrap();
        assert!(!doc.has_records());
    }

    #[test]
    fn leaf_text_skips_whitespace_and_unrendered() {
        let doc = Document::parse(
            "<div>  <p>visible</p> <span style=\"display:none\">hidden</span></div>",
        );
        let body = doc.body();
        let leaves = doc.leaf_text_nodes(body);
        assert_eq!(leaves.len(), 1);
        assert_eq!(doc.text(leaves[0]), Some("visible"));
        // flattened_text keeps everything, rendered or not
        assert!(doc.flattened_text(body).contains("hidden"));
    }

    #[test]
    fn flattened_text_concatenates_in_order() {
        let doc = Document::parse("<p>one <b>two</b> three</p>");
        assert_eq!(doc.flattened_text(doc.body()), "one two three");
    }
}
