//! Node storage types

/// Index of a node slot in the document arena.
pub type NodeId = usize;

/// Generation-stamped node handle.
///
/// Arena slots are reused after removal, but the generation counter is
/// document-global and never repeats, so a `NodeRef` taken before a
/// removal can never resolve to whatever node later occupies the slot.
/// Holding a `NodeRef` keeps nothing alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Arena slot index
    pub id: NodeId,
    /// Creation stamp of the node this handle was taken from
    pub generation: u64,
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// An element with a tag and attributes
    Element(ElementData),
    /// Character data
    Text(String),
}

/// Element payload: lower-cased tag name and attributes in insertion
/// order.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create element data for a tag, lower-casing the name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// The lower-cased tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when the attribute is present, whatever its value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Remove an attribute; returns whether it was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(n, _)| n != name);
        self.attrs.len() != before
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) generation: u64,
    pub(crate) data: NodeData,
}

impl Node {
    /// The node payload.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Element payload, if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(ElementData::tag)
    }

    /// Character data, if this is a text node.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text.as_str()),
            NodeData::Element(_) => None,
        }
    }

    /// True for element nodes.
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }
}
