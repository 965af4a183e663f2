//! Mutation records
//!
//! The host-browser MutationObserver is modeled as an explicit record
//! queue on the document: structural and character-data edits append
//! records while observation is on, and a single consumer drains them
//! with [`crate::Document::take_records`]. Batching is whatever the
//! caller accumulates between drains.

use crate::node::NodeRef;

/// What kind of change a record describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// The target's child list changed (insertion or removal)
    ChildList,
    /// The target text node's character data changed
    CharacterData,
    /// An attribute on the target element changed
    Attribute {
        /// The attribute name that changed
        name: String,
    },
}

/// One observed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// The node the change happened on. For `ChildList` this is the
    /// parent whose children changed, matching observer semantics.
    pub target: NodeRef,
    /// The kind of change
    pub kind: MutationKind,
}

/// Which changes the document should record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Record child-list changes
    pub child_list: bool,
    /// Record character-data changes
    pub character_data: bool,
    /// Record attribute changes
    pub attributes: bool,
    /// When attributes are recorded, restrict to these names
    /// (`None` = all attributes)
    pub attribute_filter: Option<Vec<String>>,
}

impl ObserveOptions {
    /// True when a record of this kind should be kept.
    pub(crate) fn accepts(&self, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::CharacterData => self.character_data,
            MutationKind::Attribute { name } => {
                self.attributes
                    && self
                        .attribute_filter
                        .as_ref()
                        .map_or(true, |filter| filter.iter().any(|f| f == name))
            }
        }
    }
}
