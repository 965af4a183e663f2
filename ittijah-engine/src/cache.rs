//! Per-boundary verdict cache
//!
//! Keyed by generation-stamped node identity, not by content: a handle
//! to a removed node never resolves again, so `get` can cheaply refuse
//! to answer for elements the document no longer holds. The end-of-pass
//! sweep drops those entries so the map does not outlive removed
//! subtrees.

use ittijah_core::Verdict;
use ittijah_dom::{Document, NodeRef};
use std::collections::HashMap;

/// Memoized direction verdicts per boundary element.
#[derive(Debug, Default)]
pub struct DecisionCache {
    map: HashMap<NodeRef, Verdict>,
}

impl DecisionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached verdict for a live element. A hit is only reported while
    /// the handle still resolves in `doc`.
    pub fn get(&self, doc: &Document, node: NodeRef) -> Option<Verdict> {
        if !doc.contains(node) {
            return None;
        }
        self.map.get(&node).copied()
    }

    /// Store a verdict.
    pub fn insert(&mut self, node: NodeRef, verdict: Verdict) {
        self.map.insert(node, verdict);
    }

    /// Drop the entry for a node, forcing recomputation on the next
    /// pass.
    pub fn invalidate(&mut self, node: NodeRef) {
        self.map.remove(&node);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Drop entries whose element no longer exists in the document.
    pub fn sweep(&mut self, doc: &Document) {
        self.map.retain(|&node, _| doc.contains(node));
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no verdicts are cached.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
