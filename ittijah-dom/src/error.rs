//! Error type for document operations

use crate::node::NodeRef;
use thiserror::Error;

/// Errors returned by fallible document operations.
///
/// Stale handles are the normal failure mode: a caller held a `NodeRef`
/// across a mutation that removed the node. Treating that as data rather
/// than a panic lets callers skip and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The referenced node no longer exists in this document
    #[error("stale node reference {0:?}")]
    Stale(NodeRef),

    /// The operation requires an element node
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeRef),

    /// The operation requires a text node
    #[error("node {0:?} is not a text node")]
    NotAText(NodeRef),
}
