//! Mutable document tree for the ittijah direction engine
//!
//! A slab-arena DOM with just enough surface for direction classification:
//! elements with attributes and a resolved display type, text nodes, a
//! lenient HTML parser, and a mutation record log standing in for a host
//! MutationObserver. Node identity is generation-stamped, so a handle to a
//! removed node can never alias a later occupant of the same arena slot.

#![warn(missing_docs)]

pub mod display;
pub mod document;
pub mod error;
mod html;
pub mod mutation;
pub mod node;
mod serialize;

// Re-export key types
pub use display::Display;
pub use document::Document;
pub use error::DomError;
pub use mutation::{MutationKind, MutationRecord, ObserveOptions};
pub use node::{ElementData, Node, NodeData, NodeId, NodeRef};
