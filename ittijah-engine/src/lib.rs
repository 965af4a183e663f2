//! Direction-classification engine
//!
//! Decides, per block-level container of a document, whether its text is
//! predominantly Arabic-script and applies `dir="rtl"` accordingly,
//! keeping verdicts correct as the document mutates. The engine is an
//! explicit context object with an Active/Suspended state machine: while
//! active it observes document mutations and re-evaluates; suspension
//! reverts every marking it applied and nothing else.

#![warn(missing_docs)]

pub mod aggregate;
pub mod boundary;
pub mod cache;
pub mod control;
pub mod engine;
mod pass;
pub mod report;

// Re-export key types
pub use aggregate::aggregate;
pub use boundary::{containing_boundary, resolve_boundary};
pub use cache::DecisionCache;
pub use control::{ControlError, ControlMessage, Mode};
pub use engine::{DirectionEngine, EngineConfig, EngineState};
pub use pass::{DIR_ATTR, MARKER_ATTR};
pub use report::{report, ElementReport, RuleKind};

// Re-export from core for convenience
pub use ittijah_core::{PolicyConfig, Verdict, WordStats};
