//! Engine control messages
//!
//! The extension plumbing delivers lifecycle messages as JSON; this
//! module is the DTO surface the engine consumes. Unknown mode strings
//! deliberately fall back to the heuristic engine (a policy mismatch
//! must not disable direction handling), while malformed JSON is a real
//! error the caller should see.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which engine the page runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Per-element heuristic classification
    #[default]
    Heuristic,
    /// Mark only the document root rtl, bypassing analysis
    ForceDocument,
}

impl Mode {
    /// Parse a mode selector. Unrecognized values select the heuristic
    /// engine rather than failing.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "force-document" | "force_document" | "force" | "document" => Mode::ForceDocument,
            _ => Mode::Heuristic,
        }
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Heuristic => "heuristic",
            Mode::ForceDocument => "force-document",
        }
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Mode::parse(&value))
    }
}

/// Lifecycle control message: should the engine run on this page, and
/// in which mode. Deliverable at any time after load; applying one
/// replaces the effect of any previous message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMessage {
    /// Whether the engine should be active on this page
    pub enabled: bool,
    /// Engine mode selector
    #[serde(default)]
    pub mode: Mode,
}

impl ControlMessage {
    /// Parse a control message from its JSON wire form.
    pub fn from_json(input: &str) -> Result<Self, ControlError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Errors from the control surface.
#[derive(Error, Debug)]
pub enum ControlError {
    /// The control message was not valid JSON for the expected shape
    #[error("malformed control message: {0}")]
    Malformed(#[from] serde_json::Error),
}
