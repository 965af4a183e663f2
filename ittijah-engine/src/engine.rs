//! The engine context object and its state machine

use crate::boundary::containing_boundary;
use crate::cache::DecisionCache;
use crate::control::{ControlMessage, Mode};
use crate::pass::{run_full_pass, strip_markings, DIR_ATTR, MARKER_ATTR};
use ittijah_core::PolicyConfig;
use ittijah_dom::{Document, MutationKind, ObserveOptions};
use tracing::info;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Passes run and mutations are observed
    Active,
    /// Nothing observed, no markings applied
    #[default]
    Suspended,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineConfig {
    /// Engine mode selector
    pub mode: Mode,
    /// Thresholds for the prose decision rule
    pub policy: PolicyConfig,
}

/// The direction-classification engine.
///
/// An explicit context object: construct it when the page script is
/// injected, `attach` it to a document to start, feed observed change
/// batches through `pump`, and `suspend` to revert. All work is
/// synchronous on the caller's thread; passes are not reentrant because
/// nothing here yields mid-pass.
#[derive(Debug, Default)]
pub struct DirectionEngine {
    config: EngineConfig,
    cache: DecisionCache,
    state: EngineState,
}

impl DirectionEngine {
    /// Create a suspended engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: DecisionCache::new(),
            state: EngineState::Suspended,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Configured mode.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Transition to Active: one immediate full pass, then observation.
    ///
    /// In force-document mode only the root is marked and nothing is
    /// observed, since there is no per-element state to keep fresh. Calling
    /// `attach` while already active is a no-op.
    pub fn attach(&mut self, doc: &mut Document) {
        if self.state() == EngineState::Active {
            return;
        }
        info!(mode = self.config.mode.as_str(), "engine attached");
        match self.config.mode {
            Mode::ForceDocument => {
                let root = doc.root();
                if doc.attribute(root, DIR_ATTR).is_none()
                    || doc.attribute(root, MARKER_ATTR).is_some()
                {
                    let _ = doc.set_attribute(root, DIR_ATTR, "rtl");
                    let _ = doc.set_attribute(root, MARKER_ATTR, "1");
                }
            }
            Mode::Heuristic => {
                run_full_pass(doc, &self.config.policy, &mut self.cache);
                doc.observe(ObserveOptions {
                    child_list: true,
                    character_data: true,
                    attributes: true,
                    attribute_filter: Some(vec![DIR_ATTR.to_string()]),
                });
            }
        }
        self.state = EngineState::Active;
    }

    /// Process one batch of observed mutations.
    ///
    /// Every distinct target is invalidated along with the boundaries
    /// containing it, then one full pass re-evaluates the document,
    /// but only when the batch carries a structural or character-data
    /// change. Attribute-only batches (including echoes of the engine's
    /// own `dir` writes) just invalidate.
    pub fn pump(&mut self, doc: &mut Document) {
        if self.state() != EngineState::Active {
            return;
        }
        let records = doc.take_records();
        if records.is_empty() {
            return;
        }
        let mut needs_pass = false;
        for record in &records {
            self.cache.invalidate(record.target);
            for boundary in containing_boundary(doc, record.target) {
                self.cache.invalidate(boundary);
            }
            needs_pass |= matches!(
                record.kind,
                MutationKind::ChildList | MutationKind::CharacterData
            );
        }
        if needs_pass {
            run_full_pass(doc, &self.config.policy, &mut self.cache);
        }
    }

    /// Transition to Suspended: stop observing, revert every applied
    /// marking (forced-LTR code blocks included), drop all cached
    /// verdicts. Native direction attributes are left untouched.
    pub fn suspend(&mut self, doc: &mut Document) {
        if self.state() != EngineState::Active {
            return;
        }
        info!("engine suspended");
        doc.disconnect();
        strip_markings(doc);
        self.cache.clear();
        self.state = EngineState::Suspended;
    }

    /// Apply a lifecycle control message, replacing the effect of any
    /// previous one: suspend first, then re-attach in the requested
    /// mode when enabled.
    pub fn apply(&mut self, doc: &mut Document, message: ControlMessage) {
        self.suspend(doc);
        self.config.mode = message.mode;
        if message.enabled {
            self.attach(doc);
        }
    }
}
