//! Read-only verdict reporting
//!
//! Runs the same discovery and rules as a full pass without touching
//! the document, for callers that want to inspect decisions rather than
//! apply them.

use crate::aggregate::aggregate;
use crate::boundary::{is_list_container, resolve_boundary, LIST_TAGS};
use crate::pass::{decide_list, HEADING_TAGS};
use ittijah_core::{PolicyConfig, Verdict, WordStats};
use ittijah_dom::{Document, NodeRef};
use serde::Serialize;
use std::collections::HashSet;

/// Which rule produced a reported verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Presence rule for headings
    Heading,
    /// First-hit rule for list containers
    List,
    /// Ratio-and-run rule for prose boundaries
    Prose,
}

/// One element's would-be verdict and the statistics behind it.
#[derive(Debug, Clone, Serialize)]
pub struct ElementReport {
    /// Tag name of the element
    pub tag: String,
    /// The rule that applied
    pub rule: RuleKind,
    /// The verdict the engine would write
    pub verdict: Verdict,
    /// Non-empty tokens in the element's aggregated text
    pub total_tokens: usize,
    /// Arabic-leading tokens
    pub arabic_tokens: usize,
    /// Latin-leading tokens
    pub latin_tokens: usize,
    /// Longest unbroken Arabic run
    pub max_arabic_run: usize,
    /// Longest unbroken Latin run
    pub max_latin_run: usize,
}

impl ElementReport {
    fn new(doc: &Document, node: NodeRef, rule: RuleKind, verdict: Verdict, stats: WordStats) -> Self {
        Self {
            tag: doc.tag(node).unwrap_or_default().to_string(),
            rule,
            verdict,
            total_tokens: stats.total,
            arabic_tokens: stats.arabic,
            latin_tokens: stats.latin,
            max_arabic_run: stats.max_arabic_run,
            max_latin_run: stats.max_latin_run,
        }
    }
}

/// Report the verdict every discovered element would receive, in the
/// same stage order as a full pass.
pub fn report(doc: &Document, policy: &PolicyConfig) -> Vec<ElementReport> {
    let mut out = Vec::new();

    for heading in doc.elements_by_tag(HEADING_TAGS) {
        let stats = aggregate(doc, heading);
        let verdict = policy.decide_heading(&stats);
        out.push(ElementReport::new(doc, heading, RuleKind::Heading, verdict, stats));
    }

    for list in doc.elements_by_tag(LIST_TAGS) {
        let stats = aggregate(doc, list);
        let verdict = decide_list(doc, list);
        out.push(ElementReport::new(doc, list, RuleKind::List, verdict, stats));
    }

    let mut processed: HashSet<NodeRef> = HashSet::new();
    for top in doc.children(doc.body()) {
        for leaf in doc.leaf_text_nodes(top) {
            let Some(boundary) = resolve_boundary(doc, leaf) else {
                continue;
            };
            if !processed.insert(boundary) {
                continue;
            }
            let tag = doc.tag(boundary).unwrap_or_default();
            if HEADING_TAGS.contains(&tag) || is_list_container(doc, boundary) {
                continue;
            }
            let stats = aggregate(doc, boundary);
            let verdict = policy.decide_prose(&stats);
            out.push(ElementReport::new(doc, boundary, RuleKind::Prose, verdict, stats));
        }
    }

    out
}
