//! The full classification pass
//!
//! One pass covers the whole document in four stages: headings, list
//! containers, prose boundaries, then the forced-LTR override for code
//! blocks. Every write is marker-guarded so cleanup can later strip
//! exactly what the engine applied and nothing the page set itself.

use crate::aggregate::aggregate;
use crate::boundary::{is_list_container, resolve_boundary, LIST_TAGS};
use crate::cache::DecisionCache;
use ittijah_core::{arabic_leading, PolicyConfig, Verdict};
use ittijah_dom::{Document, NodeRef};
use std::collections::HashSet;
use tracing::{debug, trace};

/// The direction attribute the engine writes.
pub const DIR_ATTR: &str = "dir";

/// Marker attribute distinguishing engine-applied direction from
/// direction the page set natively; cleanup only ever strips marked
/// elements.
pub const MARKER_ATTR: &str = "data-ittijah";

pub(crate) const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const CODE_BLOCK_TAGS: &[&str] = &["pre"];

/// Counts of elements touched by one pass, for instrumentation.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PassStats {
    headings: usize,
    lists: usize,
    boundaries: usize,
    code_blocks: usize,
}

/// True when the element carries a direction the engine did not apply.
/// Such elements are site-intentional and never touched.
fn has_native_dir(doc: &Document, node: NodeRef) -> bool {
    doc.attribute(node, DIR_ATTR).is_some() && doc.attribute(node, MARKER_ATTR).is_none()
}

/// Write a verdict onto an element, marker-guarded. Races with removal
/// are silent no-ops.
fn apply_verdict(doc: &mut Document, node: NodeRef, verdict: Verdict) {
    if !doc.contains(node) || has_native_dir(doc, node) {
        return;
    }
    trace!(?verdict, tag = ?doc.tag(node), "apply verdict");
    match verdict {
        Verdict::Rtl => {
            let _ = doc.set_attribute(node, DIR_ATTR, "rtl");
            let _ = doc.set_attribute(node, MARKER_ATTR, "1");
        }
        Verdict::None => {
            if doc.attribute(node, MARKER_ATTR).is_some() {
                let _ = doc.remove_attribute(node, DIR_ATTR);
                let _ = doc.remove_attribute(node, MARKER_ATTR);
            }
        }
    }
}

/// Force a code block to read left-to-right regardless of ancestor
/// verdicts.
fn force_ltr(doc: &mut Document, node: NodeRef) {
    if !doc.contains(node) || has_native_dir(doc, node) {
        return;
    }
    let _ = doc.set_attribute(node, DIR_ATTR, "ltr");
    let _ = doc.set_attribute(node, MARKER_ATTR, "1");
}

/// First-hit list rule: Rtl as soon as any leaf text run in any item
/// leads with an Arabic token.
pub(crate) fn decide_list(doc: &Document, list: NodeRef) -> Verdict {
    for item in doc.children(list) {
        for leaf in doc.leaf_text_nodes(item) {
            let Some(text) = doc.text(leaf) else { continue };
            if let Some(token) = text.split_whitespace().next() {
                if arabic_leading(token) {
                    return Verdict::Rtl;
                }
            }
        }
    }
    Verdict::None
}

/// Run one full classification pass over the document.
pub(crate) fn run_full_pass(
    doc: &mut Document,
    policy: &PolicyConfig,
    cache: &mut DecisionCache,
) -> PassStats {
    let mut stats = PassStats::default();

    // Stage 1: headings, presence rule, uncached; they are cheap and
    // short.
    for heading in doc.elements_by_tag(HEADING_TAGS) {
        let word_stats = aggregate(doc, heading);
        apply_verdict(doc, heading, policy.decide_heading(&word_stats));
        stats.headings += 1;
    }

    // Stage 2: list containers, first-hit rule, cached.
    for list in doc.elements_by_tag(LIST_TAGS) {
        if has_native_dir(doc, list) {
            continue;
        }
        let verdict = match cache.get(doc, list) {
            Some(verdict) => verdict,
            None => {
                let verdict = decide_list(doc, list);
                cache.insert(list, verdict);
                verdict
            }
        };
        apply_verdict(doc, list, verdict);
        stats.lists += 1;
    }

    // Stage 3: prose boundaries discovered through leaf text nodes of
    // each top-level content element, each boundary at most once per
    // pass. Headings and lists already got their finer-grained rules.
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
            let verdict = match cache.get(doc, boundary) {
                Some(verdict) => verdict,
                None => {
                    let verdict = policy.decide_prose(&aggregate(doc, boundary));
                    cache.insert(boundary, verdict);
                    verdict
                }
            };
            apply_verdict(doc, boundary, verdict);
            stats.boundaries += 1;
        }
    }

    // Stage 4: code blocks always end the pass left-to-right, whatever
    // an ancestor verdict did.
    for code_block in doc.elements_by_tag(CODE_BLOCK_TAGS) {
        force_ltr(doc, code_block);
        stats.code_blocks += 1;
    }

    cache.sweep(doc);
    debug!(
        headings = stats.headings,
        lists = stats.lists,
        boundaries = stats.boundaries,
        code_blocks = stats.code_blocks,
        "full pass complete"
    );
    stats
}

/// Remove every engine-applied marking from the document. Elements
/// carrying a direction the engine did not set are left untouched.
pub(crate) fn strip_markings(doc: &mut Document) {
    let mut stack = vec![doc.root()];
    while let Some(node) = stack.pop() {
        if doc.attribute(node, MARKER_ATTR).is_some() {
            let _ = doc.remove_attribute(node, DIR_ATTR);
            let _ = doc.remove_attribute(node, MARKER_ATTR);
        }
        stack.extend(doc.children(node));
    }
}
