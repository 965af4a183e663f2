//! End-to-end tests for the direction engine

use ittijah_dom::{Document, NodeRef};
use ittijah_engine::{
    ControlMessage, DirectionEngine, EngineConfig, EngineState, Mode, DIR_ATTR, MARKER_ATTR,
};

fn first_by_tag(doc: &Document, tag: &str) -> NodeRef {
    doc.elements_by_tag(&[tag])[0]
}

fn dir_of(doc: &Document, node: NodeRef) -> Option<String> {
    doc.attribute(node, DIR_ATTR).map(str::to_string)
}

fn is_marked(doc: &Document, node: NodeRef) -> bool {
    doc.attribute(node, MARKER_ATTR).is_some()
}

#[test]
fn heading_rule_any_arabic_token() {
    let mut doc = Document::parse("<h1>مرحبا World</h1><h2>Hello World</h2>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let h1 = first_by_tag(&doc, "h1");
    let h2 = first_by_tag(&doc, "h2");
    assert_eq!(dir_of(&doc, h1).as_deref(), Some("rtl"));
    assert!(is_marked(&doc, h1));
    assert_eq!(dir_of(&doc, h2), None);
    assert!(!is_marked(&doc, h2));
}

#[test]
fn list_rule_first_hit() {
    let mut doc = Document::parse(
        "<ul id=\"a\"><li>Hello</li><li>مرحبا</li></ul>\
         <ul id=\"b\"><li>Hello</li><li>World</li></ul>",
    );
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let lists = doc.elements_by_tag(&["ul"]);
    assert_eq!(dir_of(&doc, lists[0]).as_deref(), Some("rtl"));
    assert_eq!(dir_of(&doc, lists[1]), None);
}

#[test]
fn prose_rule_ratio_and_run() {
    // ratio 0.667, Arabic run 2 -> rtl
    let mut doc = Document::parse("<p>مرحبا بالعالم hello</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);
    assert_eq!(dir_of(&doc, first_by_tag(&doc, "p")).as_deref(), Some("rtl"));

    // Arabic run only 1 -> none
    let mut doc = Document::parse("<p>hello world مرحبا</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);
    assert_eq!(dir_of(&doc, first_by_tag(&doc, "p")), None);

    // Latin run of 4 disqualifies despite strong Arabic signal
    let mut doc = Document::parse("<p>hello world test code مرحبا بالعالم مرحبا</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);
    assert_eq!(dir_of(&doc, first_by_tag(&doc, "p")), None);
}

#[test]
fn boundary_granularity_inline_never_flips() {
    let mut doc = Document::parse("<div><span>مرحبا</span> <span>بالعالم</span></div>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let div = first_by_tag(&doc, "div");
    assert_eq!(dir_of(&doc, div).as_deref(), Some("rtl"));
    for span in doc.elements_by_tag(&["span"]) {
        assert_eq!(dir_of(&doc, span), None);
    }
}

#[test]
fn code_block_forced_ltr_inside_rtl_boundary() {
    let mut doc = Document::parse(
        "<div><span>مرحبا بالعالم مرحبا بالعالم</span><pre>مرحبا بالعالم</pre></div>",
    );
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let div = first_by_tag(&doc, "div");
    let pre = first_by_tag(&doc, "pre");
    assert_eq!(dir_of(&doc, div).as_deref(), Some("rtl"));
    // The code block's own text is Arabic, its ancestor is rtl, and it
    // still must read ltr.
    assert_eq!(dir_of(&doc, pre).as_deref(), Some("ltr"));
    assert!(is_marked(&doc, pre));
}

#[test]
fn text_change_invalidates_and_recomputes() {
    let mut doc = Document::parse("<p>مرحبا بالعالم</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let p = first_by_tag(&doc, "p");
    assert_eq!(dir_of(&doc, p).as_deref(), Some("rtl"));

    // Replace the Arabic text with English; the cached verdict must not
    // survive the character-data mutation.
    let leaf = doc.leaf_text_nodes(p)[0];
    doc.set_text(leaf, "plain english text").unwrap();
    engine.pump(&mut doc);

    assert_eq!(dir_of(&doc, p), None);
    assert!(!is_marked(&doc, p));
}

#[test]
fn injected_subtree_is_classified() {
    let mut doc = Document::parse("<p>hello world</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    doc.insert_html(doc.body(), "<div>مرحبا بالعالم اليوم</div>")
        .unwrap();
    engine.pump(&mut doc);

    let div = first_by_tag(&doc, "div");
    assert_eq!(dir_of(&doc, div).as_deref(), Some("rtl"));
}

#[test]
fn removal_between_passes_is_harmless() {
    let mut doc = Document::parse("<div>مرحبا بالعالم</div><p>مرحبا بالعالم</p>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let div = first_by_tag(&doc, "div");
    doc.remove_node(div).unwrap();
    // The pass after removal skips the vanished element and keeps the
    // rest of the document correct.
    engine.pump(&mut doc);
    assert_eq!(dir_of(&doc, first_by_tag(&doc, "p")).as_deref(), Some("rtl"));
}

#[test]
fn native_direction_is_never_touched() {
    let mut doc = Document::parse(
        "<div dir=\"ltr\">مرحبا بالعالم مرحبا</div><p dir=\"auto\">مرحبا بالعالم</p>",
    );
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    let div = first_by_tag(&doc, "div");
    let p = first_by_tag(&doc, "p");
    assert_eq!(dir_of(&doc, div).as_deref(), Some("ltr"));
    assert!(!is_marked(&doc, div));
    assert_eq!(dir_of(&doc, p).as_deref(), Some("auto"));
    assert!(!is_marked(&doc, p));

    engine.suspend(&mut doc);
    assert_eq!(dir_of(&doc, div).as_deref(), Some("ltr"));
    assert_eq!(dir_of(&doc, p).as_deref(), Some("auto"));
}

#[test]
fn suspension_strips_every_marking() {
    let mut doc = Document::parse(
        "<h1>مرحبا</h1><ul><li>مرحبا</li></ul><p>مرحبا بالعالم</p><pre>code</pre>",
    );
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);
    assert_eq!(engine.state(), EngineState::Active);

    engine.suspend(&mut doc);
    assert_eq!(engine.state(), EngineState::Suspended);

    let mut stack = vec![doc.root()];
    while let Some(node) = stack.pop() {
        assert_eq!(doc.attribute(node, MARKER_ATTR), None);
        assert_eq!(doc.attribute(node, DIR_ATTR), None);
        stack.extend(doc.children(node));
    }

    // Suspended engines ignore further mutations.
    doc.insert_html(doc.body(), "<div>مرحبا بالعالم</div>").unwrap();
    engine.pump(&mut doc);
    let div = first_by_tag(&doc, "div");
    assert_eq!(dir_of(&doc, div), None);
}

#[test]
fn force_document_mode_marks_only_the_root() {
    let mut doc = Document::parse("<p>hello world</p>");
    let mut engine = DirectionEngine::new(EngineConfig {
        mode: Mode::ForceDocument,
        ..Default::default()
    });
    engine.attach(&mut doc);

    assert_eq!(dir_of(&doc, doc.root()).as_deref(), Some("rtl"));
    assert!(is_marked(&doc, doc.root()));
    assert_eq!(dir_of(&doc, first_by_tag(&doc, "p")), None);
}

#[test]
fn control_messages_replace_previous_effect() {
    let mut doc = Document::parse("<p>مرحبا بالعالم</p>");
    let mut engine = DirectionEngine::default();

    engine.apply(
        &mut doc,
        ControlMessage {
            enabled: true,
            mode: Mode::Heuristic,
        },
    );
    let p = first_by_tag(&doc, "p");
    assert_eq!(dir_of(&doc, p).as_deref(), Some("rtl"));

    // Switching to force-document strips the per-element marking and
    // marks the root instead.
    engine.apply(
        &mut doc,
        ControlMessage {
            enabled: true,
            mode: Mode::ForceDocument,
        },
    );
    assert_eq!(dir_of(&doc, p), None);
    assert_eq!(dir_of(&doc, doc.root()).as_deref(), Some("rtl"));

    // Disabling reverts everything.
    engine.apply(
        &mut doc,
        ControlMessage {
            enabled: false,
            mode: Mode::Heuristic,
        },
    );
    assert_eq!(dir_of(&doc, doc.root()), None);
    assert_eq!(dir_of(&doc, p), None);
    assert_eq!(engine.state(), EngineState::Suspended);
}

#[test]
fn unknown_mode_falls_back_to_heuristic() {
    let mut doc = Document::parse("<p>مرحبا بالعالم</p>");
    let mut engine = DirectionEngine::default();
    let message =
        ControlMessage::from_json(r#"{"enabled":true,"mode":"something-new"}"#).unwrap();
    engine.apply(&mut doc, message);

    assert_eq!(engine.mode(), Mode::Heuristic);
    assert_eq!(
        dir_of(&doc, first_by_tag(&doc, "p")).as_deref(),
        Some("rtl")
    );
}

#[test]
fn external_dir_interference_is_observed_without_looping() {
    let mut doc = Document::parse("<p>مرحبا بالعالم</p><div>hello</div>");
    let mut engine = DirectionEngine::default();
    engine.attach(&mut doc);

    // The page overwrites a direction by hand. The attribute batch only
    // invalidates; no structural change means no re-pass, and the next
    // structural batch recomputes from scratch.
    let div = first_by_tag(&doc, "div");
    doc.set_attribute(div, "dir", "rtl").unwrap();
    engine.pump(&mut doc);
    assert_eq!(dir_of(&doc, div).as_deref(), Some("rtl"));

    doc.insert_html(doc.body(), "<p>more text here</p>").unwrap();
    engine.pump(&mut doc);
    // The hand-set dir carries no marker, so the engine now treats it
    // as native and leaves it alone.
    assert_eq!(dir_of(&doc, div).as_deref(), Some("rtl"));
    assert!(!is_marked(&doc, div));
}
