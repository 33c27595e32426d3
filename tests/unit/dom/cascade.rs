use super::*;

fn doc_with_sheet(css: &str) -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let style = doc.create_element("style");
    let head = doc.head();
    doc.append_child(head, style).unwrap();
    doc.set_text_content(style, css).unwrap();

    let body = doc.body();
    let row = doc.create_element("div");
    doc.set_attr(row, "class", "row").unwrap();
    doc.append_child(body, row).unwrap();
    let track = doc.create_element("div");
    doc.set_attr(track, "class", "track").unwrap();
    doc.append_child(row, track).unwrap();
    (doc, row, track)
}

#[test]
fn later_rules_and_inline_style_win() {
    let (mut doc, row, _) = doc_with_sheet(".row { width: 10px } div.row { width: 20px }");
    let r = StyleResolver::from_document(&doc);
    assert_eq!(r.computed(&doc, row).px("width"), Some(20.0));
    doc.set_style_property(row, "width", "30px").unwrap();
    assert_eq!(r.computed(&doc, row).px("width"), Some(30.0));
}

#[test]
fn inherited_and_custom_properties_flow_down() {
    let (mut doc, _, track) = doc_with_sheet(".row { white-space: nowrap; width: 5px }");
    let root = doc.document_element();
    doc.set_style_property(root, "--px-per-sec", "55").unwrap();
    let r = StyleResolver::from_document(&doc);
    let style = r.computed(&doc, track);
    assert!(style.is_nowrap());
    assert_eq!(style.get("--px-per-sec"), Some("55"));
    // non-inherited
    assert_eq!(style.get("width"), None);
}

#[test]
fn pause_class_rule_pauses_descendant_track() {
    let (mut doc, row, track) =
        doc_with_sheet(".row.pause .track { animation-play-state: paused; }");
    let r = StyleResolver::from_document(&doc);
    assert!(!r.computed(&doc, track).is_paused());
    doc.add_class(row, "pause").unwrap();
    assert!(r.computed(&doc, track).is_paused());
}

#[test]
fn shorthands_expand() {
    let (doc, row, _) = doc_with_sheet(".row { padding: 1px 2px; margin: 4px; gap: 8px }");
    let style = StyleResolver::from_document(&doc).computed(&doc, row);
    assert_eq!(style.px("padding-top"), Some(1.0));
    assert_eq!(style.px("padding-left"), Some(2.0));
    assert_eq!(style.px("margin-right"), Some(4.0));
    assert_eq!(style.px("column-gap"), Some(8.0));
}

#[test]
fn display_defaults_by_tag() {
    let style = ComputedStyle::default();
    assert_eq!(style.display("div"), "block");
    assert_eq!(style.display("span"), "inline");
    assert_eq!(style.display("style"), "none");
}

#[test]
fn animation_accessors() {
    let (mut doc, _, track) = doc_with_sheet("");
    doc.set_style_property(track, "animation-name", "ticker_move_0")
        .unwrap();
    doc.set_style_property(track, "animation-duration", "7.5s")
        .unwrap();
    doc.set_style_property(track, "animation-iteration-count", "infinite")
        .unwrap();
    let style = StyleResolver::from_document(&doc).computed(&doc, track);
    assert_eq!(style.animation_name(), Some("ticker_move_0"));
    assert_eq!(style.animation_duration_ms(), Some(7500.0));
    assert_eq!(style.animation_iterations(), None);
}

#[test]
fn animation_shorthand_expands_to_longhands() {
    let (doc, _, track) = doc_with_sheet(".track { animation: slide 2s linear infinite }");
    let style = StyleResolver::from_document(&doc).computed(&doc, track);
    assert_eq!(style.animation_name(), Some("slide"));
    assert_eq!(style.animation_duration_ms(), Some(2000.0));
    assert_eq!(style.get("animation-timing-function"), Some("linear"));
    assert_eq!(style.animation_iterations(), None);
    assert!(!style.is_paused());
}
