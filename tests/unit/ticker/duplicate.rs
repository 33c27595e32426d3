use super::*;
use crate::dom::markup::{fragment_html, inner_html};

fn row_with(doc: &mut Document, items: &[&str]) -> NodeId {
    let row = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, row).unwrap();
    for text in items {
        let item = doc.create_element("span");
        doc.set_attr(item, "onclick", "go(\"x\")").unwrap();
        let t = doc.create_text(text);
        doc.append_child(item, t).unwrap();
        doc.append_child(row, item).unwrap();
    }
    // stray text between items is not content
    let stray = doc.create_text("  ");
    doc.append_child(row, stray).unwrap();
    row
}

#[test]
fn track_holds_the_content_exactly_twice() {
    let mut doc = Document::new();
    let row = row_with(&mut doc, &["A & B", "C"]);
    let content = doc.snapshot_element_children(row).unwrap();
    let original = fragment_html(&content);

    let track = build_track(&mut doc, row, &content, "track").unwrap().unwrap();
    assert_eq!(doc.children(row), &[track]);
    assert!(doc.has_class(track, "track"));
    assert_eq!(doc.element_children(track).len(), 4);
    let doubled = inner_html(&doc, track);
    assert_eq!(doubled, format!("{original}{original}"));
    assert!(doubled.contains("onclick"));
}

#[test]
fn rebuilding_from_the_snapshot_never_compounds() {
    let mut doc = Document::new();
    let row = row_with(&mut doc, &["A", "B", "C"]);
    let content = doc.snapshot_element_children(row).unwrap();
    build_track(&mut doc, row, &content, "track").unwrap();
    let before = doc.live_node_count();
    let track = build_track(&mut doc, row, &content, "track").unwrap().unwrap();
    assert_eq!(doc.element_children(track).len(), 6);
    assert_eq!(doc.live_node_count(), before);
}

#[test]
fn empty_content_builds_nothing() {
    let mut doc = Document::new();
    let row = row_with(&mut doc, &[]);
    let content = doc.snapshot_element_children(row).unwrap();
    assert!(content.is_empty());
    assert_eq!(build_track(&mut doc, row, &content, "track").unwrap(), None);
    assert_eq!(doc.children(row).len(), 1);
}
