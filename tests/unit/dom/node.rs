use super::*;

fn row_with_items(doc: &mut Document, n: usize) -> NodeId {
    let row = doc.create_element("div");
    doc.set_attr(row, "class", "row").unwrap();
    for i in 0..n {
        let item = doc.create_element("span");
        let text = doc.create_text(&format!("item {i}"));
        doc.append_child(item, text).unwrap();
        doc.append_child(row, item).unwrap();
    }
    let body = doc.body();
    doc.append_child(body, row).unwrap();
    row
}

#[test]
fn new_document_has_head_and_body() {
    let doc = Document::new();
    assert_eq!(doc.tag(doc.document_element()), Some("html"));
    assert_eq!(doc.children(doc.document_element()), &[doc.head(), doc.body()]);
    assert!(doc.is_connected(doc.body()));
}

#[test]
fn append_rejects_cycles() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    doc.append_child(a, b).unwrap();
    assert!(doc.append_child(b, a).is_err());
    assert!(doc.append_child(a, a).is_err());
}

#[test]
fn element_children_skip_text() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 2);
    let ws = doc.create_text("\n  ");
    doc.append_child(row, ws).unwrap();
    assert_eq!(doc.children(row).len(), 3);
    assert_eq!(doc.element_children(row).len(), 2);
}

#[test]
fn replace_children_frees_old_nodes_and_invalidates_handles() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 2);
    let old = doc.element_children(row);
    let before = doc.live_node_count();

    let track = doc.create_element("div");
    doc.replace_children(row, &[track]).unwrap();

    assert_eq!(doc.children(row), &[track]);
    assert!(!doc.contains(old[0]));
    // two spans + two text nodes gone, one div added
    assert_eq!(doc.live_node_count(), before - 4 + 1);

    // freed slots are reused with a fresh generation
    let reused = doc.create_element("p");
    assert_ne!(reused, old[0]);
    assert!(doc.element(old[0]).is_none());
}

#[test]
fn snapshot_and_instantiate_round_trip_structure() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 3);
    let first = doc.element_children(row)[0];
    doc.set_attr(first, "onclick", "go()").unwrap();
    let frag = doc.snapshot_element_children(row).unwrap();
    assert_eq!(frag.len(), 3);

    let copies = doc.instantiate_fragment(&frag);
    assert_eq!(copies.len(), 3);
    assert!(!doc.is_connected(copies[0]));
    assert_eq!(doc.attr(copies[0], "onclick"), Some("go()"));
    assert_eq!(doc.text_content(copies[2]), "item 2");
}

#[test]
fn class_list_operations() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 0);
    doc.add_class(row, "pause").unwrap();
    doc.add_class(row, "pause").unwrap();
    assert_eq!(doc.attr(row, "class"), Some("row pause"));
    doc.remove_class(row, "pause").unwrap();
    assert_eq!(doc.attr(row, "class"), Some("row"));
    assert!(doc.has_class(row, "row"));
}

#[test]
fn data_attributes_resolve_by_suffix() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 0);
    doc.set_attr(row, "data-px-per-sec", "80").unwrap();
    doc.set_attr(row, "data-dir", "Right").unwrap();
    assert_eq!(doc.data_attr(row, "px-per-sec"), Some("80"));
    assert_eq!(doc.data_attr(row, "dir"), Some("Right"));
    assert_eq!(doc.data_attr(row, "missing"), None);
}

#[test]
fn paint_only_style_changes_keep_layout_revision() {
    let mut doc = Document::new();
    let row = row_with_items(&mut doc, 1);
    let rev = doc.layout_revision();
    let paint = doc.paint_revision();
    doc.set_style_property(row, "transform", "translate3d(-10px, 0, 0)")
        .unwrap();
    doc.set_style_property(row, "animation-play-state", "paused")
        .unwrap();
    assert_eq!(doc.layout_revision(), rev);
    assert_eq!(doc.paint_revision(), paint + 2);
    doc.set_style_property(row, "width", "10px").unwrap();
    assert!(doc.layout_revision() > rev);
}

#[test]
fn style_text_changes_bump_sheet_revision() {
    let mut doc = Document::new();
    let style = doc.create_element("style");
    let head = doc.head();
    doc.append_child(head, style).unwrap();
    let rev = doc.sheet_revision();
    doc.set_text_content(style, ".a { width: 1px }").unwrap();
    assert!(doc.sheet_revision() > rev);
    let rev = doc.sheet_revision();
    doc.destroy(style).unwrap();
    assert!(doc.sheet_revision() > rev);
}

#[test]
fn get_element_by_id_only_sees_connected_nodes() {
    let mut doc = Document::new();
    let el = doc.create_element("style");
    doc.set_attr(el, "id", "dyn").unwrap();
    assert_eq!(doc.get_element_by_id("dyn"), None);
    let head = doc.head();
    doc.append_child(head, el).unwrap();
    assert_eq!(doc.get_element_by_id("dyn"), Some(el));
}

#[test]
fn structural_nodes_cannot_be_removed() {
    let mut doc = Document::new();
    let body = doc.body();
    assert!(doc.remove(body).is_err());
}
