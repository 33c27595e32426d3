use super::*;

#[test]
fn serializes_attributes_style_and_escapes() {
    let mut doc = Document::new();
    let body = doc.body();
    let a = doc.create_element("a");
    doc.set_attr(a, "href", "/x?a=1&b=\"2\"").unwrap();
    doc.set_style_property(a, "color", "red").unwrap();
    let t = doc.create_text("1 < 2 & 3");
    doc.append_child(a, t).unwrap();
    doc.append_child(body, a).unwrap();

    assert_eq!(
        outer_html(&doc, a),
        "<a href=\"/x?a=1&amp;b=&quot;2&quot;\" style=\"color: red;\">1 &lt; 2 &amp; 3</a>"
    );
    assert_eq!(inner_html(&doc, body), outer_html(&doc, a));
}

#[test]
fn void_and_raw_text_elements() {
    let mut doc = Document::new();
    let head = doc.head();
    let style = doc.create_element("style");
    doc.append_child(head, style).unwrap();
    doc.set_text_content(style, ".a > .b { }").unwrap();
    let img = doc.create_element("img");
    doc.set_attr(img, "src", "x.png").unwrap();
    doc.append_child(head, img).unwrap();

    assert_eq!(
        inner_html(&doc, head),
        "<style>.a > .b { }</style><img src=\"x.png\">"
    );
    assert_eq!(inner_html(&doc, style), ".a > .b { }");
}

#[test]
fn fragment_serialization_matches_document_serialization() {
    let mut doc = Document::new();
    let body = doc.body();
    let row = doc.create_element("div");
    doc.append_child(body, row).unwrap();
    for label in ["one", "two"] {
        let item = doc.create_element("span");
        doc.set_attr(item, "class", "item").unwrap();
        let t = doc.create_text(label);
        doc.append_child(item, t).unwrap();
        doc.append_child(row, item).unwrap();
    }
    let frag = doc.snapshot_element_children(row).unwrap();
    assert_eq!(fragment_html(&frag), inner_html(&doc, row));
}
