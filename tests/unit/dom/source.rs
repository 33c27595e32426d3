use super::*;
use crate::dom::markup::inner_html;

#[test]
fn builds_document_from_json() {
    let src = PageSource::from_json(
        r#"{
            "viewport": { "width": 800, "height": 600 },
            "root_style": "--px-per-sec: 50",
            "stylesheets": [".row { display: flex }"],
            "body": [
                { "class": "ticker", "children": [
                    { "class": "row", "attrs": { "data-dir": "right" }, "children": [
                        { "tag": "span", "text": "A" }
                    ]}
                ]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(src.viewport.width, 800);

    let doc = src.build_document().unwrap();
    let root = doc.document_element();
    assert_eq!(
        doc.inline_style(root).unwrap().get("--px-per-sec"),
        Some("50")
    );
    let rows = doc.query_all(".ticker .row").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(doc.data_attr(rows[0], "dir"), Some("right"));
    assert_eq!(inner_html(&doc, rows[0]), "<span>A</span>");
    assert_eq!(doc.query_all("style").unwrap().len(), 1);
}

#[test]
fn rejects_unknown_fields_and_bad_viewports() {
    assert!(PageSource::from_json(r#"{ "bogus": 1 }"#).is_err());
    assert!(PageSource::from_json(r#"{ "viewport": { "width": 0, "height": 10 } }"#).is_err());
}

#[test]
fn builder_helpers_compose() {
    let spec = ElementSpec::new("div")
        .class("row")
        .attr("data-px-per-sec", "80")
        .child(ElementSpec::new("span").style("width: 10px").text("x"));
    let src = PageSource {
        body: vec![spec],
        ..PageSource::default()
    };
    let doc = src.build_document().unwrap();
    let row = doc.query_all(".row").unwrap()[0];
    assert_eq!(
        inner_html(&doc, row),
        "<span style=\"width: 10px;\">x</span>"
    );
}
