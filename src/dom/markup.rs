//! HTML serialization of document subtrees and owned fragments.

use crate::dom::node::{Document, ElementData, Fragment, FragmentNode, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, false, &mut out);
    out
}

pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let raw = doc
        .tag(id)
        .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
    let mut out = String::new();
    for c in doc.children(id) {
        write_node(doc, *c, raw, &mut out);
    }
    out
}

pub fn fragment_html(fragment: &Fragment) -> String {
    let mut out = String::new();
    for n in &fragment.nodes {
        write_fragment_node(n, false, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, raw_text: bool, out: &mut String) {
    match doc.kind(id) {
        Some(NodeKind::Text(t)) => push_text(t, raw_text, out),
        Some(NodeKind::Element(el)) => {
            open_tag(el, out);
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&el.tag.as_str());
            for c in doc.children(id) {
                write_node(doc, *c, raw, out);
            }
            close_tag(el, out);
        }
        None => {}
    }
}

fn write_fragment_node(node: &FragmentNode, raw_text: bool, out: &mut String) {
    match &node.kind {
        NodeKind::Text(t) => push_text(t, raw_text, out),
        NodeKind::Element(el) => {
            open_tag(el, out);
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&el.tag.as_str());
            for c in &node.children {
                write_fragment_node(c, raw, out);
            }
            close_tag(el, out);
        }
    }
}

fn open_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (k, v) in &el.attrs {
        push_attr(k, v, out);
    }
    if !el.style.is_empty() {
        push_attr("style", &el.style.to_css_text(), out);
    }
    out.push('>');
}

fn close_tag(el: &ElementData, out: &mut String) {
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn push_text(text: &str, raw: bool, out: &mut String) {
    if raw {
        out.push_str(text);
        return;
    }
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/markup.rs"]
mod tests;
