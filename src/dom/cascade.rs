use std::collections::BTreeMap;

use crate::dom::css::{Declarations, KeyframesRule, Length, Stylesheet, parse_length, parse_time_ms};
use crate::dom::node::{Document, NodeId};

/// Properties inherited from the parent when not set on the element itself.
const INHERITED: &[&str] = &["white-space", "font-size", "visibility", "pointer-events"];

/// Resolved property values for one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedStyle {
    props: BTreeMap<String, String>,
}

impl ComputedStyle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// `display`, defaulting by tag the way the user-agent sheet would.
    pub fn display(&self, tag: &str) -> &str {
        if let Some(d) = self.get("display") {
            return d;
        }
        match tag {
            "head" | "style" | "script" | "meta" | "link" | "title" => "none",
            "span" | "a" | "em" | "strong" | "b" | "i" | "img" | "small" | "code" => "inline",
            _ => "block",
        }
    }

    pub fn length(&self, name: &str) -> Option<Length> {
        self.get(name).and_then(parse_length)
    }

    pub fn px(&self, name: &str) -> Option<f64> {
        match self.length(name)? {
            Length::Px(v) => Some(v),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.trim().parse::<f64>().ok())
    }

    pub fn font_size_px(&self) -> f64 {
        self.px("font-size").filter(|v| *v > 0.0).unwrap_or(16.0)
    }

    pub fn is_nowrap(&self) -> bool {
        matches!(self.get("white-space"), Some("nowrap") | Some("pre"))
    }

    pub fn is_absolutely_positioned(&self) -> bool {
        matches!(self.get("position"), Some("absolute") | Some("fixed"))
    }

    pub fn animation_name(&self) -> Option<&str> {
        self.get("animation-name").filter(|n| *n != "none")
    }

    pub fn animation_duration_ms(&self) -> Option<f64> {
        self.get("animation-duration").and_then(parse_time_ms)
    }

    /// `None` means `infinite`.
    pub fn animation_iterations(&self) -> Option<f64> {
        match self.get("animation-iteration-count") {
            Some("infinite") => None,
            Some(v) => v.trim().parse::<f64>().ok().filter(|c| *c >= 0.0).or(Some(1.0)),
            None => Some(1.0),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.get("animation-play-state") == Some("paused")
    }

    fn apply(&mut self, decls: &Declarations) {
        for (name, value) in decls.iter() {
            if let Some(expanded) = expand_box_shorthand(name, value) {
                for (k, v) in expanded {
                    self.props.insert(k, v);
                }
                continue;
            }
            if name == "animation" {
                for (k, v) in expand_animation_shorthand(value) {
                    self.props.insert(k.to_string(), v);
                }
                continue;
            }
            if name == "gap" {
                let mut parts = value.split_ascii_whitespace();
                let row = parts.next().unwrap_or(value).to_string();
                let col = parts.next().map(str::to_string).unwrap_or_else(|| row.clone());
                self.props.insert("row-gap".to_string(), row);
                self.props.insert("column-gap".to_string(), col);
                continue;
            }
            self.props.insert(name.to_string(), value.to_string());
        }
    }
}

/// `padding`/`margin` with one to four values into their longhands.
fn expand_box_shorthand(name: &str, value: &str) -> Option<Vec<(String, String)>> {
    if name != "padding" && name != "margin" {
        return None;
    }
    let v: Vec<&str> = value.split_ascii_whitespace().collect();
    let (top, right, bottom, left) = match v.as_slice() {
        [a] => (*a, *a, *a, *a),
        [a, b] => (*a, *b, *a, *b),
        [a, b, c] => (*a, *b, *c, *b),
        [a, b, c, d] => (*a, *b, *c, *d),
        _ => return Some(Vec::new()),
    };
    Some(
        [("top", top), ("right", right), ("bottom", bottom), ("left", left)]
            .into_iter()
            .map(|(side, val)| (format!("{name}-{side}"), val.to_string()))
            .collect(),
    )
}

/// Single-animation `animation` shorthand into longhands; unset parts reset to initial values.
fn expand_animation_shorthand(value: &str) -> Vec<(&'static str, String)> {
    let mut name = "none".to_string();
    let mut duration: Option<String> = None;
    let mut delay = "0s".to_string();
    let mut timing = "ease".to_string();
    let mut count = "1".to_string();
    let mut play_state = "running".to_string();
    for token in value.split_ascii_whitespace() {
        if parse_time_ms(token).is_some() {
            if duration.is_none() {
                duration = Some(token.to_string());
            } else {
                delay = token.to_string();
            }
        } else if token == "infinite" || token.parse::<f64>().is_ok() {
            count = token.to_string();
        } else if matches!(token, "paused" | "running") {
            play_state = token.to_string();
        } else if matches!(
            token,
            "linear" | "ease" | "ease-in" | "ease-out" | "ease-in-out" | "step-start" | "step-end"
        ) {
            timing = token.to_string();
        } else if !matches!(
            token,
            "normal" | "reverse" | "alternate" | "alternate-reverse" | "forwards" | "backwards" | "both"
        ) {
            name = token.to_string();
        }
    }
    vec![
        ("animation-name", name),
        ("animation-duration", duration.unwrap_or_else(|| "0s".to_string())),
        ("animation-delay", delay),
        ("animation-timing-function", timing),
        ("animation-iteration-count", count),
        ("animation-play-state", play_state),
    ]
}

/// Cascade over every connected `<style>` element: rules in source order, then inline style.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    sheets: Vec<Stylesheet>,
}

impl StyleResolver {
    pub fn from_document(doc: &Document) -> Self {
        let sheets = doc
            .descendants(doc.document_element())
            .into_iter()
            .filter(|n| doc.tag(*n) == Some("style"))
            .map(|n| Stylesheet::parse(&doc.text_content(n)))
            .collect();
        Self { sheets }
    }

    pub fn keyframes(&self, name: &str) -> Option<&KeyframesRule> {
        self.sheets.iter().rev().find_map(|s| s.find_keyframes(name))
    }

    /// Style for `node`, given its parent's already computed style.
    pub fn cascade(
        &self,
        doc: &Document,
        node: NodeId,
        parent: Option<&ComputedStyle>,
    ) -> ComputedStyle {
        let mut out = ComputedStyle::default();
        if let Some(parent) = parent {
            for (k, v) in &parent.props {
                if k.starts_with("--") || INHERITED.contains(&k.as_str()) {
                    out.props.insert(k.clone(), v.clone());
                }
            }
        }
        let Some(el) = doc.element(node) else {
            return out;
        };
        for sheet in &self.sheets {
            for rule in &sheet.rules {
                if rule.selectors.matches(doc, node) {
                    out.apply(&rule.declarations);
                }
            }
        }
        out.apply(&el.style);
        out
    }

    /// Style for `node`, resolving the ancestor chain from the root down.
    pub fn computed(&self, doc: &Document, node: NodeId) -> ComputedStyle {
        let mut chain = vec![node];
        let mut cur = doc.parent(node);
        while let Some(n) = cur {
            chain.push(n);
            cur = doc.parent(n);
        }
        let mut style: Option<ComputedStyle> = None;
        for n in chain.into_iter().rev() {
            style = Some(self.cascade(doc, n, style.as_ref()));
        }
        style.unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/cascade.rs"]
mod tests;
