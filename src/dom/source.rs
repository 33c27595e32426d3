use std::collections::BTreeMap;

use crate::dom::node::{Document, NodeId};
use crate::foundation::core::Viewport;
use crate::foundation::error::{TickerError, TickerResult};

/// JSON description of a page: viewport, root custom properties, stylesheets and body markup.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSource {
    #[serde(default)]
    pub viewport: Viewport,
    /// Inline style of the `<html>` element, e.g. `--px-per-sec: 40`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_style: Option<String>,
    /// Each entry becomes one `<style>` element in `<head>`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stylesheets: Vec<String>,
    #[serde(default)]
    pub body: Vec<ElementSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Text appended before any children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: None,
            attrs: BTreeMap::new(),
            style: None,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    fn build(&self, doc: &mut Document) -> TickerResult<NodeId> {
        if self.tag.trim().is_empty() {
            return Err(TickerError::validation("element tag must not be empty"));
        }
        let el = doc.create_element(&self.tag);
        if let Some(id) = &self.id {
            doc.set_attr(el, "id", id)?;
        }
        if let Some(class) = &self.class {
            doc.set_attr(el, "class", class)?;
        }
        for (k, v) in &self.attrs {
            doc.set_attr(el, k, v)?;
        }
        if let Some(style) = &self.style {
            doc.set_attr(el, "style", style)?;
        }
        if let Some(text) = &self.text {
            let t = doc.create_text(text);
            doc.append_child(el, t)?;
        }
        for child in &self.children {
            let c = child.build(doc)?;
            doc.append_child(el, c)?;
        }
        Ok(el)
    }
}

impl PageSource {
    pub fn from_json(text: &str) -> TickerResult<Self> {
        let src: Self = serde_json::from_str(text)?;
        src.viewport.validate()?;
        Ok(src)
    }

    pub fn build_document(&self) -> TickerResult<Document> {
        let mut doc = Document::new();
        if let Some(style) = &self.root_style {
            let root = doc.document_element();
            doc.set_attr(root, "style", style)?;
        }
        let head = doc.head();
        for css in &self.stylesheets {
            let style = doc.create_element("style");
            doc.append_child(head, style)?;
            doc.set_text_content(style, css)?;
        }
        let body = doc.body();
        for spec in &self.body {
            let el = spec.build(&mut doc)?;
            doc.append_child(body, el)?;
        }
        Ok(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/source.rs"]
mod tests;
