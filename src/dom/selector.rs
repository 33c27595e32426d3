//! Compound selectors (`tag#id.a.b`, `*`) joined by descendant combinators, comma-separated.

use crate::dom::node::{Document, NodeId};
use crate::foundation::error::{TickerError, TickerResult};

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> TickerResult<Self> {
        let mut out = Self::default();
        let mut rest = text;
        let head_end = rest.find(['.', '#']).unwrap_or(rest.len());
        let head = &rest[..head_end];
        if !head.is_empty() && head != "*" {
            if !is_ident(head) {
                return Err(TickerError::validation(format!("bad tag selector '{head}'")));
            }
            out.tag = Some(head.to_ascii_lowercase());
        }
        rest = &rest[head_end..];
        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if !is_ident(name) {
                return Err(TickerError::validation(format!("bad selector part '{rest}'")));
            }
            match marker {
                b'.' => out.classes.push(name.to_string()),
                _ => out.id = Some(name.to_string()),
            }
            rest = &body[end..];
        }
        Ok(out)
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(el) = doc.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && el.tag != *tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && el.attr("id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A descendant chain; the last compound is the subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(text: &str) -> TickerResult<Self> {
        let parts = text
            .split_ascii_whitespace()
            .map(Compound::parse)
            .collect::<TickerResult<Vec<_>>>()?;
        if parts.is_empty() {
            return Err(TickerError::validation("empty selector"));
        }
        Ok(Self { parts })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.parts.split_last() else {
            return false;
        };
        if !subject.matches(doc, node) {
            return false;
        }
        // Descendant-only chains can be matched greedily against the nearest ancestor.
        let mut cur = doc.parent(node);
        for part in ancestors.iter().rev() {
            loop {
                let Some(n) = cur else {
                    return false;
                };
                cur = doc.parent(n);
                if part.matches(doc, n) {
                    break;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn parse(text: &str) -> TickerResult<Self> {
        let selectors = text
            .split(',')
            .map(|s| Selector::parse(s.trim()))
            .collect::<TickerResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, node))
    }
}

impl Document {
    /// Connected elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> TickerResult<Vec<NodeId>> {
        self.query_all_within(self.document_element(), selector)
    }

    /// Descendants of `scope` (excluding `scope`) matching `selector`, in document order.
    pub fn query_all_within(&self, scope: NodeId, selector: &str) -> TickerResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .skip(1)
            .filter(|n| list.matches(self, *n))
            .collect())
    }

    pub fn query_first_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> TickerResult<Option<NodeId>> {
        Ok(self.query_all_within(scope, selector)?.into_iter().next())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;
