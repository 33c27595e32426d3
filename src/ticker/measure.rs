use crate::dom::node::{Fragment, NodeId};
use crate::foundation::core::round_px;
use crate::foundation::error::TickerResult;
use crate::page::host::Page;

const PROBE_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("left", "0px"),
    ("top", "0px"),
    ("visibility", "hidden"),
    ("white-space", "nowrap"),
    ("pointer-events", "none"),
    ("display", "flex"),
    ("flex-wrap", "nowrap"),
];

/// Hidden, reusable probe that reports the single-line width of content.
#[derive(Debug)]
pub struct Measurer {
    probe: Option<NodeId>,
}

impl Measurer {
    /// Append the probe to `<body>`.
    pub fn attach(page: &mut Page, class: &str) -> TickerResult<Self> {
        let doc = page.document_mut();
        let probe = doc.create_element("div");
        doc.set_attr(probe, "class", class)?;
        for (name, value) in PROBE_STYLE {
            doc.set_style_property(probe, name, value)?;
        }
        let body = doc.body();
        doc.append_child(body, probe)?;
        Ok(Self { probe: Some(probe) })
    }

    pub fn probe(&self) -> Option<NodeId> {
        self.probe
    }

    /// Rounded laid-out width of `content`, or 0 when the probe is gone or has no box.
    pub fn measure(&self, page: &mut Page, content: &Fragment) -> TickerResult<u32> {
        let Some(probe) = self.probe else {
            return Ok(0);
        };
        if !page.document().is_connected(probe) {
            return Ok(0);
        }
        let doc = page.document_mut();
        let nodes = doc.instantiate_fragment(content);
        doc.replace_children(probe, &nodes)?;
        let width = page.layout()?.width(probe).map_or(0, round_px);
        page.document_mut().replace_children(probe, &[])?;
        tracing::trace!(width, "probe measured");
        Ok(width)
    }

    /// Remove the probe. Safe to call more than once.
    pub fn teardown(&mut self, page: &mut Page) -> TickerResult<()> {
        if let Some(probe) = self.probe.take()
            && page.document().contains(probe)
        {
            page.document_mut().destroy(probe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/measure.rs"]
mod tests;
