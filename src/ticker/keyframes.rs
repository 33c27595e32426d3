use std::collections::BTreeSet;

use crate::dom::node::NodeId;
use crate::foundation::error::TickerResult;
use crate::page::host::Page;
use crate::ticker::backend::{AnimationBackend, BackendKind, RowAnimation};

const ANIMATION_PROPERTIES: &[&str] = &[
    "animation-name",
    "animation-duration",
    "animation-timing-function",
    "animation-iteration-count",
    "will-change",
];

/// `@keyframes` text for one row.
pub fn keyframes_rule(name: &str, from_x: i64, to_x: i64) -> String {
    format!(
        "\n@keyframes {name} {{\n  0%   {{ transform: translate3d({from_x}px, 0, 0); }}\n  100% {{ transform: translate3d({to_x}px, 0, 0); }}\n}}\n"
    )
}

/// Loops tracks with generated keyframe rules named `<prefix><row index>`.
#[derive(Debug)]
pub struct KeyframesBackend {
    prefix: String,
    installed: BTreeSet<NodeId>,
}

impl KeyframesBackend {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            installed: BTreeSet::new(),
        }
    }

    pub fn animation_name(&self, index: usize) -> String {
        format!("{}{index}", self.prefix)
    }
}

impl AnimationBackend for KeyframesBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Keyframes
    }

    fn install(&mut self, page: &mut Page, row: &RowAnimation, rules: &mut String) -> TickerResult<()> {
        self.stop(page, row.track)?;
        let name = self.animation_name(row.index);
        let d = &row.descriptor;
        rules.push_str(&keyframes_rule(&name, d.from_x(), d.to_x()));

        let doc = page.document_mut();
        doc.set_style_property(row.track, "animation-name", &name)?;
        doc.set_style_property(row.track, "animation-duration", &format!("{}s", d.duration_s))?;
        doc.set_style_property(row.track, "animation-timing-function", "linear")?;
        doc.set_style_property(row.track, "animation-iteration-count", "infinite")?;
        doc.set_style_property(row.track, "will-change", "transform")?;
        // play state is left to the visibility gate
        doc.remove_style_property(row.track, "animation-play-state")?;
        self.installed.insert(row.track);
        tracing::debug!(%name, duration_s = d.duration_s, "keyframes installed");
        Ok(())
    }

    fn stop(&mut self, page: &mut Page, track: NodeId) -> TickerResult<()> {
        if !self.installed.remove(&track) || !page.document().contains(track) {
            return Ok(());
        }
        let doc = page.document_mut();
        for prop in ANIMATION_PROPERTIES {
            doc.remove_style_property(track, prop)?;
        }
        Ok(())
    }

    fn teardown(&mut self, page: &mut Page) -> TickerResult<()> {
        let tracks: Vec<NodeId> = self.installed.iter().copied().collect();
        for track in tracks {
            self.stop(page, track)?;
        }
        Ok(())
    }

    fn active_count(&self) -> usize {
        self.installed.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/keyframes.rs"]
mod tests;
