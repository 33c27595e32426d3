use std::collections::{BTreeMap, BTreeSet};

use crate::dom::cascade::{ComputedStyle, StyleResolver};
use crate::dom::node::{Document, NodeId};

#[derive(Debug, Clone, PartialEq)]
struct RunningAnimation {
    name: String,
    duration_ms: f64,
    iterations: Option<f64>,
    elapsed_ms: f64,
    paused: bool,
}

/// Running CSS animations, keyed by element.
///
/// An animation starts when an element's computed `animation-name` first
/// resolves to a name, restarts when the name changes, and only accumulates
/// time while its play-state is `running`.
#[derive(Debug, Default)]
pub struct AnimationTimeline {
    running: BTreeMap<NodeId, RunningAnimation>,
    synced_at: Option<(u64, u64, u64)>,
}

impl AnimationTimeline {
    /// Re-read animation properties when the document changed since the last sync.
    pub fn sync(&mut self, doc: &Document, styles: &StyleResolver) {
        let key = (
            doc.layout_revision(),
            doc.sheet_revision(),
            doc.paint_revision(),
        );
        if self.synced_at == Some(key) {
            return;
        }
        self.synced_at = Some(key);

        let mut seen = BTreeSet::new();
        let mut stack: Vec<(NodeId, Option<ComputedStyle>)> = vec![(doc.document_element(), None)];
        while let Some((node, parent)) = stack.pop() {
            let Some(tag) = doc.tag(node) else {
                continue;
            };
            let style = styles.cascade(doc, node, parent.as_ref());
            if style.display(tag) == "none" {
                continue;
            }
            if let Some(name) = style.animation_name()
                && let Some(duration_ms) = style.animation_duration_ms().filter(|d| *d > 0.0)
            {
                seen.insert(node);
                let iterations = style.animation_iterations();
                let paused = style.is_paused();
                let restart = self.running.get(&node).is_none_or(|a| a.name != name);
                if restart {
                    self.running.insert(
                        node,
                        RunningAnimation {
                            name: name.to_string(),
                            duration_ms,
                            iterations,
                            elapsed_ms: 0.0,
                            paused,
                        },
                    );
                } else if let Some(anim) = self.running.get_mut(&node) {
                    anim.duration_ms = duration_ms;
                    anim.iterations = iterations;
                    anim.paused = paused;
                }
            }
            for child in doc.children(node).iter().rev() {
                stack.push((*child, Some(style.clone())));
            }
        }
        self.running.retain(|node, _| seen.contains(node));
    }

    pub fn advance(&mut self, dt_ms: f64) {
        for anim in self.running.values_mut() {
            if !anim.paused {
                anim.elapsed_ms += dt_ms;
            }
        }
    }

    /// Current keyframe-interpolated translate-x of `node`, if it is animating.
    ///
    /// Finished finite animations have no effect (`fill-mode: none`).
    pub fn sample_translate_x(&self, node: NodeId, styles: &StyleResolver) -> Option<f64> {
        let anim = self.running.get(&node)?;
        if let Some(n) = anim.iterations
            && anim.elapsed_ms >= anim.duration_ms * n
        {
            return None;
        }
        let progress = (anim.elapsed_ms % anim.duration_ms) / anim.duration_ms;
        styles.keyframes(&anim.name)?.translate_x_at(progress)
    }

    pub fn elapsed_ms(&self, node: NodeId) -> Option<f64> {
        self.running.get(&node).map(|a| a.elapsed_ms)
    }

    pub fn is_paused(&self, node: NodeId) -> Option<bool> {
        self.running.get(&node).map(|a| a.paused)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/animation.rs"]
mod tests;
