use std::collections::BTreeMap;

use crate::dom::node::NodeId;
use crate::foundation::core::{Rect, TimeMs};
use crate::layout::LayoutSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ObserverId(pub(crate) u64);

/// One visibility report for an observed element.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    #[serde(skip)]
    pub bounding_rect: Option<Rect>,
    pub time: TimeMs,
}

#[derive(Debug)]
struct Observer {
    threshold: f64,
    // target -> last reported state; `None` until the first report
    targets: BTreeMap<NodeId, Option<bool>>,
}

/// Intersection observers rooted at the viewport.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: BTreeMap<ObserverId, Observer>,
}

impl ObserverRegistry {
    pub fn create(&mut self, threshold: f64) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.insert(
            id,
            Observer {
                threshold: threshold.clamp(0.0, 1.0),
                targets: BTreeMap::new(),
            },
        );
        id
    }

    /// Returns false when the observer is gone.
    pub fn observe(&mut self, id: ObserverId, target: NodeId) -> bool {
        let Some(obs) = self.observers.get_mut(&id) else {
            return false;
        };
        obs.targets.entry(target).or_insert(None);
        true
    }

    pub fn unobserve(&mut self, id: ObserverId, target: NodeId) -> bool {
        self.observers
            .get_mut(&id)
            .is_some_and(|obs| obs.targets.remove(&target).is_some())
    }

    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.observers.len()
    }

    pub fn observed_count(&self, id: ObserverId) -> usize {
        self.observers.get(&id).map_or(0, |o| o.targets.len())
    }

    /// Compute entries for every observer whose targets changed state.
    ///
    /// The first computation for a target always reports; later ones only on a
    /// flip of `is_intersecting`.
    pub fn collect(
        &mut self,
        layout: &LayoutSnapshot,
        root: Rect,
        now: TimeMs,
    ) -> Vec<(ObserverId, Vec<IntersectionEntry>)> {
        let mut out = Vec::new();
        for (id, obs) in self.observers.iter_mut() {
            let mut entries = Vec::new();
            for (target, last) in obs.targets.iter_mut() {
                let rect = layout.rect(*target);
                let (is_intersecting, ratio) = match rect {
                    Some(r) => intersection_state(r, root, obs.threshold),
                    None => (false, 0.0),
                };
                if *last == Some(is_intersecting) {
                    continue;
                }
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: *target,
                    is_intersecting,
                    intersection_ratio: ratio,
                    bounding_rect: rect,
                    time: now,
                });
            }
            if !entries.is_empty() {
                out.push((*id, entries));
            }
        }
        out
    }
}

/// `(is_intersecting, ratio)` of `target` against `root`.
///
/// Zero-area targets count as fully visible when they touch the root.
pub(crate) fn intersection_state(target: Rect, root: Rect, threshold: f64) -> (bool, f64) {
    let overlap = target.intersect(root);
    let touches = target.x0 <= root.x1
        && target.x1 >= root.x0
        && target.y0 <= root.y1
        && target.y1 >= root.y0;
    let area = target.area();
    if area <= 0.0 {
        return if touches { (true, 1.0) } else { (false, 0.0) };
    }
    let ratio = (overlap.area() / area).clamp(0.0, 1.0);
    let visible = ratio > 0.0 && ratio >= threshold;
    (visible, ratio)
}

#[cfg(test)]
#[path = "../../tests/unit/page/observer.rs"]
mod tests;
