use std::collections::BTreeMap;

use crate::dom::node::NodeId;
use crate::foundation::error::TickerResult;
use crate::page::host::{FrameSubscription, FrameTick, Page};
use crate::ticker::backend::{AnimationBackend, BackendKind, RowAnimation};

/// Fold `x` into `(-width, 0]`, so a track that moved a full copy snaps back seamlessly.
pub fn wrap_offset(x: f64, width: f64) -> f64 {
    if width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    let m = x.rem_euclid(width);
    if m == 0.0 { 0.0 } else { m - width }
}

pub fn translate3d(x: f64) -> String {
    let x = (x * 1000.0).round() / 1000.0;
    // avoid "-0px"
    let x = if x == 0.0 { 0.0 } else { x };
    format!("translate3d({x}px, 0px, 0px)")
}

#[derive(Debug, Clone)]
struct Tween {
    from_x: f64,
    to_x: f64,
    width: f64,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Tween {
    fn value(&self) -> f64 {
        let progress = (self.elapsed_ms % self.duration_ms) / self.duration_ms;
        wrap_offset(self.from_x + (self.to_x - self.from_x) * progress, self.width)
    }
}

/// Linear, endlessly repeating `x` tweens written to inline `transform`,
/// all driven by one shared frame subscription.
#[derive(Debug, Default)]
pub struct TweenBackend {
    tweens: BTreeMap<NodeId, Tween>,
    subscription: Option<FrameSubscription>,
}

impl TweenBackend {
    pub fn elapsed_ms(&self, track: NodeId) -> Option<f64> {
        self.tweens.get(&track).map(|t| t.elapsed_ms)
    }
}

impl AnimationBackend for TweenBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Tween
    }

    fn install(&mut self, page: &mut Page, row: &RowAnimation, _rules: &mut String) -> TickerResult<()> {
        self.stop(page, row.track)?;
        let d = &row.descriptor;
        let tween = Tween {
            from_x: d.from_x() as f64,
            to_x: d.to_x() as f64,
            width: f64::from(d.distance_px),
            duration_ms: d.duration_s * 1000.0,
            elapsed_ms: 0.0,
        };
        page.document_mut()
            .set_style_property(row.track, "transform", &translate3d(tween.value()))?;
        self.tweens.insert(row.track, tween);
        if self.subscription.is_none() {
            self.subscription = Some(page.request_frames());
        }
        tracing::debug!(index = row.index, duration_s = d.duration_s, "tween installed");
        Ok(())
    }

    fn stop(&mut self, page: &mut Page, track: NodeId) -> TickerResult<()> {
        if self.tweens.remove(&track).is_none() {
            return Ok(());
        }
        if page.document().contains(track) {
            page.document_mut().remove_style_property(track, "transform")?;
        }
        if self.tweens.is_empty()
            && let Some(sub) = self.subscription.take()
        {
            page.cancel_frames(sub);
        }
        Ok(())
    }

    fn on_frame(&mut self, page: &mut Page, subscription: FrameSubscription, tick: FrameTick) -> TickerResult<()> {
        if self.subscription != Some(subscription) {
            return Ok(());
        }
        for (track, tween) in self.tweens.iter_mut() {
            if !page.document().contains(*track) {
                continue;
            }
            if page.computed_style(*track).is_paused() {
                continue;
            }
            tween.elapsed_ms += tick.dt_ms;
            page.document_mut()
                .set_style_property(*track, "transform", &translate3d(tween.value()))?;
        }
        Ok(())
    }

    fn teardown(&mut self, page: &mut Page) -> TickerResult<()> {
        let tracks: Vec<NodeId> = self.tweens.keys().copied().collect();
        for track in tracks {
            self.stop(page, track)?;
        }
        if let Some(sub) = self.subscription.take() {
            page.cancel_frames(sub);
        }
        Ok(())
    }

    fn active_count(&self) -> usize {
        self.tweens.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/tween.rs"]
mod tests;
