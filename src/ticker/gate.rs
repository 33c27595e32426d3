use crate::dom::node::NodeId;
use crate::foundation::error::TickerResult;
use crate::page::host::Page;
use crate::page::observer::ObserverId;

/// Pauses a row's track while the row is off-screen.
#[derive(Debug)]
pub struct VisibilityGate {
    observer: Option<ObserverId>,
}

impl VisibilityGate {
    pub fn attach(page: &mut Page, threshold: f64) -> Self {
        Self {
            observer: Some(page.create_intersection_observer(threshold)),
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn observe(&self, page: &mut Page, row: NodeId) {
        if let Some(obs) = self.observer {
            page.observe(obs, row);
        }
    }

    pub fn unobserve(&self, page: &mut Page, row: NodeId) {
        if let Some(obs) = self.observer {
            page.unobserve(obs, row);
        }
    }

    /// Visible tracks get their inline play state cleared, hidden ones are paused.
    pub fn apply(page: &mut Page, track: NodeId, visible: bool) -> TickerResult<()> {
        if !page.document().contains(track) {
            return Ok(());
        }
        let doc = page.document_mut();
        if visible {
            doc.remove_style_property(track, "animation-play-state")
        } else {
            doc.set_style_property(track, "animation-play-state", "paused")
        }
    }

    pub fn disconnect(&mut self, page: &mut Page) {
        if let Some(obs) = self.observer.take() {
            page.disconnect_observer(obs);
        }
    }
}
