use crate::dom::node::NodeId;
use crate::foundation::error::TickerResult;
use crate::page::host::{FrameSubscription, FrameTick, Page};
use crate::ticker::config::TickerConfig;
use crate::ticker::descriptor::AnimationDescriptor;
use crate::ticker::keyframes::KeyframesBackend;
use crate::ticker::tween::TweenBackend;

/// Which [`AnimationBackend`] drives the tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Generated `@keyframes` rules played by the page's animation timeline.
    #[default]
    Keyframes,
    /// Frame-driven tween with a wraparound modifier.
    Tween,
}

/// One row's animation request.
#[derive(Debug, Clone, Copy)]
pub struct RowAnimation {
    pub index: usize,
    pub track: NodeId,
    pub descriptor: AnimationDescriptor,
}

/// A way of looping a track by one copy width.
pub trait AnimationBackend: std::fmt::Debug {
    fn kind(&self) -> BackendKind;

    /// Start the loop on `row.track`. Any CSS the backend needs is appended to `rules`,
    /// which the engine writes to its stylesheet once per pass.
    fn install(&mut self, page: &mut Page, row: &RowAnimation, rules: &mut String) -> TickerResult<()>;

    /// Stop whatever runs on `track`. Unknown or freed tracks are ignored.
    fn stop(&mut self, page: &mut Page, track: NodeId) -> TickerResult<()>;

    fn on_frame(
        &mut self,
        _page: &mut Page,
        _subscription: FrameSubscription,
        _tick: FrameTick,
    ) -> TickerResult<()> {
        Ok(())
    }

    /// Stop everything and release page resources.
    fn teardown(&mut self, page: &mut Page) -> TickerResult<()>;

    fn active_count(&self) -> usize;
}

pub fn create_backend(config: &TickerConfig) -> Box<dyn AnimationBackend> {
    match config.backend {
        BackendKind::Keyframes => Box::new(KeyframesBackend::new(&config.keyframes_prefix)),
        BackendKind::Tween => Box::new(TweenBackend::default()),
    }
}
