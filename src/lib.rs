//! tickerline is an infinite marquee ("ticker") engine.
//!
//! Each row matching a selector gets its content duplicated into a track, the
//! original content is measured in a hidden probe, and the track is looped by
//! exactly one copy width at a fixed pixels-per-second rate. Rows pause while
//! off-screen and are rebuilt after the viewport settles from a resize.
//!
//! The engine runs against [`Page`], a small in-memory page host with a
//! document, CSS cascade, Taffy layout, and a virtual event loop:
//!
//! - Build a [`Page`] from a [`PageSource`]
//! - [`TickerEngine::install`] it with a [`TickerConfig`]
//! - Advance time with [`Page::run_for`], passing the engine as the [`PageClient`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod dom;
pub(crate) mod layout;
pub(crate) mod page;
pub(crate) mod ticker;

pub use crate::foundation::core::{Point, Rect, Size, TimeMs, Vec2, Viewport, round_px};
pub use crate::foundation::error::{TickerError, TickerResult};

pub use crate::dom::cascade::ComputedStyle;
pub use crate::dom::markup::{fragment_html, inner_html, outer_html};
pub use crate::dom::node::{Document, ElementData, Fragment, FragmentNode, NodeId, NodeKind};
pub use crate::dom::source::{ElementSpec, PageSource};
pub use crate::layout::LayoutSnapshot;
pub use crate::layout::text::{FixedAdvanceMetrics, ParleyMetrics, TextExtent, TextMetrics};
pub use crate::page::events::{EventKind, ListenerId, ListenerOptions, WindowEvent};
pub use crate::page::host::{FrameSubscription, FrameTick, Page, PageClient};
pub use crate::page::observer::{IntersectionEntry, ObserverId};
pub use crate::page::timers::TimerId;
pub use crate::ticker::backend::{AnimationBackend, BackendKind, RowAnimation};
pub use crate::ticker::config::TickerConfig;
pub use crate::ticker::descriptor::{AnimationDescriptor, Direction, loop_duration_secs};
pub use crate::ticker::engine::{RowReport, TickerEngine, TickerReport};
pub use crate::ticker::keyframes::keyframes_rule;
