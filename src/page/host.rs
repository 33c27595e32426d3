use std::collections::{BTreeSet, VecDeque};

use crate::dom::cascade::{ComputedStyle, StyleResolver};
use crate::dom::css::parse_translate_x;
use crate::dom::node::{Document, NodeId};
use crate::dom::source::PageSource;
use crate::foundation::core::{TimeMs, Viewport};
use crate::foundation::error::{TickerError, TickerResult};
use crate::layout::LayoutSnapshot;
use crate::layout::taffy_bridge::compute_layout;
use crate::layout::text::{FixedAdvanceMetrics, TextMetrics};
use crate::page::animation::AnimationTimeline;
use crate::page::events::{EventKind, ListenerId, ListenerOptions, ListenerRegistry, WindowEvent};
use crate::page::observer::{IntersectionEntry, ObserverId, ObserverRegistry};
use crate::page::timers::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct FrameSubscription(pub(crate) u64);

/// Timing of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub now: TimeMs,
    pub dt_ms: f64,
}

/// Callbacks the page drives while its clock runs.
///
/// Every method gets the page back so handlers can mutate the document,
/// schedule timers, and so on.
pub trait PageClient {
    fn on_event(&mut self, _page: &mut Page, _listener: ListenerId, _event: WindowEvent) -> TickerResult<()> {
        Ok(())
    }

    fn on_timer(&mut self, _page: &mut Page, _timer: TimerId) -> TickerResult<()> {
        Ok(())
    }

    fn on_frame(
        &mut self,
        _page: &mut Page,
        _subscription: FrameSubscription,
        _tick: FrameTick,
    ) -> TickerResult<()> {
        Ok(())
    }

    fn on_intersection(
        &mut self,
        _page: &mut Page,
        _observer: ObserverId,
        _entries: &[IntersectionEntry],
    ) -> TickerResult<()> {
        Ok(())
    }
}

impl PageClient for () {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    layout_revision: u64,
    sheet_revision: u64,
    width: u32,
    height: u32,
}

/// Single-threaded page host: a document, a viewport, and a virtual clock
/// that drives timers, window events, animation frames, and intersection
/// observers.
#[derive(Debug)]
pub struct Page {
    doc: Document,
    viewport: Viewport,
    clock: TimeMs,
    last_frame: TimeMs,
    frame_interval_ms: u64,
    metrics: Box<dyn TextMetrics>,
    styles: StyleResolver,
    styles_revision: Option<u64>,
    layout_cache: Option<(LayoutKey, LayoutSnapshot)>,
    timers: TimerQueue,
    listeners: ListenerRegistry,
    observers: ObserverRegistry,
    animations: AnimationTimeline,
    next_frame_subscription: u64,
    frame_subscriptions: BTreeSet<FrameSubscription>,
    pending_events: VecDeque<WindowEvent>,
}

impl Page {
    pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

    pub fn new(doc: Document, viewport: Viewport) -> Self {
        Self {
            doc,
            viewport,
            clock: TimeMs(0),
            last_frame: TimeMs(0),
            frame_interval_ms: Self::DEFAULT_FRAME_INTERVAL_MS,
            metrics: Box::new(FixedAdvanceMetrics::default()),
            styles: StyleResolver::default(),
            styles_revision: None,
            layout_cache: None,
            timers: TimerQueue::default(),
            listeners: ListenerRegistry::default(),
            observers: ObserverRegistry::default(),
            animations: AnimationTimeline::default(),
            next_frame_subscription: 0,
            frame_subscriptions: BTreeSet::new(),
            pending_events: VecDeque::new(),
        }
    }

    pub fn from_source(source: &PageSource) -> TickerResult<Self> {
        let doc = source.build_document()?;
        Ok(Self::new(doc, source.viewport))
    }

    pub fn with_metrics(mut self, metrics: Box<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self.layout_cache = None;
        self
    }

    pub fn with_frame_interval(mut self, ms: u64) -> TickerResult<Self> {
        if ms == 0 {
            return Err(TickerError::validation("frame interval must be > 0"));
        }
        self.frame_interval_ms = ms;
        Ok(self)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now(&self) -> TimeMs {
        self.clock
    }

    /// Change the viewport size and queue a `resize` event.
    pub fn resize(&mut self, width: u32, height: u32) -> TickerResult<()> {
        let next = Viewport {
            width,
            height,
            ..self.viewport
        };
        next.validate()?;
        self.viewport = next;
        self.pending_events
            .push_back(WindowEvent::Resize { width, height });
        Ok(())
    }

    /// Swap width and height, queueing `orientationchange` then `resize`.
    pub fn rotate(&mut self) {
        self.viewport = self.viewport.rotated();
        let (width, height) = (self.viewport.width, self.viewport.height);
        self.pending_events
            .push_back(WindowEvent::OrientationChange { width, height });
        self.pending_events
            .push_back(WindowEvent::Resize { width, height });
    }

    pub fn scroll_to(&mut self, x: f64, y: f64) -> TickerResult<()> {
        let next = Viewport {
            scroll_x: x,
            scroll_y: y,
            ..self.viewport
        };
        next.validate()?;
        self.viewport = next;
        Ok(())
    }

    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.timers.set_timeout(self.clock, delay_ms)
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear_timeout(id)
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn add_event_listener(&mut self, kind: EventKind, options: ListenerOptions) -> ListenerId {
        self.listeners.add(kind, options)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn create_intersection_observer(&mut self, threshold: f64) -> ObserverId {
        self.observers.create(threshold)
    }

    pub fn observe(&mut self, observer: ObserverId, target: NodeId) -> bool {
        self.observers.observe(observer, target)
    }

    pub fn unobserve(&mut self, observer: ObserverId, target: NodeId) -> bool {
        self.observers.unobserve(observer, target)
    }

    pub fn disconnect_observer(&mut self, observer: ObserverId) -> bool {
        self.observers.disconnect(observer)
    }

    pub fn active_observer_count(&self) -> usize {
        self.observers.active_count()
    }

    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.observers.observed_count(observer)
    }

    /// Subscribe to per-frame callbacks until cancelled.
    pub fn request_frames(&mut self) -> FrameSubscription {
        self.next_frame_subscription += 1;
        let sub = FrameSubscription(self.next_frame_subscription);
        self.frame_subscriptions.insert(sub);
        sub
    }

    pub fn cancel_frames(&mut self, sub: FrameSubscription) -> bool {
        self.frame_subscriptions.remove(&sub)
    }

    pub fn frame_subscription_count(&self) -> usize {
        self.frame_subscriptions.len()
    }

    /// Current layout, recomputed only when the document or viewport size changed.
    pub fn layout(&mut self) -> TickerResult<&LayoutSnapshot> {
        self.ensure_layout()?;
        match &self.layout_cache {
            Some((_, snap)) => Ok(snap),
            None => Err(TickerError::layout("layout unavailable")),
        }
    }

    pub fn computed_style(&mut self, node: NodeId) -> ComputedStyle {
        self.sync_styles();
        self.styles.computed(&self.doc, node)
    }

    /// Horizontal translation of `node`: its running CSS animation if any, else its `transform`.
    pub fn current_translate_x(&mut self, node: NodeId) -> Option<f64> {
        self.sync_styles();
        self.animations.sync(&self.doc, &self.styles);
        if let Some(x) = self.animations.sample_translate_x(node, &self.styles) {
            return Some(x);
        }
        let style = self.styles.computed(&self.doc, node);
        style.get("transform").and_then(parse_translate_x)
    }

    /// Time accumulated by the CSS animation on `node`, if it has one.
    pub fn animation_elapsed_ms(&mut self, node: NodeId) -> Option<f64> {
        self.sync_styles();
        self.animations.sync(&self.doc, &self.styles);
        self.animations.elapsed_ms(node)
    }

    pub fn running_animation_count(&mut self) -> usize {
        self.sync_styles();
        self.animations.sync(&self.doc, &self.styles);
        self.animations.len()
    }

    /// Advance the virtual clock by `ms`, dispatching everything that comes due.
    ///
    /// Per step: queued window events, then due timers, then (on frame
    /// boundaries) frame callbacks followed by intersection reports.
    #[tracing::instrument(level = "debug", skip(self, client))]
    pub fn run_for(&mut self, ms: u64, client: &mut dyn PageClient) -> TickerResult<()> {
        let end = self.clock.saturating_add(ms);
        loop {
            self.dispatch_events(client)?;
            let next_frame = self.last_frame.saturating_add(self.frame_interval_ms);
            let next = match self.timers.next_deadline() {
                Some(t) => t.min(next_frame),
                None => next_frame,
            };
            if next > end {
                self.advance_clock(end);
                break;
            }
            self.advance_clock(next);
            while let Some(timer) = self.timers.pop_due(self.clock) {
                client.on_timer(self, timer)?;
                self.dispatch_events(client)?;
            }
            if self.clock == next_frame {
                self.render_frame(client)?;
            }
        }
        self.dispatch_events(client)
    }

    fn advance_clock(&mut self, to: TimeMs) {
        if to <= self.clock {
            return;
        }
        let dt = to.since(self.clock);
        self.sync_styles();
        self.animations.sync(&self.doc, &self.styles);
        self.animations.advance(dt as f64);
        self.clock = to;
    }

    fn render_frame(&mut self, client: &mut dyn PageClient) -> TickerResult<()> {
        let tick = FrameTick {
            now: self.clock,
            dt_ms: self.clock.since(self.last_frame) as f64,
        };
        self.last_frame = self.clock;
        let subs: Vec<FrameSubscription> = self.frame_subscriptions.iter().copied().collect();
        for sub in subs {
            // cancelled by an earlier callback in this frame
            if !self.frame_subscriptions.contains(&sub) {
                continue;
            }
            client.on_frame(self, sub, tick)?;
        }
        self.deliver_intersections(client)
    }

    fn deliver_intersections(&mut self, client: &mut dyn PageClient) -> TickerResult<()> {
        if self.observers.active_count() == 0 {
            return Ok(());
        }
        self.ensure_layout()?;
        let Some((_, snap)) = &self.layout_cache else {
            return Ok(());
        };
        let reports = self.observers.collect(snap, self.viewport.rect(), self.clock);
        for (observer, entries) in reports {
            tracing::trace!(?observer, count = entries.len(), "intersection report");
            client.on_intersection(self, observer, &entries)?;
        }
        Ok(())
    }

    fn dispatch_events(&mut self, client: &mut dyn PageClient) -> TickerResult<()> {
        while let Some(event) = self.pending_events.pop_front() {
            for listener in self.listeners.listeners_for(event.kind()) {
                // removed by an earlier listener for the same event
                if self.listeners.options(listener).is_none() {
                    continue;
                }
                client.on_event(self, listener, event)?;
            }
        }
        Ok(())
    }

    fn sync_styles(&mut self) {
        let rev = self.doc.sheet_revision();
        if self.styles_revision != Some(rev) {
            self.styles = StyleResolver::from_document(&self.doc);
            self.styles_revision = Some(rev);
        }
    }

    fn ensure_layout(&mut self) -> TickerResult<()> {
        let key = LayoutKey {
            layout_revision: self.doc.layout_revision(),
            sheet_revision: self.doc.sheet_revision(),
            width: self.viewport.width,
            height: self.viewport.height,
        };
        if matches!(&self.layout_cache, Some((k, _)) if *k == key) {
            return Ok(());
        }
        self.sync_styles();
        let snap = compute_layout(&self.doc, &self.styles, &self.viewport, self.metrics.as_mut())?;
        self.layout_cache = Some((key, snap));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/host.rs"]
mod tests;
