use crate::dom::markup::fragment_html;
use crate::dom::node::{Fragment, NodeId};
use crate::foundation::error::TickerResult;
use crate::page::events::{EventKind, ListenerId, ListenerOptions, WindowEvent};
use crate::page::host::{FrameSubscription, FrameTick, Page, PageClient};
use crate::page::observer::{IntersectionEntry, ObserverId};
use crate::page::timers::{Debouncer, TimerId};
use crate::ticker::backend::{AnimationBackend, BackendKind, RowAnimation, create_backend};
use crate::ticker::config::TickerConfig;
use crate::ticker::descriptor::{AnimationDescriptor, Direction, fallback_width, resolve_speed};
use crate::ticker::duplicate::build_track;
use crate::ticker::gate::VisibilityGate;
use crate::ticker::measure::Measurer;
use crate::ticker::stylesheet::GeneratedStylesheet;

#[derive(Debug)]
struct RowState {
    element: NodeId,
    content: Fragment,
    track: Option<NodeId>,
    descriptor: Option<AnimationDescriptor>,
    measured_width: u32,
    visible: Option<bool>,
}

/// Per-row outcome of the last pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RowReport {
    pub index: usize,
    pub element: NodeId,
    pub track: Option<NodeId>,
    pub direction: Option<Direction>,
    pub duration_s: Option<f64>,
    pub distance_px: Option<u32>,
    /// Probe width before the fallback; 0 means the fallback was used.
    pub measured_width: u32,
    pub visible: Option<bool>,
    pub paused_by_class: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TickerReport {
    pub backend: BackendKind,
    pub passes: u64,
    pub rows: Vec<RowReport>,
    pub stylesheet: String,
}

/// Infinite ticker over every row matching the configured selector.
///
/// Owns its probe, stylesheet, observer, listeners and pending refresh; all
/// of them are released by [`TickerEngine::destroy`]. Drive it by passing it
/// as the [`PageClient`] to [`Page::run_for`].
#[derive(Debug)]
pub struct TickerEngine {
    config: TickerConfig,
    rows: Vec<RowState>,
    stylesheet: GeneratedStylesheet,
    measurer: Measurer,
    gate: VisibilityGate,
    backend: Box<dyn AnimationBackend>,
    debouncer: Debouncer,
    listeners: Vec<ListenerId>,
    passes: u64,
    destroyed: bool,
}

impl TickerEngine {
    /// Discover rows and run the first pass. `Ok(None)` when the page has no rows.
    #[tracing::instrument(skip_all, fields(selector = %config.row_selector))]
    pub fn install(page: &mut Page, config: TickerConfig) -> TickerResult<Option<Self>> {
        config.validate()?;
        let elements = page.document().query_all(&config.row_selector)?;
        if elements.is_empty() {
            tracing::debug!("no ticker rows");
            return Ok(None);
        }
        let mut rows = Vec::with_capacity(elements.len());
        for element in elements {
            let content = page.document().snapshot_element_children(element)?;
            rows.push(RowState {
                element,
                content,
                track: None,
                descriptor: None,
                measured_width: 0,
                visible: None,
            });
        }

        let stylesheet = GeneratedStylesheet::attach(page, &config.style_element_id)?;
        let measurer = Measurer::attach(page, &config.measure_class)?;
        let gate = VisibilityGate::attach(page, config.visibility_threshold);
        let passive = ListenerOptions { passive: true };
        let listeners = vec![
            page.add_event_listener(EventKind::Resize, passive),
            page.add_event_listener(EventKind::OrientationChange, passive),
        ];
        let mut engine = Self {
            backend: create_backend(&config),
            debouncer: Debouncer::new(config.debounce_ms),
            config,
            rows,
            stylesheet,
            measurer,
            gate,
            listeners,
            passes: 0,
            destroyed: false,
        };
        engine.refresh(page)?;
        Ok(Some(engine))
    }

    /// Configuration the engine was installed with.
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Number of rows discovered at install, including skipped ones.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether [`TickerEngine::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Rebuild every row: clear generated rules, duplicate, measure, animate, observe.
    #[tracing::instrument(skip_all, fields(pass = self.passes + 1))]
    pub fn refresh(&mut self, page: &mut Page) -> TickerResult<()> {
        if self.destroyed {
            tracing::debug!("refresh after destroy ignored");
            return Ok(());
        }
        self.debouncer.cancel(page);
        self.stylesheet.clear(page)?;
        let mut rules = String::new();
        for index in 0..self.rows.len() {
            if let Err(err) = self.setup_row(page, index, &mut rules) {
                tracing::warn!(index, %err, "ticker row skipped");
            }
        }
        self.stylesheet.write(page, &rules)?;
        self.passes += 1;
        Ok(())
    }

    fn setup_row(&mut self, page: &mut Page, index: usize, rules: &mut String) -> TickerResult<()> {
        self.resnapshot_if_replaced(page, index)?;
        self.teardown_row(page, index)?;
        let row = &self.rows[index];
        let element = row.element;
        if !page.document().is_connected(element) {
            tracing::debug!(index, "row no longer in the document");
            return Ok(());
        }
        let Some(track) = build_track(page.document_mut(), element, &row.content, &self.config.track_class)?
        else {
            tracing::debug!(index, "row has no element children");
            return Ok(());
        };
        self.rows[index].track = Some(track);

        let measured = self.measurer.measure(page, &self.rows[index].content)?;
        let width = if measured > 0 {
            measured
        } else {
            let track_width = page.layout()?.width(track);
            tracing::debug!(index, ?track_width, "probe reported 0, using half the track");
            fallback_width(0, track_width)
        };

        let doc = page.document();
        let direction = Direction::resolve(doc.data_attr(element, "dir"), index);
        let row_speed = doc.data_attr(element, "px-per-sec").map(str::to_string);
        let root = doc.document_element();
        let root_style = page.computed_style(root);
        let speed = resolve_speed(
            row_speed.as_deref(),
            root_style.get(&self.config.speed_property),
            self.config.default_speed_px_per_sec,
        );
        let descriptor = AnimationDescriptor::new(direction, width, speed, self.config.min_duration_secs);
        tracing::debug!(
            index,
            direction = direction.as_str(),
            width,
            speed,
            duration_s = descriptor.duration_s,
            "row scheduled"
        );

        self.backend.install(
            page,
            &RowAnimation {
                index,
                track,
                descriptor,
            },
            rules,
        )?;
        self.gate.observe(page, element);

        let row = &mut self.rows[index];
        row.descriptor = Some(descriptor);
        row.measured_width = measured;
        Ok(())
    }

    /// Take a fresh copy of the row's content when its children are no longer just our track.
    fn resnapshot_if_replaced(&mut self, page: &Page, index: usize) -> TickerResult<()> {
        let doc = page.document();
        let row = &mut self.rows[index];
        if !doc.is_connected(row.element) || doc.children(row.element) == row.track.as_slice() {
            return Ok(());
        }
        tracing::debug!(index, "row content changed since the last pass");
        row.content = doc.snapshot_element_children(row.element)?;
        Ok(())
    }

    /// Stop and forget the row's current track, if any.
    fn teardown_row(&mut self, page: &mut Page, index: usize) -> TickerResult<()> {
        let row = &mut self.rows[index];
        row.descriptor = None;
        row.visible = None;
        if let Some(track) = row.track.take() {
            let element = row.element;
            self.backend.stop(page, track)?;
            self.gate.unobserve(page, element);
        }
        Ok(())
    }

    /// Add the pause class to every row still in the document.
    pub fn pause_all(&self, page: &mut Page) -> TickerResult<()> {
        self.set_pause_class(page, true)
    }

    /// Remove the pause class from every row still in the document.
    pub fn resume_all(&self, page: &mut Page) -> TickerResult<()> {
        self.set_pause_class(page, false)
    }

    fn set_pause_class(&self, page: &mut Page, paused: bool) -> TickerResult<()> {
        let doc = page.document_mut();
        for row in &self.rows {
            if !doc.contains(row.element) {
                continue;
            }
            if paused {
                doc.add_class(row.element, &self.config.pause_class)?;
            } else {
                doc.remove_class(row.element, &self.config.pause_class)?;
            }
        }
        Ok(())
    }

    /// Release everything the engine attached to the page. Safe to call more than once.
    #[tracing::instrument(skip_all)]
    pub fn destroy(&mut self, page: &mut Page) -> TickerResult<()> {
        if self.destroyed {
            return Ok(());
        }
        for row in &self.rows {
            self.gate.unobserve(page, row.element);
        }
        self.gate.disconnect(page);
        self.measurer.teardown(page)?;
        self.backend.teardown(page)?;
        self.stylesheet.remove(page)?;
        self.debouncer.cancel(page);
        for listener in self.listeners.drain(..) {
            page.remove_event_listener(listener);
        }
        self.destroyed = true;
        tracing::debug!(passes = self.passes, "ticker destroyed");
        Ok(())
    }

    pub fn report(&self, page: &Page) -> TickerReport {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowReport {
                index,
                element: row.element,
                track: row.track,
                direction: row.descriptor.map(|d| d.direction),
                duration_s: row.descriptor.map(|d| d.duration_s),
                distance_px: row.descriptor.map(|d| d.distance_px),
                measured_width: row.measured_width,
                visible: row.visible,
                paused_by_class: page.document().has_class(row.element, &self.config.pause_class),
            })
            .collect();
        TickerReport {
            backend: self.backend.kind(),
            passes: self.passes,
            rows,
            stylesheet: self.stylesheet.text(page),
        }
    }

    /// Markup of a row's original content, as snapshotted at install.
    pub fn original_html(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(|r| fragment_html(&r.content))
    }

    pub fn track(&self, index: usize) -> Option<NodeId> {
        self.rows.get(index).and_then(|r| r.track)
    }

    pub fn descriptor(&self, index: usize) -> Option<AnimationDescriptor> {
        self.rows.get(index).and_then(|r| r.descriptor)
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.gate.observer()
    }

    pub fn refresh_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl PageClient for TickerEngine {
    fn on_event(&mut self, page: &mut Page, listener: ListenerId, event: WindowEvent) -> TickerResult<()> {
        if self.destroyed || !self.listeners.contains(&listener) {
            return Ok(());
        }
        tracing::trace!(?event, "scheduling refresh");
        self.debouncer.schedule(page);
        Ok(())
    }

    fn on_timer(&mut self, page: &mut Page, timer: TimerId) -> TickerResult<()> {
        if self.debouncer.take_fired(timer) {
            self.refresh(page)?;
        }
        Ok(())
    }

    fn on_frame(&mut self, page: &mut Page, subscription: FrameSubscription, tick: FrameTick) -> TickerResult<()> {
        self.backend.on_frame(page, subscription, tick)
    }

    fn on_intersection(
        &mut self,
        page: &mut Page,
        observer: ObserverId,
        entries: &[IntersectionEntry],
    ) -> TickerResult<()> {
        if self.gate.observer() != Some(observer) {
            return Ok(());
        }
        for entry in entries {
            let Some(row) = self.rows.iter_mut().find(|r| r.element == entry.target) else {
                continue;
            };
            row.visible = Some(entry.is_intersecting);
            if let Some(track) = row.track {
                VisibilityGate::apply(page, track, entry.is_intersecting)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/engine.rs"]
mod tests;
