//! Application state and transitions.
//!
//! AppState owns the document, its terminal layout, and the reveal engine
//! wired to a [`ViewportObserver`] and a [`TickScheduler`]. Everything here is
//! pure: time only moves when the shell calls [`AppState::advance`], and the
//! viewport only moves through scroll and resize transitions.
//!
//! # Lifecycle
//!
//! `new` → `mount` → (scroll / resize / advance)* → `unmount`
//!
//! Intersections are recomputed after every transition that can move a
//! region relative to the viewport, and the resulting batch is delivered to
//! the tracker and to every counter at once.

use crate::config::ResolvedConfig;
use crate::engine::{
    CounterAnimator, Handle, RampConfig, RevealStyle, RevealTiming, Threshold, TickScheduler,
    TimerToken, TrackerPhase, VisibilityTracker,
};
use crate::model::{CaseStudy, CounterId, SectionIndex};
use crate::view_state::{
    DocumentLayout, LineSpan, ScrollPosition, ViewportDimensions, ViewportObserver,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Engine parameters resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppSettings {
    /// Visible fraction that reveals a section.
    pub section_threshold: Threshold,
    /// Visible fraction that starts a counter.
    pub counter_threshold: Threshold,
    /// Counter ramp timing.
    pub ramp: RampConfig,
    /// Section entrance timing.
    pub timing: RevealTiming,
    /// Lines moved per scroll step.
    pub scroll_lines: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            section_threshold: Threshold::SECTION,
            counter_threshold: Threshold::COUNTER,
            ramp: RampConfig::default(),
            timing: RevealTiming::default(),
            scroll_lines: 1,
        }
    }
}

impl From<&ResolvedConfig> for AppSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            section_threshold: config.section_threshold(),
            counter_threshold: config.counter_threshold(),
            ramp: config.ramp(),
            timing: config.reveal_timing(),
            scroll_lines: usize::from(config.scroll_lines.max(1)),
        }
    }
}

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    document: CaseStudy,
    layout: DocumentLayout,
    viewport: ViewportDimensions,
    scroll: ScrollPosition,
    settings: AppSettings,

    observer: ViewportObserver,
    scheduler: TickScheduler,
    tracker: VisibilityTracker,
    counters: Vec<CounterAnimator>,

    /// Region per section; `None` for sections with nothing to render.
    section_handles: Vec<Option<Handle>>,
    /// Region per counter, indexed by `CounterId`.
    counter_handles: Vec<Option<Handle>>,
    /// Routes fired ticks to the counter that scheduled them.
    timers: HashMap<TimerToken, CounterId>,
    /// Scheduler time at which each section was revealed.
    reveal_times: Vec<Option<Duration>>,
    mounted: bool,
}

impl AppState {
    /// Lay out `document` for `viewport` and create one region per section
    /// and per statistic. Nothing is observed until [`mount`](Self::mount).
    pub fn new(document: CaseStudy, settings: AppSettings, viewport: ViewportDimensions) -> Self {
        let layout = DocumentLayout::compute(&document, viewport.width);
        let mut observer = ViewportObserver::new();

        let section_handles: Vec<Option<Handle>> = (0..layout.section_count())
            .map(SectionIndex::new)
            .map(|index| {
                let span = layout.section_span(index);
                (!span.is_empty()).then(|| observer.add_region(span))
            })
            .collect();

        let counters: Vec<CounterAnimator> = document
            .stats()
            .map(|stat| {
                CounterAnimator::new(stat.target, stat.suffix)
                    .with_ramp(settings.ramp)
                    .with_threshold(settings.counter_threshold)
            })
            .collect();

        let counter_handles = (0..counters.len())
            .map(|id| {
                layout
                    .counter_span(CounterId::new(id))
                    .map(|span| observer.add_region(span))
            })
            .collect();

        let section_count = document.section_count();
        Self {
            document,
            layout,
            viewport,
            scroll: ScrollPosition::Top,
            settings,
            observer,
            scheduler: TickScheduler::new(),
            tracker: VisibilityTracker::new(settings.section_threshold),
            counters,
            section_handles,
            counter_handles,
            timers: HashMap::new(),
            reveal_times: vec![None; section_count],
            mounted: false,
        }
    }

    /// Register sections and counters with the observer and deliver the
    /// first intersection batch.
    ///
    /// Returns `false` if already mounted or previously unmounted; a state is
    /// mounted at most once.
    pub fn mount(&mut self) -> bool {
        if self.mounted || self.tracker.phase() != TrackerPhase::Unregistered {
            return false;
        }

        let observed = self
            .tracker
            .register(self.section_handles.clone(), &mut self.observer);
        for (counter, handle) in self.counters.iter_mut().zip(&self.counter_handles) {
            counter.mount(*handle, &mut self.observer);
        }
        self.mounted = true;

        info!(
            sections = self.section_handles.len(),
            observed,
            counters = self.counters.len(),
            "Document mounted"
        );
        self.sync_intersections();
        true
    }

    /// Stop observing everything and cancel every pending tick.
    ///
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        let first = self.tracker.teardown(&mut self.observer);
        for counter in &mut self.counters {
            counter.teardown(&mut self.scheduler, &mut self.observer);
        }
        self.timers.clear();
        self.mounted = false;
        if first {
            info!(revealed = self.tracker.revealed_count(), "Document unmounted");
        }
    }

    /// Move the viewport to `position` and deliver any intersection changes.
    ///
    /// Returns whether anything was revealed or started.
    pub fn scroll_to(&mut self, position: ScrollPosition) -> bool {
        self.scroll = position;
        self.sync_intersections()
    }

    /// Adapt to a new terminal size.
    ///
    /// Re-wraps the document if the width changed, keeps the line at the top
    /// of the viewport anchored to its section, re-measures every region, and
    /// delivers the resulting intersection changes.
    pub fn resize(&mut self, viewport: ViewportDimensions) -> bool {
        if viewport == self.viewport {
            return false;
        }

        if viewport.width != self.layout.width() {
            self.scroll = self.anchored_scroll();
            self.layout = DocumentLayout::compute(&self.document, viewport.width);
            self.remeasure_regions();
            debug!(
                width = viewport.width,
                height = self.layout.total_height(),
                "Document relaid out"
            );
        }
        self.viewport = viewport;
        self.sync_intersections();
        true
    }

    /// Advance the clock by `elapsed`, routing every due tick to its counter.
    ///
    /// Returns whether the display may have changed: a counter moved or a
    /// section is still in its entrance transition.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Self {
            scheduler,
            counters,
            timers,
            ..
        } = self;

        let mut counter_moved = false;
        scheduler.advance(elapsed, |token, scheduler| {
            // Unknown tokens belong to timers already torn down.
            let Some(&id) = timers.get(&token) else {
                return;
            };
            let Some(counter) = counters.get_mut(id.get()) else {
                return;
            };
            counter_moved |= counter.on_tick(token, scheduler);
            if !counter.is_animating() {
                timers.remove(&token);
            }
        });

        counter_moved || self.sections_in_transition()
    }

    /// Whether anything still needs frames: a counter ramp or an entrance
    /// transition in progress.
    pub fn is_animating(&self) -> bool {
        self.counters.iter().any(CounterAnimator::is_animating) || self.sections_in_transition()
    }

    /// Current entrance style of a section.
    pub fn section_style(&self, index: SectionIndex) -> RevealStyle {
        let since = self
            .reveal_times
            .get(index.get())
            .copied()
            .flatten()
            .map(|at| self.scheduler.now().saturating_sub(at));
        self.settings.timing.style_at(index, since)
    }

    /// Resolved top line of the viewport.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
            .resolve(
                self.layout.total_height(),
                usize::from(self.viewport.height),
                |section| {
                    (section.get() < self.layout.section_count())
                        .then(|| self.layout.section_span(section).top.get())
                },
            )
            .get()
    }

    /// Semantic scroll position as last set.
    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    /// Viewport as a span of document lines.
    pub fn viewport_span(&self) -> LineSpan {
        LineSpan::new(self.scroll_offset(), usize::from(self.viewport.height))
    }

    /// The document being shown.
    pub fn document(&self) -> &CaseStudy {
        &self.document
    }

    /// Current layout.
    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Current viewport size.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    /// Resolved engine parameters.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Section reveal state.
    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// All counters in document order.
    pub fn counters(&self) -> &[CounterAnimator] {
        &self.counters
    }

    /// One counter.
    pub fn counter(&self, id: CounterId) -> Option<&CounterAnimator> {
        self.counters.get(id.get())
    }

    /// Region handle of a section, if it has one.
    pub fn section_handle(&self, index: SectionIndex) -> Option<Handle> {
        self.section_handles.get(index.get()).copied().flatten()
    }

    /// The viewport observer backing this state.
    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    /// The scheduler backing this state.
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Whether `mount` has run and `unmount` has not.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Measure regions and hand the batch to the tracker and every counter.
    fn sync_intersections(&mut self) -> bool {
        if !self.mounted {
            return false;
        }

        let viewport = self.viewport_span();
        let batch = self.observer.update(viewport);
        if batch.is_empty() {
            return false;
        }

        let now = self.scheduler.now();
        let revealed = self.tracker.on_intersect(&batch);
        for index in &revealed {
            if let Some(slot) = self.reveal_times.get_mut(index.get()) {
                *slot = Some(now);
            }
        }

        let mut started = 0;
        for (id, counter) in self.counters.iter_mut().enumerate() {
            if counter.on_intersect(&batch, &mut self.scheduler) {
                started += 1;
                if let Some(token) = counter.timer() {
                    self.timers.insert(token, CounterId::new(id));
                }
            }
        }

        !revealed.is_empty() || started > 0
    }

    /// Express the current offset relative to the section under it.
    fn anchored_scroll(&self) -> ScrollPosition {
        match self.scroll {
            ScrollPosition::Top | ScrollPosition::Bottom => self.scroll,
            _ => {
                let offset = self.scroll_offset();
                match self.layout.section_at(offset) {
                    Some(section) => ScrollPosition::AtSection {
                        section,
                        line_in_section: offset - self.layout.section_span(section).top.get(),
                    },
                    None => ScrollPosition::at_line(offset),
                }
            }
        }
    }

    fn remeasure_regions(&mut self) {
        for (i, handle) in self.section_handles.iter().enumerate() {
            if let Some(handle) = handle {
                let span = self.layout.section_span(SectionIndex::new(i));
                self.observer.set_region(*handle, span);
            }
        }
        for (id, handle) in self.counter_handles.iter().enumerate() {
            if let (Some(handle), Some(span)) =
                (handle, self.layout.counter_span(CounterId::new(id)))
            {
                self.observer.set_region(*handle, span);
            }
        }
    }

    fn sections_in_transition(&self) -> bool {
        let now = self.scheduler.now();
        self.reveal_times.iter().enumerate().any(|(i, at)| {
            at.is_some_and(|at| {
                now.saturating_sub(at) < self.settings.timing.settle_time(SectionIndex::new(i))
            })
        })
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
