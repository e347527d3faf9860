//! Counter animator: a one-shot numeric ramp from 0 to a target.
//!
//! # State machine
//!
//! ```text
//! Idle ──start──▶ Animating ──accumulator ≥ target──▶ Done
//!   │                 │
//!   └────cancel───────┴──────────▶ Cancelled
//! ```
//!
//! `Done` and `Cancelled` are terminal. Re-entering the viewport after the
//! first start never restarts the ramp.
//!
//! # Numeric semantics
//!
//! The ramp adds `target / (duration / tick)` to a floating accumulator once
//! on start and then on every tick, and displays its floor, so the displayed value is a
//! non-decreasing integer. The last tick clamps to exactly `target`.
//! Non-positive or non-finite targets complete immediately at 0 without
//! scheduling anything.

use super::observer::{Handle, IntersectionEntry, IntersectionObserver, Threshold};
use super::scheduler::{Scheduler, TimerToken};
use std::time::Duration;
use tracing::debug;

/// Default ramp length.
pub const DEFAULT_RAMP_DURATION: Duration = Duration::from_millis(1500);

/// Default tick cadence.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Timing of a counter ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampConfig {
    /// Total time the ramp is meant to take.
    pub duration: Duration,
    /// Interval between ticks.
    pub tick: Duration,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_RAMP_DURATION,
            tick: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl RampConfig {
    /// A ramp that completes on start (no ticks).
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            tick: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Number of ticks the ramp spans, as a fraction (1500 / 16 = 93.75).
    ///
    /// Independent of the target: larger targets take larger steps.
    pub fn steps(&self) -> f64 {
        let tick = self.tick.as_secs_f64();
        if tick <= 0.0 {
            return 0.0;
        }
        self.duration.as_secs_f64() / tick
    }

    /// Per-tick increment for `target`, or `None` when no ramp is needed.
    pub fn increment_for(&self, target: f64) -> Option<f64> {
        let steps = self.steps();
        if target <= 0.0 || !steps.is_finite() || steps <= 0.0 {
            return None;
        }
        // Targets too small to step through finish at once
        let increment = target / steps;
        (increment > 0.0).then_some(increment)
    }
}

/// Where a counter is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    /// Waiting for the first viewport entry.
    Idle,
    /// Ticking toward the target.
    Animating,
    /// Showing exactly the target. Terminal.
    Done,
    /// Torn down before completing. Terminal.
    Cancelled,
}

/// Animated statistic value.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    target: f64,
    suffix: String,
    current: f64,
    accumulator: f64,
    increment: f64,
    ramp: RampConfig,
    threshold: Threshold,
    handle: Option<Handle>,
    timer: Option<TimerToken>,
    phase: CounterPhase,
    started: bool,
}

impl CounterAnimator {
    /// Create an idle counter with the default ramp.
    ///
    /// `suffix` is appended verbatim when rendering.
    pub fn new(target: f64, suffix: impl Into<String>) -> Self {
        let target = if target.is_finite() && target > 0.0 {
            target
        } else {
            0.0
        };
        Self {
            target,
            suffix: suffix.into(),
            current: 0.0,
            accumulator: 0.0,
            increment: 0.0,
            ramp: RampConfig::default(),
            threshold: Threshold::COUNTER,
            handle: None,
            timer: None,
            phase: CounterPhase::Idle,
            started: false,
        }
    }

    /// Replace the ramp timing. Only meaningful before `start`.
    pub fn with_ramp(mut self, ramp: RampConfig) -> Self {
        self.ramp = ramp;
        self
    }

    /// Replace the viewport threshold. Only meaningful before `mount`.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Attach the counter to its on-screen region and start observing it.
    ///
    /// An absent handle leaves the counter idle until torn down.
    pub fn mount<O>(&mut self, handle: Option<Handle>, observer: &mut O)
    where
        O: IntersectionObserver + ?Sized,
    {
        if let Some(old) = self.handle.take() {
            observer.unobserve(old);
        }
        if let Some(handle) = handle {
            observer.observe(handle, self.threshold);
        }
        self.handle = handle;
    }

    /// React to a batch of intersection entries.
    ///
    /// Starts the ramp if the batch reports this counter's region entering
    /// view. Returns whether the ramp started.
    pub fn on_intersect<S>(&mut self, entries: &[IntersectionEntry], scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        let Some(handle) = self.handle else {
            return false;
        };
        let entered = entries
            .iter()
            .any(|e| e.handle == handle && e.is_intersecting);
        entered && self.start(scheduler)
    }

    /// Begin the ramp. Only the first call on an idle counter has an effect.
    ///
    /// Returns `true` if this call started (or immediately completed) the ramp.
    pub fn start<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if self.phase != CounterPhase::Idle {
            return false;
        }

        self.started = true;
        let Some(increment) = self.ramp.increment_for(self.target) else {
            self.current = self.target;
            self.phase = CounterPhase::Done;
            debug!(goal = self.target, "Counter completed without ramp");
            return true;
        };

        self.increment = increment;
        self.accumulator = 0.0;
        self.phase = CounterPhase::Animating;
        debug!(goal = self.target, increment, "Counter ramp started");

        // First step lands on start; the timer supplies the rest.
        self.step(scheduler);
        if self.phase == CounterPhase::Animating {
            self.timer = Some(scheduler.schedule_repeating(self.ramp.tick));
        }
        true
    }

    /// Advance the ramp by one tick of `token`.
    ///
    /// Ticks for other timers, or arriving after completion or cancellation,
    /// are ignored. Returns whether the tick was consumed.
    pub fn on_tick<S>(&mut self, token: TimerToken, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if self.phase != CounterPhase::Animating || self.timer != Some(token) {
            return false;
        }

        self.step(scheduler);
        true
    }

    fn step<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.accumulator += self.increment;
        if self.accumulator >= self.target {
            self.current = self.target;
            self.phase = CounterPhase::Done;
            if let Some(timer) = self.timer.take() {
                scheduler.cancel(timer);
            }
            debug!(goal = self.target, "Counter ramp finished");
        } else {
            self.current = self.accumulator.floor();
        }
    }

    /// Stop any pending tick. The displayed value freezes where it is.
    pub fn cancel<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        if matches!(self.phase, CounterPhase::Idle | CounterPhase::Animating) {
            self.phase = CounterPhase::Cancelled;
        }
    }

    /// Cancel the ramp and release the observed region.
    pub fn teardown<S, O>(&mut self, scheduler: &mut S, observer: &mut O)
    where
        S: Scheduler + ?Sized,
        O: IntersectionObserver + ?Sized,
    {
        self.cancel(scheduler);
        if let Some(handle) = self.handle.take() {
            observer.unobserve(handle);
        }
    }

    /// Value to display right now.
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Sanitized target (0 for non-positive or non-finite input).
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Display suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Whether `start` has ever taken effect.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Whether a tick is pending.
    pub fn is_animating(&self) -> bool {
        self.phase == CounterPhase::Animating
    }

    /// Timer currently driving the ramp.
    pub fn timer(&self) -> Option<TimerToken> {
        self.timer
    }

    /// Observed region, if mounted.
    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    /// Displayed value followed by the suffix, e.g. `"40%"`.
    pub fn render(&self) -> String {
        format!("{}{}", self.current, self.suffix)
    }
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;
