//! Periodic timer capability and a deterministic implementation.
//!
//! [`TickScheduler`] does not read a wall clock. Its owner feeds it elapsed
//! time through [`TickScheduler::advance`], which fires every due tick in
//! chronological order. The terminal shell feeds it measured frame time;
//! tests fast-forward it.

use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one repeating timer. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Create a token from a raw id. Schedulers must not hand out an id twice.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Injectable repeating timer.
pub trait Scheduler {
    /// Schedule a tick every `interval`, first firing one interval from now.
    ///
    /// A zero interval is treated as the smallest representable interval.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerToken;

    /// Stop a timer. Cancelling an unknown or already cancelled token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    interval: Duration,
    next_due: Duration,
}

/// Manually advanced scheduler.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerToken, Timer>,
}

impl TickScheduler {
    /// Create a scheduler at time zero with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation, as far as this scheduler knows.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether `token` is still scheduled.
    pub fn is_active(&self, token: TimerToken) -> bool {
        self.timers.contains_key(&token)
    }

    /// Time until the earliest pending tick, if any timer is live.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers
            .values()
            .map(|t| t.next_due.saturating_sub(self.now))
            .min()
    }

    /// Advance the clock by `elapsed`, firing every tick that falls due.
    ///
    /// Ticks fire in due-time order (ties broken by token order). The
    /// callback receives the scheduler so a tick may cancel its own timer or
    /// others; cancelled timers fire no further ticks, even within this call.
    ///
    /// Returns the number of ticks fired.
    pub fn advance<F>(&mut self, elapsed: Duration, mut on_tick: F) -> usize
    where
        F: FnMut(TimerToken, &mut Self),
    {
        let deadline = self.now.saturating_add(elapsed);
        let mut fired = 0;

        while let Some((token, due)) = self.earliest_due(deadline) {
            self.now = due;
            if let Some(timer) = self.timers.get_mut(&token) {
                timer.next_due = timer.next_due.saturating_add(timer.interval);
            }
            fired += 1;
            on_tick(token, self);
        }

        self.now = deadline;
        fired
    }

    fn earliest_due(&self, deadline: Duration) -> Option<(TimerToken, Duration)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.next_due <= deadline)
            .min_by_key(|(token, t)| (t.next_due, **token))
            .map(|(token, t)| (*token, t.next_due))
    }
}

impl Scheduler for TickScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerToken {
        let interval = interval.max(Duration::from_nanos(1));
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            token,
            Timer {
                interval,
                next_due: self.now.saturating_add(interval),
            },
        );
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.remove(&token);
    }
}
