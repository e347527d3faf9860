//! Scroll-driven reveal and counting engine (pure).
//!
//! Nothing in here touches a terminal or a clock. Geometry arrives as
//! [`IntersectionEntry`] batches from an [`IntersectionObserver`], time
//! arrives as ticks from a [`Scheduler`].

pub mod counter;
pub mod observer;
pub mod presentation;
pub mod scheduler;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use counter::{CounterAnimator, CounterPhase, RampConfig};
pub use observer::{Handle, IntersectionEntry, IntersectionObserver, Threshold};
pub use presentation::{RevealStyle, RevealTiming};
pub use scheduler::{Scheduler, TickScheduler, TimerToken};
pub use tracker::{TrackerPhase, VisibilityTracker};
