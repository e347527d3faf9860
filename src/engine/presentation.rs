//! Entrance styling contract for revealed sections.
//!
//! Hidden sections are fully transparent and pushed down; revealed sections
//! are opaque and in place. The switch eases over a fixed transition, delayed
//! per section by `stagger × index`, so sections revealed together still
//! cascade in document order.

use crate::model::SectionIndex;
use std::time::Duration;

/// Default entrance transition length.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(700);

/// Default per-index delay step.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Visual state of a section at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0.0 = invisible, 1.0 = fully drawn.
    pub opacity: f64,
    /// Fraction of the hidden offset still applied (1.0 = fully pushed down).
    pub offset: f64,
}

impl RevealStyle {
    /// Style of a section that has not been revealed.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        offset: 1.0,
    };

    /// Style of a section whose entrance has finished.
    pub const REVEALED: Self = Self {
        opacity: 1.0,
        offset: 0.0,
    };

    /// Whether nothing is drawn.
    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Whether the entrance has finished.
    pub fn is_settled(&self) -> bool {
        self.opacity >= 1.0 && self.offset <= 0.0
    }

    /// Offset in whole rows for a hidden offset of `max_rows`.
    pub fn offset_rows(&self, max_rows: u16) -> u16 {
        (self.offset * f64::from(max_rows)).round().clamp(0.0, f64::from(max_rows)) as u16
    }
}

/// Transition timing shared by all sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Length of the entrance transition.
    pub transition: Duration,
    /// Extra delay per section index.
    pub stagger: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION,
            stagger: DEFAULT_STAGGER,
        }
    }
}

impl RevealTiming {
    /// Timing with no transition and no delay.
    pub fn instant() -> Self {
        Self {
            transition: Duration::ZERO,
            stagger: Duration::ZERO,
        }
    }

    /// Delay before section `index` starts its entrance.
    pub fn delay_for(&self, index: SectionIndex) -> Duration {
        self.stagger
            .saturating_mul(u32::try_from(index.get()).unwrap_or(u32::MAX))
    }

    /// Time from reveal until section `index` is fully settled.
    pub fn settle_time(&self, index: SectionIndex) -> Duration {
        self.delay_for(index).saturating_add(self.transition)
    }

    /// Style of section `index`, `since_reveal` after it was revealed.
    ///
    /// `None` means the section has not been revealed.
    pub fn style_at(&self, index: SectionIndex, since_reveal: Option<Duration>) -> RevealStyle {
        let Some(since) = since_reveal else {
            return RevealStyle::HIDDEN;
        };

        let delay = self.delay_for(index);
        if since < delay {
            return RevealStyle::HIDDEN;
        }
        let into = since - delay;
        if self.transition.is_zero() || into >= self.transition {
            return RevealStyle::REVEALED;
        }

        let progress = ease(into.as_secs_f64() / self.transition.as_secs_f64());
        RevealStyle {
            opacity: progress,
            offset: 1.0 - progress,
        }
    }
}

/// Standard ease-in-out curve, `cubic-bezier(0.4, 0, 0.2, 1)`.
fn ease(x: f64) -> f64 {
    const X1: f64 = 0.4;
    const Y1: f64 = 0.0;
    const X2: f64 = 0.2;
    const Y2: f64 = 1.0;

    let x = x.clamp(0.0, 1.0);
    let bezier = |t: f64, p1: f64, p2: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };

    // x(t) is monotonic for these control points; bisect for t.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, X1, X2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier((lo + hi) / 2.0, Y1, Y2)
}
