//! Viewport-intersection capability.
//!
//! The engine never measures geometry itself. A host platform implements
//! [`IntersectionObserver`] and reports [`IntersectionEntry`] batches back to
//! whoever registered interest in a handle.

/// Opaque reference to a renderable region.
///
/// Identity is the only meaningful property: two handles are the same
/// region iff they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Create a handle from a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Fraction of a region that must be visible before it counts as intersecting.
///
/// # Invariants
/// - `0.0 < value <= 1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Threshold used for document sections (20% visible).
    pub const SECTION: Self = Self(0.2);

    /// Threshold used for counters (50% visible).
    pub const COUNTER: Self = Self(0.5);

    /// Create a threshold, clamping into `(0, 1]`.
    ///
    /// Non-finite or non-positive input falls back to the smallest positive
    /// ratio so that "any visible part" still counts.
    pub fn new(ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Self(f64::MIN_POSITIVE);
        }
        Self(ratio.min(1.0))
    }

    /// Get the raw ratio.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Whether `ratio` meets this threshold.
    pub fn is_met_by(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::SECTION
    }
}

/// One intersection change reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Region the change applies to.
    pub handle: Handle,
    /// Whether the region currently meets its threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the region, in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionEntry {
    /// Entry for a region that crossed into view.
    pub fn entering(handle: Handle, ratio: f64) -> Self {
        Self {
            handle,
            is_intersecting: true,
            ratio,
        }
    }

    /// Entry for a region that dropped below its threshold.
    pub fn leaving(handle: Handle, ratio: f64) -> Self {
        Self {
            handle,
            is_intersecting: false,
            ratio,
        }
    }
}

/// Platform primitive that watches regions against the viewport.
///
/// Implementations deliver entries out of band (the caller polls them and
/// routes each batch to the engine components that observed the handles).
pub trait IntersectionObserver {
    /// Start watching `handle`, reporting crossings of `threshold`.
    ///
    /// Observing an already observed handle replaces its threshold.
    fn observe(&mut self, handle: Handle, threshold: Threshold);

    /// Stop watching `handle`. Unknown handles are ignored.
    fn unobserve(&mut self, handle: Handle);
}

impl<O: IntersectionObserver + ?Sized> IntersectionObserver for &mut O {
    fn observe(&mut self, handle: Handle, threshold: Threshold) {
        (**self).observe(handle, threshold);
    }

    fn unobserve(&mut self, handle: Handle) {
        (**self).unobserve(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_clamps_above_one() {
        assert_eq!(Threshold::new(3.0).get(), 1.0);
    }

    #[test]
    fn threshold_rejects_non_positive_and_nan() {
        assert!(Threshold::new(0.0).get() > 0.0);
        assert!(Threshold::new(-1.0).get() > 0.0);
        assert!(Threshold::new(f64::NAN).get() > 0.0);
    }

    #[test]
    fn section_threshold_is_met_at_twenty_percent() {
        assert!(Threshold::SECTION.is_met_by(0.2));
        assert!(Threshold::SECTION.is_met_by(0.75));
        assert!(!Threshold::SECTION.is_met_by(0.19));
    }

    #[test]
    fn counter_threshold_is_stricter_than_section() {
        assert!(Threshold::COUNTER > Threshold::SECTION);
        assert!(!Threshold::COUNTER.is_met_by(0.3));
        assert!(Threshold::COUNTER.is_met_by(0.5));
    }

    #[test]
    fn zero_ratio_never_meets_any_threshold() {
        assert!(!Threshold::new(0.0).is_met_by(0.0));
    }

    #[test]
    fn entry_constructors_set_intersecting_flag() {
        let h = Handle::new(7);
        assert!(IntersectionEntry::entering(h, 1.0).is_intersecting);
        assert!(!IntersectionEntry::leaving(h, 0.0).is_intersecting);
        assert_eq!(IntersectionEntry::entering(h, 1.0).handle.get(), 7);
    }
}
