//! Terminal implementation of the intersection observer capability.
//!
//! Regions are line spans in document coordinates. The host moves the
//! viewport and calls [`ViewportObserver::update`], which reports each
//! watched region once when first measured and again whenever it crosses its
//! threshold.

use super::types::LineSpan;
use crate::engine::{Handle, IntersectionEntry, IntersectionObserver, Threshold};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct Watch {
    threshold: Threshold,
    /// Last reported state; `None` until the first update after `observe`.
    reported: Option<bool>,
}

/// Tracks region geometry and which regions the engine watches.
#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    regions: HashMap<Handle, LineSpan>,
    watched: BTreeMap<Handle, Watch>,
    next_id: u64,
}

impl ViewportObserver {
    /// Create an observer with no regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region and return its handle. Handles increase monotonically,
    /// so regions created in document order are reported in document order.
    pub fn add_region(&mut self, span: LineSpan) -> Handle {
        let handle = Handle::new(self.next_id);
        self.next_id += 1;
        self.regions.insert(handle, span);
        handle
    }

    /// Move or resize an existing region. Unknown handles are ignored.
    pub fn set_region(&mut self, handle: Handle, span: LineSpan) {
        if let Some(region) = self.regions.get_mut(&handle) {
            *region = span;
        }
    }

    /// Current geometry of a region.
    pub fn region(&self, handle: Handle) -> Option<LineSpan> {
        self.regions.get(&handle).copied()
    }

    /// Whether the engine currently watches `handle`.
    pub fn is_observing(&self, handle: Handle) -> bool {
        self.watched.contains_key(&handle)
    }

    /// Number of watched regions.
    pub fn observed_count(&self) -> usize {
        self.watched.len()
    }

    /// Measure every watched region against `viewport`.
    ///
    /// Returns one entry per region that is new since `observe` or whose
    /// intersecting state changed, ordered by handle.
    pub fn update(&mut self, viewport: LineSpan) -> Vec<IntersectionEntry> {
        let mut batch = Vec::new();

        for (&handle, watch) in self.watched.iter_mut() {
            let ratio = self
                .regions
                .get(&handle)
                .map(|span| intersection_ratio(*span, viewport))
                .unwrap_or(0.0);
            let is_intersecting = watch.threshold.is_met_by(ratio);

            if watch.reported != Some(is_intersecting) {
                watch.reported = Some(is_intersecting);
                batch.push(IntersectionEntry {
                    handle,
                    is_intersecting,
                    ratio,
                });
            }
        }

        if !batch.is_empty() {
            trace!(entries = batch.len(), top = viewport.top.get(), "Intersection batch");
        }
        batch
    }
}

impl IntersectionObserver for ViewportObserver {
    fn observe(&mut self, handle: Handle, threshold: Threshold) {
        self.watched.insert(
            handle,
            Watch {
                threshold,
                reported: None,
            },
        );
    }

    fn unobserve(&mut self, handle: Handle) {
        self.watched.remove(&handle);
    }
}

/// Visible fraction of `region` inside `viewport`.
///
/// A region taller than the viewport is measured against the viewport
/// height, so it can still reach any threshold while it fills the screen.
pub fn intersection_ratio(region: LineSpan, viewport: LineSpan) -> f64 {
    let basis = region.height.min(viewport.height);
    if basis == 0 {
        return 0.0;
    }
    region.overlap(&viewport) as f64 / basis as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(top: usize, height: usize) -> LineSpan {
        LineSpan::new(top, height)
    }

    mod ratio {
        use super::*;

        #[test]
        fn fully_visible_region_is_one() {
            assert_eq!(intersection_ratio(LineSpan::new(5, 4), viewport(0, 20)), 1.0);
        }

        #[test]
        fn partially_visible_region_is_fraction() {
            // lines 18..28, viewport 0..20: two of ten lines visible
            assert_eq!(intersection_ratio(LineSpan::new(18, 10), viewport(0, 20)), 0.2);
        }

        #[test]
        fn off_screen_region_is_zero() {
            assert_eq!(intersection_ratio(LineSpan::new(30, 4), viewport(0, 20)), 0.0);
        }

        #[test]
        fn tall_region_is_measured_against_viewport() {
            let tall = LineSpan::new(0, 100);
            assert_eq!(intersection_ratio(tall, viewport(10, 20)), 1.0);
            assert_eq!(intersection_ratio(tall, viewport(90, 20)), 0.5);
        }

        #[test]
        fn empty_region_or_viewport_is_zero() {
            assert_eq!(intersection_ratio(LineSpan::new(0, 0), viewport(0, 20)), 0.0);
            assert_eq!(intersection_ratio(LineSpan::new(0, 5), viewport(0, 0)), 0.0);
        }
    }

    mod delivery {
        use super::*;

        #[test]
        fn first_update_reports_every_watched_region() {
            let mut observer = ViewportObserver::new();
            let near = observer.add_region(LineSpan::new(0, 5));
            let far = observer.add_region(LineSpan::new(100, 5));
            observer.observe(near, Threshold::SECTION);
            observer.observe(far, Threshold::SECTION);

            let batch = observer.update(viewport(0, 20));
            assert_eq!(batch.len(), 2);
            assert_eq!(batch[0].handle, near);
            assert!(batch[0].is_intersecting);
            assert_eq!(batch[1].handle, far);
            assert!(!batch[1].is_intersecting);
        }

        #[test]
        fn unchanged_state_is_not_reported_again() {
            let mut observer = ViewportObserver::new();
            let h = observer.add_region(LineSpan::new(0, 5));
            observer.observe(h, Threshold::SECTION);

            assert_eq!(observer.update(viewport(0, 20)).len(), 1);
            assert!(observer.update(viewport(1, 20)).is_empty());
        }

        #[test]
        fn threshold_crossings_are_reported_both_ways() {
            let mut observer = ViewportObserver::new();
            let h = observer.add_region(LineSpan::new(20, 10));
            observer.observe(h, Threshold::COUNTER);

            assert!(!observer.update(viewport(0, 20))[0].is_intersecting);
            // 4 of 10 lines: below one half
            assert!(observer.update(viewport(4, 20)).is_empty());
            // 5 of 10 lines
            let entering = observer.update(viewport(5, 20));
            assert!(entering[0].is_intersecting);
            assert_eq!(entering[0].ratio, 0.5);
            let leaving = observer.update(viewport(0, 20));
            assert!(!leaving[0].is_intersecting);
        }

        #[test]
        fn unobserved_region_is_silent() {
            let mut observer = ViewportObserver::new();
            let h = observer.add_region(LineSpan::new(0, 5));
            observer.observe(h, Threshold::SECTION);
            observer.unobserve(h);

            assert!(!observer.is_observing(h));
            assert!(observer.update(viewport(0, 20)).is_empty());
        }

        #[test]
        fn moved_region_is_remeasured() {
            let mut observer = ViewportObserver::new();
            let h = observer.add_region(LineSpan::new(50, 5));
            observer.observe(h, Threshold::SECTION);
            assert!(!observer.update(viewport(0, 20))[0].is_intersecting);

            observer.set_region(h, LineSpan::new(10, 5));
            assert!(observer.update(viewport(0, 20))[0].is_intersecting);
        }

        #[test]
        fn handles_are_unique() {
            let mut observer = ViewportObserver::new();
            let a = observer.add_region(LineSpan::new(0, 1));
            let b = observer.add_region(LineSpan::new(0, 1));
            assert_ne!(a, b);
            assert!(a < b);
        }
    }
}
