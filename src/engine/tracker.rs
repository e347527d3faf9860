//! Visibility tracker: monotonic reveal set over a fixed list of sections.
//!
//! # Lifecycle
//!
//! `Unregistered → Observing → TornDown`. Registration happens once at mount;
//! teardown releases every observed handle and is the only way out of
//! `Observing`. Entries delivered outside `Observing` are ignored.
//!
//! # Invariants
//! - A section index, once revealed, stays revealed.
//! - Only `is_intersecting == true` entries can add to the set.
//! - Entries for handles that were never registered are ignored.

use super::observer::{Handle, IntersectionEntry, IntersectionObserver, Threshold};
use crate::model::SectionIndex;
use tracing::{debug, warn};

/// Where the tracker is in its mount/unmount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    /// No handles registered yet.
    #[default]
    Unregistered,
    /// Handles are being observed.
    Observing,
    /// Observation released; the reveal set is frozen.
    TornDown,
}

/// Converts intersection entries into a monotonically growing reveal set.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    handles: Vec<Option<Handle>>,
    revealed: Vec<bool>,
    revealed_count: usize,
    threshold: Threshold,
    phase: TrackerPhase,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(Threshold::SECTION)
    }
}

impl VisibilityTracker {
    /// Create a tracker that will observe sections at `threshold`.
    pub fn new(threshold: Threshold) -> Self {
        Self {
            handles: Vec::new(),
            revealed: Vec::new(),
            revealed_count: 0,
            threshold,
            phase: TrackerPhase::Unregistered,
        }
    }

    /// Register the ordered section handles and begin observing them.
    ///
    /// `None` entries are sections that are not mounted; they keep their
    /// index but are never observed and so can never be revealed through
    /// this registration.
    ///
    /// Returns the number of handles actually observed. Calling this a second
    /// time is ignored and returns 0.
    pub fn register<O>(&mut self, handles: Vec<Option<Handle>>, observer: &mut O) -> usize
    where
        O: IntersectionObserver + ?Sized,
    {
        if self.phase != TrackerPhase::Unregistered {
            warn!(phase = ?self.phase, "Ignoring repeated section registration");
            return 0;
        }

        let mut observed = 0;
        for handle in handles.iter().flatten() {
            observer.observe(*handle, self.threshold);
            observed += 1;
        }

        debug!(
            sections = handles.len(),
            observed, "Registered sections for reveal tracking"
        );

        self.revealed = vec![false; handles.len()];
        self.handles = handles;
        self.phase = TrackerPhase::Observing;
        observed
    }

    /// Apply one batch of intersection entries.
    ///
    /// Returns the indices revealed by this batch, in delivery order.
    pub fn on_intersect(&mut self, entries: &[IntersectionEntry]) -> Vec<SectionIndex> {
        let mut newly_revealed = Vec::new();
        if self.phase != TrackerPhase::Observing {
            return newly_revealed;
        }

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(index) = self.index_of(entry.handle) else {
                continue;
            };
            if self.revealed[index] {
                continue;
            }
            self.revealed[index] = true;
            self.revealed_count += 1;
            debug!(section = index, ratio = entry.ratio, "Section revealed");
            newly_revealed.push(SectionIndex::new(index));
        }

        newly_revealed
    }

    /// Whether the section at `index` has ever become visible.
    ///
    /// Out-of-range indices are never revealed.
    pub fn is_revealed(&self, index: SectionIndex) -> bool {
        self.revealed.get(index.get()).copied().unwrap_or(false)
    }

    /// Revealed indices in document order.
    pub fn revealed(&self) -> impl Iterator<Item = SectionIndex> + '_ {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| **r)
            .map(|(i, _)| SectionIndex::new(i))
    }

    /// Number of revealed sections.
    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// Number of registered section slots, mounted or not.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no sections were registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Whether every registered section has been revealed.
    pub fn all_revealed(&self) -> bool {
        !self.handles.is_empty() && self.revealed_count == self.handles.len()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// The threshold sections are observed at.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Stop observing every registered handle.
    ///
    /// Returns `true` the first time it releases observation; later calls
    /// (or a call before registration) do nothing and return `false`.
    /// The reveal set stays readable after teardown.
    pub fn teardown<O>(&mut self, observer: &mut O) -> bool
    where
        O: IntersectionObserver + ?Sized,
    {
        match self.phase {
            TrackerPhase::Observing => {
                for handle in self.handles.iter().flatten() {
                    observer.unobserve(*handle);
                }
                self.phase = TrackerPhase::TornDown;
                debug!(revealed = self.revealed_count, "Section tracking torn down");
                true
            }
            TrackerPhase::Unregistered => {
                self.phase = TrackerPhase::TornDown;
                false
            }
            TrackerPhase::TornDown => false,
        }
    }

    /// First registered index carrying `handle`.
    fn index_of(&self, handle: Handle) -> Option<usize> {
        self.handles.iter().position(|h| *h == Some(handle))
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
