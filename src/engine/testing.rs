//! Test doubles for the engine capabilities.

use super::observer::{Handle, IntersectionObserver, Threshold};
use std::collections::BTreeMap;

/// Call recorded by [`RecordingObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObserverCall {
    Observe(Handle, Threshold),
    Unobserve(Handle),
}

/// Observer that only remembers what it was asked to do.
///
/// Intersection entries are synthesized by the tests themselves.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub watched: BTreeMap<Handle, Threshold>,
    pub calls: Vec<ObserverCall>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watching(&self, handle: Handle) -> bool {
        self.watched.contains_key(&handle)
    }
}

impl IntersectionObserver for RecordingObserver {
    fn observe(&mut self, handle: Handle, threshold: Threshold) {
        self.watched.insert(handle, threshold);
        self.calls.push(ObserverCall::Observe(handle, threshold));
    }

    fn unobserve(&mut self, handle: Handle) {
        self.watched.remove(&handle);
        self.calls.push(ObserverCall::Unobserve(handle));
    }
}

/// Handles `0..n`, all mounted.
pub fn handles(n: u64) -> Vec<Option<Handle>> {
    (0..n).map(|i| Some(Handle::new(i))).collect()
}
