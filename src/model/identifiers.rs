//! Index newtypes for document parts.
//!
//! Both identifiers are positional: they are assigned in document order when
//! the document is mounted and stay stable for the lifetime of the view.

use std::fmt;

/// Section position in document order. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SectionIndex(usize);

impl SectionIndex {
    /// Create a new SectionIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for SectionIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.display())
    }
}

/// Statistic counter position, counted across the whole document in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CounterId(usize);

impl CounterId {
    /// Create a new CounterId from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "counter #{}", self.0)
    }
}
