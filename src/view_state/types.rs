//! Core view-state newtypes

/// Absolute line offset from the start of the document. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineOffset(usize);

impl LineOffset {
    /// Create a new LineOffset from a raw value.
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Get the raw usize value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Add an amount to this offset, saturating at usize::MAX.
    pub fn saturating_add(&self, amount: usize) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Subtract an amount from this offset, saturating at 0.
    pub fn saturating_sub(&self, amount: usize) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

/// Viewport dimensions in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportDimensions {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Half-open vertical range of document lines: `[top, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSpan {
    /// First line of the span.
    pub top: LineOffset,
    /// Number of lines covered.
    pub height: usize,
}

impl LineSpan {
    /// Create a span starting at `top` covering `height` lines.
    pub fn new(top: usize, height: usize) -> Self {
        Self {
            top: LineOffset::new(top),
            height,
        }
    }

    /// One past the last line.
    pub fn bottom(&self) -> usize {
        self.top.get().saturating_add(self.height)
    }

    /// Whether the span covers no lines.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Whether `line` falls inside the span.
    pub fn contains(&self, line: usize) -> bool {
        line >= self.top.get() && line < self.bottom()
    }

    /// Number of lines shared with `other`.
    pub fn overlap(&self, other: &LineSpan) -> usize {
        let start = self.top.get().max(other.top.get());
        let end = self.bottom().min(other.bottom());
        end.saturating_sub(start)
    }
}
