//! Semantic scroll position

use super::types::LineOffset;
use crate::model::SectionIndex;

/// Semantic scroll position within the document.
///
/// Keeps scroll intent across relayouts:
/// - `Top`: always shows from line 0
/// - `Bottom`: always shows the last lines
/// - `AtLine`: a specific absolute line
/// - `AtSection`: a line inside a section; survives re-wrapping on resize
///
/// # Clamping Behavior
/// Every variant resolves into `[0, max(0, total_height - viewport_height)]`,
/// so the viewport is never scrolled past the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    /// View from line 0.
    #[default]
    Top,

    /// View the last `viewport_height` lines.
    Bottom,

    /// Specific line offset from top.
    AtLine(LineOffset),

    /// Keep a line of a section at the top of the viewport.
    AtSection {
        /// Anchor section.
        section: SectionIndex,
        /// Line offset within that section (0 = its first line).
        line_in_section: usize,
    },
}

impl ScrollPosition {
    /// Resolve to an absolute line offset.
    ///
    /// `section_top` maps a section to its first line in the current layout.
    /// An unknown section resolves like `Bottom`.
    pub fn resolve<F>(&self, total_height: usize, viewport_height: usize, section_top: F) -> LineOffset
    where
        F: Fn(SectionIndex) -> Option<usize>,
    {
        let max_offset = total_height.saturating_sub(viewport_height);
        let raw = match *self {
            Self::Top => 0,
            Self::Bottom => max_offset,
            Self::AtLine(offset) => offset.get(),
            Self::AtSection {
                section,
                line_in_section,
            } => section_top(section)
                .map(|top| top.saturating_add(line_in_section))
                .unwrap_or(max_offset),
        };
        LineOffset::new(raw.min(max_offset))
    }

    /// Position at an absolute line.
    pub fn at_line(offset: usize) -> Self {
        Self::AtLine(LineOffset::new(offset))
    }

    /// Position at the first line of a section.
    pub fn at_section(section: SectionIndex) -> Self {
        Self::AtSection {
            section,
            line_in_section: 0,
        }
    }
}
