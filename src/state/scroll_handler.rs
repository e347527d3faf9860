//! Vertical scrolling keyboard and mouse handler.
//!
//! Transitions that move the AppState viewport in response to scroll input.
//! Positions are computed from the resolved offset, so scrolling never
//! accumulates past the ends of the document.

use crate::model::{KeyAction, SectionIndex};
use crate::state::AppState;
use crate::view_state::ScrollPosition;

/// Lines moved by one mouse wheel notch.
pub const WHEEL_LINES: usize = 3;

/// Direction of a mouse wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Toward the top of the document.
    Up,
    /// Toward the end of the document.
    Down,
}

/// Handle a scroll keyboard action.
///
/// Returns `false` for non-scroll actions, which leave the state unchanged.
pub fn handle_scroll_action(state: &mut AppState, action: KeyAction) -> bool {
    match next_position(state, action) {
        Some(position) => {
            state.scroll_to(position);
            true
        }
        None => false,
    }
}

/// Handle one mouse wheel notch.
pub fn handle_wheel(state: &mut AppState, direction: WheelDirection) {
    let offset = state.scroll_offset();
    let position = match direction {
        WheelDirection::Up => ScrollPosition::at_line(offset.saturating_sub(WHEEL_LINES)),
        WheelDirection::Down => clamped_line(state, offset.saturating_add(WHEEL_LINES)),
    };
    state.scroll_to(position);
}

/// Scroll position `action` leads to, or `None` for non-scroll actions.
pub fn next_position(state: &AppState, action: KeyAction) -> Option<ScrollPosition> {
    let offset = state.scroll_offset();
    let step = state.settings().scroll_lines;
    let page = usize::from(state.viewport().height).max(1);

    let position = match action {
        KeyAction::ScrollUp => ScrollPosition::at_line(offset.saturating_sub(step)),
        KeyAction::ScrollDown => clamped_line(state, offset.saturating_add(step)),
        KeyAction::PageUp => ScrollPosition::at_line(offset.saturating_sub(page)),
        KeyAction::PageDown => clamped_line(state, offset.saturating_add(page)),
        KeyAction::ScrollToTop => ScrollPosition::Top,
        KeyAction::ScrollToBottom => ScrollPosition::Bottom,
        KeyAction::NextSection => next_section_top(state, offset)
            .map(ScrollPosition::at_section)
            .unwrap_or(ScrollPosition::Bottom),
        KeyAction::PrevSection => prev_section_top(state, offset)
            .map(ScrollPosition::at_section)
            .unwrap_or(ScrollPosition::Top),
        KeyAction::Quit => return None,
    };
    Some(position)
}

/// Line position clamped to the last scrollable offset.
fn clamped_line(state: &AppState, line: usize) -> ScrollPosition {
    let max_offset = state
        .layout()
        .total_height()
        .saturating_sub(usize::from(state.viewport().height));
    ScrollPosition::at_line(line.min(max_offset))
}

/// First non-blank section starting below `offset`.
fn next_section_top(state: &AppState, offset: usize) -> Option<SectionIndex> {
    let layout = state.layout();
    (0..layout.section_count())
        .map(SectionIndex::new)
        .find(|&s| {
            let span = layout.section_span(s);
            !span.is_empty() && span.top.get() > offset
        })
}

/// Last non-blank section starting above `offset`.
fn prev_section_top(state: &AppState, offset: usize) -> Option<SectionIndex> {
    let layout = state.layout();
    (0..layout.section_count())
        .rev()
        .map(SectionIndex::new)
        .find(|&s| {
            let span = layout.section_span(s);
            !span.is_empty() && span.top.get() < offset
        })
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
