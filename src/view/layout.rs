//! Screen layout rendering.
//!
//! Pure layout logic: splits the frame into the document pane and the
//! status bar, then renders both.

use crate::state::AppState;
use crate::view::constants::STATUS_BAR_HEIGHT;
use crate::view::{document, DeckStyles};
use crate::view_state::layout::HORIZONTAL_MARGIN;
use crate::view_state::ViewportDimensions;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Render the document pane and the status bar.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &DeckStyles) {
    let (document_area, status_area) = split_frame(frame.area());

    document::render_document(frame, text_area(document_area), state, styles);
    render_status_bar(frame, status_area, state, styles);
}

/// Viewport the engine should measure against for a terminal of `size`.
///
/// The full terminal width is passed on; the layout subtracts its own margins.
pub fn document_viewport(width: u16, height: u16) -> ViewportDimensions {
    let (document_area, _) = split_frame(Rect::new(0, 0, width, height));
    ViewportDimensions::new(document_area.width, document_area.height)
}

/// Split `area` into document pane (top) and status bar (bottom).
fn split_frame(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                    // Document pane
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Document pane without its horizontal margins.
fn text_area(area: Rect) -> Rect {
    let margin = HORIZONTAL_MARGIN.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

/// Scroll progress through the document, in whole percent.
fn scroll_percent(state: &AppState) -> usize {
    let max_offset = state
        .layout()
        .total_height()
        .saturating_sub(usize::from(state.viewport().height));
    if max_offset == 0 {
        100
    } else {
        state.scroll_offset() * 100 / max_offset
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &DeckStyles) {
    let revealable = state
        .document()
        .sections
        .iter()
        .filter(|s| !s.is_blank())
        .count();

    let status_text = format!(
        "{} | {}/{} revealed | {}% | j/k: scroll  n/p: section  q: quit",
        state.document().title,
        state.tracker().revealed_count(),
        revealable,
        scroll_percent(state),
    );

    let paragraph = Paragraph::new(Line::from(status_text)).style(styles.status());
    frame.render_widget(paragraph, area);
}
