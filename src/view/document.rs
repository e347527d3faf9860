//! Document pane rendering.
//!
//! Turns the visible window of the layout into styled terminal lines.
//! Unrevealed sections draw nothing. Entering sections are dimmed and pushed
//! down by their remaining entrance offset, which never exceeds the section
//! gap, so shifted lines land in space the next section leaves empty.

use crate::engine::RevealStyle;
use crate::state::AppState;
use crate::view::constants::{MAX_ENTRANCE_OFFSET_ROWS, STAT_CAPTION_GAP};
use crate::view::DeckStyles;
use crate::view_state::{LayoutLine, LineKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the document window into `area`.
pub fn render_document(frame: &mut Frame, area: Rect, state: &AppState, styles: &DeckStyles) {
    let lines = document_lines(state, usize::from(area.height), styles);
    frame.render_widget(Paragraph::new(lines), area);
}

/// Styled rows for a pane `height` rows tall, top to bottom.
///
/// Always returns exactly `height` lines; rows nothing lands on are empty.
pub fn document_lines(state: &AppState, height: usize, styles: &DeckStyles) -> Vec<Line<'static>> {
    let offset = state.scroll_offset();
    let max_shift = usize::from(MAX_ENTRANCE_OFFSET_ROWS);
    // Lines just above the window may be shifted into it
    let first = offset.saturating_sub(max_shift);

    let mut rows: Vec<Option<Line<'static>>> = vec![None; height];
    for (i, line) in state
        .layout()
        .window(first, height + (offset - first))
        .iter()
        .enumerate()
    {
        if line.kind == LineKind::Gap {
            continue;
        }
        let style = state.section_style(line.section);
        if style.is_hidden() {
            continue;
        }

        let shifted = first + i + usize::from(style.offset_rows(MAX_ENTRANCE_OFFSET_ROWS));
        let Some(row) = shifted.checked_sub(offset).filter(|&r| r < height) else {
            continue;
        };
        if rows[row].is_none() {
            rows[row] = Some(styled_line(line, style, state, styles));
        }
    }

    rows.into_iter().map(Option::unwrap_or_default).collect()
}

fn styled_line(
    line: &LayoutLine,
    reveal: RevealStyle,
    state: &AppState,
    styles: &DeckStyles,
) -> Line<'static> {
    let base = styles.style_for_kind(&line.kind);
    let styled = match &line.kind {
        LineKind::Blank | LineKind::Gap => Line::default(),
        LineKind::Stat { counter, prefix } => {
            let value = state
                .counter(*counter)
                .map(|c| c.render())
                .unwrap_or_default();
            let mut spans = vec![Span::styled(format!("{}{}", prefix, value), base)];
            if !line.text.is_empty() {
                spans.push(Span::styled(
                    format!("{}{}", STAT_CAPTION_GAP, line.text),
                    styles.caption(),
                ));
            }
            Line::from(spans)
        }
        _ => Line::from(Span::styled(line.text.clone(), base)),
    };

    if reveal.is_settled() {
        styled
    } else {
        styled.patch_style(styles.entering())
    }
}
