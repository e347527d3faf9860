//! Line layout of a case-study document at a given width.
//!
//! Every section becomes a run of terminal lines followed by a fixed gap.
//! Blank sections take no lines at all. Section tops are kept in a
//! [`HeightIndex`] so lookups by scroll line stay logarithmic.

use super::height_index::HeightIndex;
use super::types::LineSpan;
use crate::model::{Block, CaseStudy, CounterId, Section, SectionIndex};
use unicode_width::UnicodeWidthChar;

/// Blank lines between consecutive sections.
pub const SECTION_GAP: usize = 2;

/// Columns reserved on each side of the text.
pub const HORIZONTAL_MARGIN: u16 = 2;

/// Narrowest wrap width, used when the terminal is tiny.
pub const MIN_WRAP_WIDTH: usize = 10;

/// What a layout line shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Small tag above the heading.
    Badge,
    /// Section heading.
    Heading,
    /// Paragraph text.
    Text,
    /// Bulleted item (first line carries the bullet glyph).
    Bullet,
    /// Footnote.
    Note,
    /// Inline label.
    Label,
    /// Animated statistic; `text` holds the caption.
    Stat {
        /// Counter whose value is drawn on this line.
        counter: CounterId,
        /// Text before the number.
        prefix: String,
    },
    /// Empty line inside a section.
    Blank,
    /// Spacing after a section. Not part of the section's observed region.
    Gap,
}

/// One terminal line of the laid-out document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Section the line belongs to.
    pub section: SectionIndex,
    /// Line role.
    pub kind: LineKind,
    /// Already-wrapped text.
    pub text: String,
}

/// The whole document laid out for one terminal width.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    width: u16,
    lines: Vec<LayoutLine>,
    /// Slot height per section: content plus trailing gap.
    slots: HeightIndex,
    /// Content height per section, excluding the gap.
    content: Vec<usize>,
    /// Absolute line of each counter, indexed by `CounterId`.
    counter_lines: Vec<usize>,
}

impl DocumentLayout {
    /// Lay out `doc` for a viewport `width` columns wide.
    pub fn compute(doc: &CaseStudy, width: u16) -> Self {
        let wrap_width = wrap_width_for(width);
        let mut lines = Vec::new();
        let mut content = Vec::with_capacity(doc.section_count());
        let mut slot_heights = Vec::with_capacity(doc.section_count());
        let mut counter_lines = Vec::with_capacity(doc.stat_count());

        for (i, section) in doc.sections.iter().enumerate() {
            let index = SectionIndex::new(i);
            let start = lines.len();
            layout_section(section, index, wrap_width, &mut lines, &mut counter_lines);
            let height = lines.len() - start;

            let gap = if height > 0 { SECTION_GAP } else { 0 };
            for _ in 0..gap {
                lines.push(LayoutLine {
                    section: index,
                    kind: LineKind::Gap,
                    text: String::new(),
                });
            }

            content.push(height);
            slot_heights.push(height + gap);
        }

        Self {
            width,
            lines,
            slots: HeightIndex::from_heights(slot_heights),
            content,
            counter_lines,
        }
    }

    /// Width the layout was computed for.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total document height in lines.
    pub fn total_height(&self) -> usize {
        self.lines.len()
    }

    /// Number of sections, blank ones included.
    pub fn section_count(&self) -> usize {
        self.content.len()
    }

    /// Observed region of a section. Empty for blank sections.
    pub fn section_span(&self, index: SectionIndex) -> LineSpan {
        let height = self.content.get(index.get()).copied().unwrap_or(0);
        LineSpan::new(self.slots.top_of(index.get()), height)
    }

    /// Line holding a counter, as a one-line span.
    pub fn counter_span(&self, id: CounterId) -> Option<LineSpan> {
        self.counter_lines
            .get(id.get())
            .map(|&line| LineSpan::new(line, 1))
    }

    /// Section whose slot contains `line`.
    pub fn section_at(&self, line: usize) -> Option<SectionIndex> {
        self.slots.lower_bound(line).map(SectionIndex::new)
    }

    /// All lines in document order.
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    /// Lines visible in `[offset, offset + height)`.
    pub fn window(&self, offset: usize, height: usize) -> &[LayoutLine] {
        let start = offset.min(self.lines.len());
        let end = offset.saturating_add(height).min(self.lines.len());
        &self.lines[start..end]
    }
}

fn wrap_width_for(width: u16) -> usize {
    (width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize).max(MIN_WRAP_WIDTH)
}

fn layout_section(
    section: &Section,
    index: SectionIndex,
    wrap_width: usize,
    lines: &mut Vec<LayoutLine>,
    counter_lines: &mut Vec<usize>,
) {
    if section.is_blank() {
        return;
    }

    let push = |lines: &mut Vec<LayoutLine>, kind: LineKind, text: String| {
        lines.push(LayoutLine {
            section: index,
            kind,
            text,
        });
    };

    if let Some(badge) = &section.badge {
        push(lines, LineKind::Badge, format!("[ {} ]", badge));
    }
    for line in wrap_text(&section.heading, wrap_width) {
        push(lines, LineKind::Heading, line);
    }
    if !section.blocks.is_empty() {
        push(lines, LineKind::Blank, String::new());
    }

    for block in &section.blocks {
        match block {
            Block::Paragraph { text } => {
                for line in wrap_text(text, wrap_width) {
                    push(lines, LineKind::Text, line);
                }
            }
            Block::Bullet { text } => {
                let body = wrap_text(text, wrap_width.saturating_sub(2).max(1));
                for (n, line) in body.into_iter().enumerate() {
                    let glyph = if n == 0 { "• " } else { "  " };
                    push(lines, LineKind::Bullet, format!("{}{}", glyph, line));
                }
            }
            Block::Note { text } => {
                push(lines, LineKind::Blank, String::new());
                for line in wrap_text(text, wrap_width) {
                    push(lines, LineKind::Note, line);
                }
            }
            Block::Label { text } => {
                for line in wrap_text(text, wrap_width) {
                    push(lines, LineKind::Label, line);
                }
            }
            Block::Stat {
                prefix, caption, ..
            } => {
                let counter = CounterId::new(counter_lines.len());
                counter_lines.push(lines.len());
                push(
                    lines,
                    LineKind::Stat {
                        counter,
                        prefix: prefix.clone(),
                    },
                    caption.clone().unwrap_or_default(),
                );
            }
        }
    }
}

/// Word-wrap `text` into lines at most `width` columns wide.
///
/// Display width follows `unicode-width`. Words longer than a line are split
/// at character boundaries. Explicit newlines start a new line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width: usize = word.chars().map(char_width).sum();
            let sep = usize::from(!current.is_empty());

            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let w = char_width(c);
                if current_width + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}
