//! Case-study document: ordered sections of static content.
//!
//! The document is presentation data only. The engine sees it as a list of
//! sections (one reveal slot each) and a list of statistics (one counter
//! each), both in document order.

use super::identifiers::{CounterId, SectionIndex};
use serde::Deserialize;

/// A whole case study.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseStudy {
    /// Document title, shown in the status bar.
    #[serde(default)]
    pub title: String,

    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One revealable section.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Section heading.
    #[serde(default)]
    pub heading: String,

    /// Short tag shown above the heading.
    #[serde(default)]
    pub badge: Option<String>,

    /// Body content in order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Piece of section content.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Wrapped body text.
    Paragraph {
        /// Text content.
        text: String,
    },
    /// Bulleted item.
    Bullet {
        /// Text content.
        text: String,
    },
    /// De-emphasized footnote.
    Note {
        /// Text content.
        text: String,
    },
    /// Inline tag, like a badge inside the body.
    Label {
        /// Text content.
        text: String,
    },
    /// Animated statistic.
    Stat {
        /// Value the counter ramps to.
        target: f64,
        /// Text before the number (e.g. `~`).
        #[serde(default)]
        prefix: String,
        /// Text after the number (e.g. `%`).
        #[serde(default)]
        suffix: String,
        /// Explanation shown after the figure.
        #[serde(default)]
        caption: Option<String>,
    },
}

/// A statistic located in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRef<'a> {
    /// Counter identity (document order across all sections).
    pub id: CounterId,
    /// Section holding the statistic.
    pub section: SectionIndex,
    /// Target value.
    pub target: f64,
    /// Text before the number.
    pub prefix: &'a str,
    /// Text after the number.
    pub suffix: &'a str,
}

impl CaseStudy {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Every statistic, in document order.
    pub fn stats(&self) -> impl Iterator<Item = StatRef<'_>> + '_ {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, s)| {
                s.blocks.iter().filter_map(move |block| match block {
                    Block::Stat {
                        target,
                        prefix,
                        suffix,
                        ..
                    } => Some((SectionIndex::new(section), *target, prefix.as_str(), suffix.as_str())),
                    _ => None,
                })
            })
            .enumerate()
            .map(|(id, (section, target, prefix, suffix))| StatRef {
                id: CounterId::new(id),
                section,
                target,
                prefix,
                suffix,
            })
    }

    /// Number of statistics.
    pub fn stat_count(&self) -> usize {
        self.stats().count()
    }
}

impl Section {
    /// Whether the section has nothing to render.
    pub fn is_blank(&self) -> bool {
        self.heading.trim().is_empty() && self.badge.is_none() && self.blocks.is_empty()
    }
}
