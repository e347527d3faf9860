//! Shared fixtures for whitebox tests.
//!
//! Documents here are built in code so test geometry is exact: every body
//! line is short enough never to wrap at the default test width.

use crate::model::{Block, CaseStudy, Section};
use crate::state::{AppSettings, AppState};
use crate::view_state::ViewportDimensions;

/// Default test viewport: 80 columns, 10 rows of content.
pub const TEST_VIEWPORT: ViewportDimensions = ViewportDimensions {
    width: 80,
    height: 10,
};

/// `sections` sections, each a heading plus `body_lines` one-line paragraphs.
///
/// With `body_lines > 0` each section is `body_lines + 2` lines tall
/// (heading, blank, body) followed by the section gap.
pub fn stacked_document(sections: usize, body_lines: usize) -> CaseStudy {
    CaseStudy {
        title: "Fixture".to_string(),
        sections: (0..sections)
            .map(|s| Section {
                heading: format!("Section {}", s),
                badge: None,
                blocks: (0..body_lines)
                    .map(|l| Block::Paragraph {
                        text: format!("line {} of section {}", l, s),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Append a statistic to the end of section `section`.
pub fn add_stat(doc: &mut CaseStudy, section: usize, target: f64, suffix: &str) {
    doc.sections[section].blocks.push(Block::Stat {
        target,
        prefix: String::new(),
        suffix: suffix.to_string(),
        caption: None,
    });
}

/// State for `doc` with default settings, mounted in the test viewport.
pub fn mounted_state(doc: CaseStudy) -> AppState {
    mounted_state_with(doc, AppSettings::default(), TEST_VIEWPORT)
}

/// State for `doc`, mounted with explicit settings and viewport.
pub fn mounted_state_with(
    doc: CaseStudy,
    settings: AppSettings,
    viewport: ViewportDimensions,
) -> AppState {
    let mut state = AppState::new(doc, settings, viewport);
    state.mount();
    state
}
