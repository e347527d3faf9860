//! Document styling configuration.
//!
//! Provides distinct styles for each kind of layout line (badges, headings,
//! notes, statistics) plus the status bar.

use crate::view_state::LineKind;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== DeckStyles =====

/// Styles for every line kind of a laid-out document.
///
/// With colors disabled only text modifiers (bold, italic) remain, so
/// headings and numbers still stand out on a monochrome terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckStyles {
    badge: Style,
    heading: Style,
    text: Style,
    note: Style,
    label: Style,
    stat: Style,
    caption: Style,
    status: Style,
}

impl DeckStyles {
    /// Styles for `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        if config.colors_enabled() {
            Self {
                badge: Style::default().fg(Color::Magenta),
                heading: bold.fg(Color::Cyan),
                text: Style::default(),
                note: italic.fg(Color::DarkGray),
                label: Style::default().fg(Color::Yellow),
                stat: bold.fg(Color::Green),
                caption: Style::default().fg(Color::Gray),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
            }
        } else {
            Self {
                badge: Style::default(),
                heading: bold,
                text: Style::default(),
                note: italic,
                label: Style::default(),
                stat: bold,
                caption: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Base style of a layout line.
    ///
    /// For statistics this is the style of the number; see [`Self::caption`].
    pub fn style_for_kind(&self, kind: &LineKind) -> Style {
        match kind {
            LineKind::Badge => self.badge,
            LineKind::Heading => self.heading,
            LineKind::Text | LineKind::Bullet => self.text,
            LineKind::Note => self.note,
            LineKind::Label => self.label,
            LineKind::Stat { .. } => self.stat,
            LineKind::Blank | LineKind::Gap => Style::default(),
        }
    }

    /// Style of the caption after a statistic.
    pub fn caption(&self) -> Style {
        self.caption
    }

    /// Style of the status bar.
    pub fn status(&self) -> Style {
        self.status
    }

    /// Patch applied to a section whose entrance has not finished.
    pub fn entering(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }
}

impl Default for DeckStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CounterId;
    use serial_test::serial;

    // ===== ColorConfig Tests =====

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(
            config.colors_enabled(),
            "Colors should be enabled by default"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_no_color_env_any_value_disables() {
        // NO_COLOR can be any value (even empty string)
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with empty string should disable colors"
        );
    }

    // ===== DeckStyles Tests =====

    fn enabled() -> DeckStyles {
        DeckStyles::with_color_config(ColorConfig { enabled: true })
    }

    fn disabled() -> DeckStyles {
        DeckStyles::with_color_config(ColorConfig { enabled: false })
    }

    #[test]
    fn headings_and_stats_are_colored_when_enabled() {
        let styles = enabled();
        assert!(styles.style_for_kind(&LineKind::Heading).fg.is_some());
        let stat = LineKind::Stat {
            counter: CounterId::new(0),
            prefix: String::new(),
        };
        assert!(styles.style_for_kind(&stat).fg.is_some());
    }

    #[test]
    fn no_color_keeps_modifiers_only() {
        let styles = disabled();
        let heading = styles.style_for_kind(&LineKind::Heading);
        assert!(heading.fg.is_none());
        assert!(heading.add_modifier.contains(Modifier::BOLD));
        assert!(styles.status().fg.is_none());
        assert!(styles.caption().fg.is_none());
    }

    #[test]
    fn blank_lines_are_unstyled() {
        assert_eq!(enabled().style_for_kind(&LineKind::Blank), Style::default());
        assert_eq!(enabled().style_for_kind(&LineKind::Gap), Style::default());
    }

    #[test]
    fn entering_sections_are_dimmed() {
        assert!(enabled().entering().add_modifier.contains(Modifier::DIM));
    }
}
