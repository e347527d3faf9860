//! Layout and timing constants for TUI rendering.
//!
//! Centralized location for the numeric values the shell tunes against.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line for the document title, reveal progress and key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows an unrevealed section is pushed down before its entrance.
///
/// Must not exceed the gap between sections, so an entering section never
/// draws over the one below it.
pub const MAX_ENTRANCE_OFFSET_ROWS: u16 = 2;

/// Poll timeout while nothing is animating.
///
/// Only user input can change the screen then, so the loop sleeps long.
pub const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(500);

/// Fallback terminal width when the backend reports zero.
pub const FALLBACK_WIDTH: u16 = 80;

/// Gap between a statistic's number and its caption.
pub const STAT_CAPTION_GAP: &str = "  ";
