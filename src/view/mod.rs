//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod document;
mod layout;
mod styles;

pub use document::{document_lines, render_document};
pub use layout::{document_viewport, render_layout};
pub use styles::{ColorConfig, DeckStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, CaseStudy, KeyAction};
use crate::state::{handle_scroll_action, handle_wheel, AppSettings, AppState, WheelDirection};
use constants::{FALLBACK_WIDTH, IDLE_POLL_TIMEOUT};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Settings the shell is started with.
///
/// Carries resolved configuration from `main.rs` into the TUI, the same way
/// for every backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Engine settings: thresholds, ramp and entrance timing.
    pub settings: AppSettings,
    /// Redraw interval while something is animating.
    pub frame_interval: Duration,
    /// Whether styles carry colors.
    pub colors: ColorConfig,
}

impl RunOptions {
    /// Options for `config`, honoring `--no-color` and `NO_COLOR`.
    pub fn from_config(config: &ResolvedConfig, no_color: bool) -> Self {
        Self {
            settings: AppSettings::from(config),
            frame_interval: config.frame_interval(),
            colors: ColorConfig::from_env_and_args(no_color),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: DeckStyles,
    frame_interval: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen, lays the document
    /// out for the current size and mounts it.
    pub fn new(document: CaseStudy, options: RunOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, document, options))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C).
    /// Frames are paced by `frame_interval` only while a counter ramps or a
    /// section is entering; otherwise the loop waits on input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Initial render - ensures screen has content immediately
        self.draw()?;
        let mut last_frame = Instant::now();

        loop {
            let timeout = if self.app_state.is_animating() {
                self.frame_interval
            } else {
                IDLE_POLL_TIMEOUT
            };

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty = self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            dirty |= self.app_state.advance(now.duration_since(last_frame));
            last_frame = now;

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(terminal: Terminal<B>, document: CaseStudy, options: RunOptions) -> Self {
        let (width, height) = match terminal.size() {
            Ok(size) if size.width > 0 => (size.width, size.height),
            _ => (FALLBACK_WIDTH, 0),
        };

        let mut app_state =
            AppState::new(document, options.settings, document_viewport(width, height));
        app_state.mount();

        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles: DeckStyles::with_color_config(options.colors),
            frame_interval: options.frame_interval,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.key_bindings.get(key) {
            Some(KeyAction::Quit) => true,
            Some(action) => {
                handle_scroll_action(&mut self.app_state, action);
                false
            }
            None => false,
        }
    }

    /// Handle a single mouse event
    ///
    /// Returns true if the event moved the viewport.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let direction = match mouse.kind {
            MouseEventKind::ScrollUp => WheelDirection::Up,
            MouseEventKind::ScrollDown => WheelDirection::Down,
            _ => return false,
        };
        handle_wheel(&mut self.app_state, direction);
        true
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        // Guard against zero width from resize events
        let width = if width > 0 { width } else { FALLBACK_WIDTH };
        self.app_state.resize(document_viewport(width, height));
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        self.terminal.draw(|frame| {
            layout::render_layout(frame, &self.app_state, &self.styles);
        })?;
        Ok(())
    }

    /// Tear down observation and pending ticks before the terminal goes away.
    fn shutdown(&mut self) {
        self.app_state.unmount();
        info!(
            revealed = self.app_state.tracker().revealed_count(),
            "Viewer closed"
        );
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
// They are gated with cfg to ensure they're not accessible from outside the crate.
//
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Goes through the same layout and mount path as production `new()`,
    /// minus terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        document: CaseStudy,
        options: RunOptions,
    ) -> Self {
        Self::with_terminal(terminal, document, options)
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) -> bool {
        self.handle_mouse(mouse)
    }

    /// Handle a terminal resize (test-only accessor)
    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    /// Advance the animation clock (test-only accessor)
    pub(crate) fn advance_test(&mut self, elapsed: Duration) -> bool {
        self.app_state.advance(elapsed)
    }

    /// Render the current frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Tear down as on quit (test-only accessor)
    pub(crate) fn shutdown_test(&mut self) {
        self.shutdown()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application for `document`
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit: every observer
/// registration and pending tick is released before the terminal is
/// restored.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_document(document: CaseStudy, options: RunOptions) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(document, options) {
        Ok(app) => app,
        Err(e) => {
            // Raw mode may already be on
            restore_terminal()?;
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.shutdown();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
