//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the document up by the configured line step. Default: k/↑
    ScrollUp,
    /// Scroll the document down by the configured line step. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the document. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the document. Default: G/End
    ScrollToBottom,

    // Section navigation
    /// Scroll so the next section starts at the top. Default: n/]
    NextSection,
    /// Scroll so the previous section starts at the top. Default: p/[
    PrevSection,

    // Application
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action moves the viewport.
    pub fn is_scroll(&self) -> bool {
        !matches!(self, KeyAction::Quit)
    }
}
