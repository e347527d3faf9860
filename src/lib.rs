//! revealdeck
//!
//! Terminal viewer for case-study documents: sections fade in once as they
//! are scrolled into view, and statistics count up to their value the first
//! time they become visible.
//!
//! The library follows a Pure Core / Impure Shell architecture. `engine`,
//! `view_state` and `state` are pure and testable without a terminal; only
//! `view` touches it.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
