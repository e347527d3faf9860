//! Domain model types (pure).
//!
//! All types in this module are plain data: the document being shown, the
//! identifiers the engine uses for its parts, user intents and errors.

pub mod document;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use document::{Block, CaseStudy, Section, StatRef};
pub use error::{AppError, DocumentError};
pub use identifiers::{CounterId, SectionIndex};
pub use key_action::KeyAction;
