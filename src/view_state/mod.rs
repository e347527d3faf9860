//! View-state layer - terminal geometry for the engine
//!
//! Pure data: nothing here touches the terminal. The host lays the document
//! out into lines, scrolls over them, and measures regions against the
//! viewport to produce intersection batches.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (LineOffset, LineSpan, ViewportDimensions)
//! - `height_index`: HeightIndex - section tops via Fenwick tree
//! - `layout`: DocumentLayout - wrapped lines of every section
//! - `scroll`: ScrollPosition - semantic scroll position enum
//! - `viewport`: ViewportObserver - intersection observer over line spans

pub mod height_index;
pub mod layout;
pub mod scroll;
pub mod types;
pub mod viewport;

pub use layout::{DocumentLayout, LayoutLine, LineKind};
pub use scroll::ScrollPosition;
pub use types::{LineOffset, LineSpan, ViewportDimensions};
pub use viewport::{intersection_ratio, ViewportObserver};
