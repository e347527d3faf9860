//! Error types for revealdeck.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every fatal failure
//!   - [`DocumentError`] - Case-study document loading failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! All of these are fatal and surface before or around the event loop. The
//! reveal engine itself has no error channel: missing handles, duplicate
//! notifications, stray ticks and degenerate counter targets are absorbed
//! into valid states instead of being reported.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert via `From`, so `?` composes across layers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The case-study document could not be loaded.
    #[error("Failed to load document: {0}")]
    Document(#[from] DocumentError),

    /// The configuration file could not be loaded.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The log file could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures while loading a case-study document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file does not exist.
    #[error("Document not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The document exists but could not be read.
    #[error("Failed to read document at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the schema.
    #[error("Invalid document {origin}: {reason}")]
    Parse {
        /// File path, or `<builtin>` for the bundled sample.
        origin: String,
        /// Parser message.
        reason: String,
    },

    /// The document has no sections to show.
    #[error("Document {origin} has no sections")]
    Empty {
        /// File path, or `<builtin>` for the bundled sample.
        origin: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn document_not_found_display_includes_path() {
        let err = DocumentError::NotFound {
            path: PathBuf::from("/tmp/missing.toml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Document not found"));
        assert!(msg.contains("/tmp/missing.toml"));
    }

    #[test]
    fn document_read_error_keeps_source() {
        use std::error::Error as _;

        let err = DocumentError::Read {
            path: PathBuf::from("case.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("case.toml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn document_empty_display() {
        let err = DocumentError::Empty {
            origin: "<builtin>".to_string(),
        };
        assert_eq!(err.to_string(), "Document <builtin> has no sections");
    }

    #[test]
    fn app_error_from_document_error() {
        let err: AppError = DocumentError::Empty {
            origin: "x".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Document(_)));
        assert!(err.to_string().starts_with("Failed to load document"));
    }

    #[test]
    fn app_error_from_io_error() {
        let err: AppError = io::Error::other("tty gone").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }
}
