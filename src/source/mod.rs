//! Case-study document sources.
//!
//! A document comes either from a TOML file given on the command line or
//! from the sample bundled into the binary. Both are parsed and validated
//! at the boundary; the rest of the application only sees [`CaseStudy`].

use crate::model::{CaseStudy, DocumentError};
use std::path::PathBuf;
use tracing::info;

pub mod file;

pub use file::load_document_file;

/// Origin label used in errors for the bundled sample.
pub const BUILTIN_ORIGIN: &str = "<builtin>";

const BUILTIN_DOCUMENT: &str = include_str!("../../assets/case_study.toml");

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// TOML file on disk.
    File(PathBuf),
    /// Sample compiled into the binary.
    Builtin,
}

impl DocumentSource {
    /// Load and validate the document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if the file is missing or unreadable, the TOML
    /// does not match the document schema, or there are no sections.
    pub fn load(&self) -> Result<CaseStudy, DocumentError> {
        let document = match self {
            DocumentSource::File(path) => load_document_file(path)?,
            DocumentSource::Builtin => parse_document(BUILTIN_DOCUMENT, BUILTIN_ORIGIN)?,
        };
        info!(
            origin = %self.origin(),
            sections = document.section_count(),
            stats = document.stat_count(),
            "Document loaded"
        );
        Ok(document)
    }

    /// Human-readable origin for messages.
    pub fn origin(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Builtin => BUILTIN_ORIGIN.to_string(),
        }
    }
}

/// Pick the document source for an optional CLI path.
pub fn detect_document_source(file: Option<PathBuf>) -> DocumentSource {
    match file {
        Some(path) => DocumentSource::File(path),
        None => DocumentSource::Builtin,
    }
}

/// Parse and validate document TOML.
///
/// `origin` names the input in error messages.
///
/// # Errors
///
/// Returns `DocumentError::Parse` for schema or syntax errors and
/// `DocumentError::Empty` for a document without sections.
pub fn parse_document(raw: &str, origin: &str) -> Result<CaseStudy, DocumentError> {
    let document: CaseStudy = toml::from_str(raw).map_err(|e| DocumentError::Parse {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;

    if document.sections.is_empty() {
        return Err(DocumentError::Empty {
            origin: origin.to_string(),
        });
    }

    Ok(document)
}
