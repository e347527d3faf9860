//! Loading documents from disk.

use super::parse_document;
use crate::model::{CaseStudy, DocumentError};
use std::path::Path;

/// Read and parse a document file.
///
/// # Errors
///
/// Returns `DocumentError::NotFound` if the file does not exist,
/// `DocumentError::Read` for other I/O failures, and the errors of
/// [`parse_document`] for its contents.
pub fn load_document_file(path: &Path) -> Result<CaseStudy, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&raw, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_not_found() {
        let err = load_document_file(Path::new("/nonexistent/revealdeck/doc.toml")).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound { .. }));
    }

    #[test]
    fn loads_valid_file() {
        let path = std::env::temp_dir().join("revealdeck_test_document.toml");
        fs::write(
            &path,
            "title = \"T\"\n[[sections]]\nheading = \"Only\"\n",
        )
        .expect("write fixture");

        let result = load_document_file(&path);
        let _ = fs::remove_file(&path);

        let doc = result.expect("document loads");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.sections[0].heading, "Only");
    }

    #[test]
    fn invalid_file_reports_parse_error_with_path() {
        let path = std::env::temp_dir().join("revealdeck_test_bad_document.toml");
        fs::write(&path, "sections = 3").expect("write fixture");

        let result = load_document_file(&path);
        let _ = fs::remove_file(&path);

        match result {
            Err(DocumentError::Parse { origin, .. }) => {
                assert!(origin.ends_with("revealdeck_test_bad_document.toml"))
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
