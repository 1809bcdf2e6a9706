//! Parser for subject catalog files.
//!
//! Catalog files are line-based: one subject per line, `#` starts a
//! comment, blank lines are skipped. Subject names are lowercased on load.

use crate::error::{CatalogError, Result};
use crate::types::SubjectCatalog;
use std::fs;
use std::path::Path;

/// Load a subject catalog from a file.
///
/// # Errors
/// - `IoError` if the file cannot be read
/// - `ParseError` if a subject appears twice (after lowercasing)
/// - `ValidationError` if the file contains no subjects
pub fn load_subject_catalog(path: &Path) -> Result<SubjectCatalog> {
    let content = fs::read_to_string(path)?;
    let file = path.display().to_string();
    let subjects = parse_subject_lines(&content, &file)?;
    Ok(SubjectCatalog::new(subjects))
}

/// Parse catalog file content into an ordered subject list.
fn parse_subject_lines(content: &str, file: &str) -> Result<Vec<String>> {
    let mut subjects: Vec<String> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        // Strip trailing comments, then whitespace
        let line_trimmed = match line.split_once('#') {
            Some((before, _)) => before.trim(),
            None => line.trim(),
        };
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }

        let normalized = line_trimmed.to_lowercase();
        if subjects.contains(&normalized) {
            return Err(CatalogError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Duplicate subject: {}", normalized),
            });
        }
        subjects.push(normalized);
    }

    if subjects.is_empty() {
        return Err(CatalogError::ValidationError(format!(
            "Subject catalog {} contains no subjects",
            file
        )));
    }

    Ok(subjects)
}
