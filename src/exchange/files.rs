use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use super::bundle::ExportFormat;
use crate::error::{AppResult, file_read_error, file_write_error};

/// Largest accepted import file, in bytes (10 MiB)
pub const MAX_IMPORT_FILE_SIZE: u64 = 10 * 1024 * 1024;

const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please select a .json or .sql file.";
const TOO_LARGE_MESSAGE: &str = "File too large. Maximum size is 10MB.";

/// Outcome of the pre-import policy check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFileCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:    Option<String>
}

impl ImportFileCheck {
    fn accepted() -> Self {
        Self {
            is_valid: true,
            error:    None
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            is_valid: false,
            error:    Some(message.to_string())
        }
    }
}

/// Lowercased text after the last `.`, or the whole lowercased name when
/// there is no dot
fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Format implied by the file name, if importable
pub fn detect_format(name: &str) -> Option<ExportFormat> {
    ExportFormat::from_extension(&extension_of(name))
}

/// Check extension and size before any parse attempt.
///
/// # Example
///
/// ```
/// use sql_snippet_vault::exchange::validate_import_file;
///
/// assert!(validate_import_file("backup.JSON", 1024).is_valid);
/// assert!(!validate_import_file("notes.txt", 10).is_valid);
/// ```
pub fn validate_import_file(name: &str, size: u64) -> ImportFileCheck {
    if detect_format(name).is_none() {
        return ImportFileCheck::rejected(INVALID_TYPE_MESSAGE);
    }
    if size > MAX_IMPORT_FILE_SIZE {
        return ImportFileCheck::rejected(TOO_LARGE_MESSAGE);
    }
    ImportFileCheck::accepted()
}

/// [`validate_import_file`] for a file on disk
pub fn check_import_path(path: &Path) -> AppResult<ImportFileCheck> {
    let display = path.display().to_string();
    let metadata = std::fs::metadata(path).map_err(|e| file_read_error(&display, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);
    Ok(validate_import_file(&name, metadata.len()))
}

/// Backup file name for the current UTC day
pub fn generate_backup_filename(format: ExportFormat) -> String {
    backup_filename_for(format, Utc::now().date_naive())
}

/// Backup file name for a given day
pub fn backup_filename_for(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "sql-queries-backup-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write exported text to `dir/filename`, creating `dir` when needed
pub fn save_file(dir: &Path, filename: &str, content: &str) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| file_write_error(&dir.display().to_string(), e))?;
    let path = dir.join(filename);
    std::fs::write(&path, content)
        .map_err(|e| file_write_error(&path.display().to_string(), e))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "saved export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(detect_format("dump.SQL"), Some(ExportFormat::Sql));
        assert_eq!(detect_format("a.b.json"), Some(ExportFormat::Json));
    }

    #[test]
    fn test_name_without_dot() {
        assert_eq!(detect_format("json"), Some(ExportFormat::Json));
        assert_eq!(detect_format("README"), None);
    }

    #[test]
    fn test_type_checked_before_size() {
        let check = validate_import_file("huge.txt", MAX_IMPORT_FILE_SIZE + 1);
        assert_eq!(check.error.as_deref(), Some(INVALID_TYPE_MESSAGE));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_import_file("a.sql", MAX_IMPORT_FILE_SIZE).is_valid);
        let check = validate_import_file("a.sql", MAX_IMPORT_FILE_SIZE + 1);
        assert_eq!(check.error.as_deref(), Some(TOO_LARGE_MESSAGE));
    }
}
