//! Helper functions for CLI operations.
//!
//! Reading input, choosing the tag store, loading collections and mapping
//! validation results to exit codes.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use super::{convert::convert_format, types::Collection};
use crate::{
    analyzer::{Severity, ValidationResult},
    cli::Format,
    error::{AppResult, file_read_error},
    exchange::{ImportedData, import_file, resolve_imported_tags},
    output::OutputOptions,
    record::QueryRecord,
    tags::{JsonFileTagStore, MemoryTagStore, TagRepository, TagSnapshot}
};

/// Calculates the process exit code from validation results.
///
/// - `0` - No findings or only suggestions
/// - `1` - At least one warning present
/// - `2` - At least one error present
///
/// # Example
///
/// ```
/// use sql_snippet_vault::{analyzer::validate, app::calculate_exit_code};
///
/// assert_eq!(calculate_exit_code(&[validate("")]), 2);
/// ```
pub fn calculate_exit_code(results: &[ValidationResult]) -> i32 {
    match results.iter().filter_map(ValidationResult::worst_severity).max() {
        Some(Severity::Error) => 2,
        Some(Severity::Warning) => 1,
        _ => 0
    }
}

/// Reads SQL text from a file, or from stdin when the path is "-".
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_sql_input(path: &Path) -> AppResult<String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

/// Label used in reports for an input path
pub fn input_label(path: &Path) -> String {
    if path.to_str() == Some("-") {
        String::from("stdin")
    } else {
        path.display().to_string()
    }
}

/// Create output options from CLI flags
pub fn create_output_options(format: Format, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color
    }
}

/// Open the JSON tag store at `path`, or an empty in-memory store
pub fn open_tag_store(path: Option<&Path>) -> Box<dyn TagRepository> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using JSON tag store");
            Box::new(JsonFileTagStore::new(path))
        }
        None => Box::new(MemoryTagStore::default())
    }
}

/// Load the records of a `.json` or `.sql` collection.
///
/// `repo` is only read. Tags and categories carried by a JSON bundle go into
/// the returned [`Collection`]; tag names of a SQL dump are resolved against
/// `repo`.
pub async fn load_collection(path: &Path, repo: &dyn TagRepository) -> AppResult<Collection> {
    match import_file(path).await? {
        ImportedData::Json(data) => {
            let bundle_tags = (!data.tags.is_empty()).then(|| {
                MemoryTagStore::from_snapshot(TagSnapshot {
                    tags:        Some(data.tags),
                    categories:  Some(data.categories).filter(|c| !c.is_empty()),
                    exported_at: None
                })
            });
            Ok(Collection {
                queries: data.queries,
                bundle_tags
            })
        }
        ImportedData::Sql(data) => {
            let mut queries = data.queries;
            resolve_imported_tags(&mut queries, repo)?;
            Ok(Collection {
                queries,
                bundle_tags: None
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::validate, output::OutputFormat};

    #[test]
    fn test_calculate_exit_code_clean() {
        assert_eq!(calculate_exit_code(&[]), 0);
    }

    #[test]
    fn test_calculate_exit_code_suggestions_only() {
        let result = validate("SELECT id FROM users LIMIT 1;");
        assert!(result.warnings.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(calculate_exit_code(&[result]), 0);
    }

    #[test]
    fn test_calculate_exit_code_warning() {
        assert_eq!(calculate_exit_code(&[validate("SELECT * FROM users")]), 1);
    }

    #[test]
    fn test_calculate_exit_code_error_takes_precedence() {
        let results = [validate("SELECT * FROM users"), validate("SELECT (1;")];
        assert_eq!(calculate_exit_code(&results), 2);
    }

    #[test]
    fn test_input_label_stdin() {
        assert_eq!(input_label(Path::new("-")), "stdin");
        assert_eq!(input_label(Path::new("q.sql")), "q.sql");
    }

    #[test]
    fn test_create_output_options_json_no_color() {
        let opts = create_output_options(Format::Json, true);
        assert!(matches!(opts.format, OutputFormat::Json));
        assert!(!opts.colored);
    }

    #[tokio::test]
    async fn test_load_collection_only_reads_tag_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let bundle = dir.path().join("backup.json");
        std::fs::write(
            &bundle,
            r##"{"queries": [{"id": 1, "sql": "SELECT 1;", "tags": ["t1"]}],
                "tags": [{"id": "t1", "name": "reports", "color": "#3b82f6", "createdAt": "2024-01-01"}]}"##
        )
        .unwrap();
        let store_path = dir.path().join("tags.json");
        let store = JsonFileTagStore::new(&store_path);

        let collection = load_collection(&bundle, &store).await.unwrap();
        assert!(!store_path.exists());
        assert_eq!(collection.queries.len(), 1);
        let source = collection.tag_source(&store);
        assert_eq!(source.tag_name("t1").unwrap().as_deref(), Some("reports"));
    }

    #[tokio::test]
    async fn test_load_collection_without_bundle_tags_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let bundle = dir.path().join("backup.json");
        std::fs::write(&bundle, r#"{"queries": []}"#).unwrap();
        let store = MemoryTagStore::default();
        let tag = store.create_tag("ops", None).unwrap();

        let collection = load_collection(&bundle, &store).await.unwrap();
        assert!(collection.bundle_tags.is_none());
        let source = collection.tag_source(&store);
        assert_eq!(source.tag_name(&tag.id).unwrap().as_deref(), Some("ops"));
    }

    #[test]
    fn test_read_sql_input_missing_file() {
        let result = read_sql_input(Path::new("/nonexistent/query.sql"));
        assert!(result.is_err());
    }
}
