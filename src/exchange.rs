//! Export and import of query collections.
//!
//! Two formats are supported:
//!
//! - **JSON bundle** - full fidelity, carries records with their version
//!   history plus the tag and category snapshots.
//! - **SQL dump** - human readable `.sql` file with `--` comment banners. Only
//!   name, SQL, description, tag names and sample result survive a round
//!   trip.
//!
//! Imports are checked with [`validate_import_file`] first, then parsed
//! asynchronously from disk.

mod bundle;
mod files;
mod json;
mod sql_dump;

use std::path::Path;

pub use bundle::{ExportBundle, ExportFormat, ExportMetadata, FORMAT_VERSION, iso_timestamp};
pub use files::{
    ImportFileCheck, MAX_IMPORT_FILE_SIZE, backup_filename_for, check_import_path, detect_format,
    generate_backup_filename, save_file, validate_import_file
};
pub use json::{JsonImport, export_to_json, export_to_json_at, import_from_json, import_json_str};
pub use sql_dump::{SqlImport, export_to_sql, import_from_sql, parse_sql_dump, render_sql_dump};

use crate::{
    error::{AppResult, import_rejected_error},
    record::QueryRecord,
    tags::TagRepository
};

/// Parsed import file of either format
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedData {
    Json(JsonImport),
    Sql(SqlImport)
}

impl ImportedData {
    pub fn format(&self) -> ExportFormat {
        match self {
            Self::Json(_) => ExportFormat::Json,
            Self::Sql(_) => ExportFormat::Sql
        }
    }

    pub fn queries(&self) -> &[QueryRecord] {
        match self {
            Self::Json(data) => &data.queries,
            Self::Sql(data) => &data.queries
        }
    }

    pub fn into_queries(self) -> Vec<QueryRecord> {
        match self {
            Self::Json(data) => data.queries,
            Self::Sql(data) => data.queries
        }
    }
}

/// Export `queries` in the requested format
pub fn export(
    queries: &[QueryRecord],
    repo: &dyn TagRepository,
    format: ExportFormat
) -> AppResult<String> {
    match format {
        ExportFormat::Json => export_to_json(queries, repo),
        ExportFormat::Sql => export_to_sql(queries, repo)
    }
}

/// Check and parse an import file, dispatching on its extension.
///
/// # Errors
///
/// Returns the policy message when the file is rejected, otherwise the read
/// or parse error of the selected importer.
pub async fn import_file(path: impl AsRef<Path>) -> AppResult<ImportedData> {
    let path = path.as_ref();
    let check = check_import_path(path)?;
    if let Some(message) = check.error {
        tracing::warn!(path = %path.display(), %message, "import rejected");
        return Err(import_rejected_error(message));
    }
    let name = path.to_string_lossy();
    match detect_format(&name) {
        Some(ExportFormat::Json) => Ok(ImportedData::Json(import_from_json(path).await?)),
        Some(ExportFormat::Sql) => Ok(ImportedData::Sql(import_from_sql(path).await?)),
        None => Err(import_rejected_error(
            "Invalid file type. Please select a .json or .sql file."
        ))
    }
}

/// Resolve the `tag_names` of SQL-imported records into tag ids.
///
/// Resolved names become ids in `tags`; names the store does not know stay
/// in `tag_names` so that no tag information is lost.
pub fn resolve_imported_tags(
    queries: &mut [QueryRecord],
    repo: &dyn TagRepository
) -> AppResult<()> {
    for query in queries.iter_mut().filter(|q| !q.tag_names.is_empty()) {
        let names: Vec<&str> = query.tag_names.iter().map(|n| n.as_str()).collect();
        let ids = repo.resolve_tag_names(&names)?;
        let mut unresolved = Vec::new();
        for (name, id) in query.tag_names.drain(..).zip(ids) {
            match id {
                Some(id) if !query.tags.contains(&id) => query.tags.push(id),
                Some(_) => {}
                None => unresolved.push(name)
            }
        }
        if !unresolved.is_empty() {
            tracing::warn!(
                query = %query.display_name(),
                unresolved = unresolved.len(),
                "imported tag names have no match in the tag store"
            );
        }
        query.tag_names = unresolved;
    }
    Ok(())
}
