use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::bundle::ExportBundle;
use crate::{
    error::{
        AppResult, file_read_error, import_error, import_format_error, json_parse_error,
        serialization_error
    },
    record::QueryRecord,
    tags::{Category, Tag, TagRepository}
};

/// Contents recovered from a JSON export
#[derive(Debug, Clone, PartialEq)]
pub struct JsonImport {
    pub queries:    Vec<QueryRecord>,
    pub tags:       Vec<Tag>,
    pub categories: Vec<Category>,
    /// Bundle metadata, passed through untouched
    pub metadata:   Option<Value>
}

/// Serialize `queries` with full tag and category snapshots from `repo`
pub fn export_to_json(queries: &[QueryRecord], repo: &dyn TagRepository) -> AppResult<String> {
    export_to_json_at(
        queries,
        repo.list_tags()?,
        repo.list_categories()?,
        Utc::now()
    )
}

/// Same as [`export_to_json`] with explicit snapshots and timestamp
pub fn export_to_json_at(
    queries: &[QueryRecord],
    tags: Vec<Tag>,
    categories: Vec<Category>,
    exported_at: DateTime<Utc>
) -> AppResult<String> {
    let bundle = ExportBundle::new(queries.to_vec(), tags, categories, exported_at);
    tracing::info!(
        queries = bundle.metadata.total_queries,
        tags = bundle.metadata.total_tags,
        categories = bundle.metadata.total_categories,
        "exporting JSON bundle"
    );
    serde_json::to_string_pretty(&bundle).map_err(|e| serialization_error(e.to_string()))
}

/// Parse the text of a JSON export.
///
/// # Errors
///
/// Fails when the text is not JSON, when `queries` is missing or not an
/// array, or when a record cannot be decoded. Tags and categories default to
/// empty lists when absent.
pub fn import_json_str(content: &str) -> AppResult<JsonImport> {
    let mut data: Value = serde_json::from_str(content).map_err(|e| json_parse_error(&e))?;
    let queries = match data.get_mut("queries").map(Value::take) {
        Some(queries @ Value::Array(_)) => queries,
        _ => return Err(import_format_error("missing queries array"))
    };
    let queries: Vec<QueryRecord> =
        serde_json::from_value(queries).map_err(|e| json_parse_error(&e))?;
    let tags = decode_list(&mut data, "tags")?;
    let categories = decode_list(&mut data, "categories")?;
    let metadata = data.get_mut("metadata").map(Value::take);
    tracing::info!(
        queries = queries.len(),
        tags = tags.len(),
        categories = categories.len(),
        "imported JSON bundle"
    );
    Ok(JsonImport {
        queries,
        tags,
        categories,
        metadata
    })
}

/// Read and parse a JSON export from disk
pub async fn import_from_json(path: impl AsRef<Path>) -> AppResult<JsonImport> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| file_read_error(&path.display().to_string(), e))?;
    import_json_str(&content)
}

fn decode_list<T: serde::de::DeserializeOwned>(data: &mut Value, key: &str) -> AppResult<Vec<T>> {
    match data.get_mut(key).map(Value::take) {
        Some(list @ Value::Array(_)) => serde_json::from_value(list)
            .map_err(|e| import_error("JSON", format!("invalid {}: {}", key, e))),
        _ => Ok(Vec::new())
    }
}
