use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    record::QueryRecord,
    tags::{Category, Tag}
};

/// Version string written into every JSON bundle
pub const FORMAT_VERSION: &str = "1.0.0";

/// Interchange format of an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Sql
}

impl ExportFormat {
    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sql => "sql"
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Sql => "text/plain"
        }
    }

    /// Format for a lowercase extension, `None` if not importable
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "json" => Some(Self::Json),
            "sql" => Some(Self::Sql),
            _ => None
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Counts describing a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_queries:    usize,
    pub total_tags:       usize,
    pub total_categories: usize,
    pub export_format:    ExportFormat
}

/// JSON export envelope. Field order here is the order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub queries:     Vec<QueryRecord>,
    pub tags:        Vec<Tag>,
    pub categories:  Vec<Category>,
    pub exported_at: String,
    pub version:     String,
    pub metadata:    ExportMetadata
}

impl ExportBundle {
    pub fn new(
        queries: Vec<QueryRecord>,
        tags: Vec<Tag>,
        categories: Vec<Category>,
        exported_at: DateTime<Utc>
    ) -> Self {
        let metadata = ExportMetadata {
            total_queries:    queries.len(),
            total_tags:       tags.len(),
            total_categories: categories.len(),
            export_format:    ExportFormat::Json
        };
        Self {
            queries,
            tags,
            categories,
            exported_at: iso_timestamp(&exported_at),
            version: FORMAT_VERSION.to_string(),
            metadata
        }
    }
}

/// ISO 8601 with millisecond precision and `Z` suffix
pub fn iso_timestamp(moment: &DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::Millis, true)
}
