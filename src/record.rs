//! Query record model.
//!
//! A [`QueryRecord`] is the unit of persistence and exchange: one saved SQL
//! snippet with its metadata and append-only edit history. Field names are
//! serialized in camelCase so that collections written by the browser
//! application load unchanged.
//!
//! # Example
//!
//! ```
//! use chrono::Local;
//! use sql_snippet_vault::record::{QueryDraft, QueryEdit, QueryRecord};
//!
//! let now = Local::now();
//! let mut record = QueryRecord::create(
//!     QueryDraft {
//!         name: "Active users".into(),
//!         sql: "SELECT id FROM users WHERE active = 1;".into(),
//!         ..Default::default()
//!     },
//!     now
//! )
//! .unwrap();
//!
//! record.apply_edit(
//!     QueryEdit {
//!         name: "Active users".into(),
//!         sql: "SELECT id, email FROM users WHERE active = 1;".into(),
//!         ..Default::default()
//!     },
//!     now
//! );
//!
//! assert_eq!(record.current_version, 2);
//! assert_eq!(record.versions.last().map(|v| v.version), Some(2));
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{AppResult, record_error};

/// Who can see a query in the public listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public
}

/// Immutable snapshot of a record's editable fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVersion {
    pub version:      u32,
    #[serde(default)]
    pub name:         String,
    #[serde(default)]
    pub sql:          String,
    #[serde(default)]
    pub description:  String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result:       Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image: Option<String>,
    #[serde(default)]
    pub edited_at:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by:    Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags:         Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite:  Option<bool>
}

/// A saved SQL snippet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub id:              i64,
    #[serde(default)]
    pub name:            String,
    pub sql:             String,
    #[serde(default)]
    pub description:     String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result:          Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image:    Option<String>,
    #[serde(default)]
    pub date:            String,
    #[serde(default)]
    pub timestamp:       String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited:     Option<String>,
    #[serde(default)]
    pub tags:            Vec<String>,
    #[serde(default)]
    pub is_favorite:     bool,
    #[serde(default)]
    pub visibility:      Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id:         Option<String>,
    #[serde(default = "first_version")]
    pub current_version: u32,
    #[serde(default)]
    pub versions:        Vec<QueryVersion>,
    /// Tag names recovered by the SQL dump importer, pending resolution
    /// against the tag store
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_names:       Vec<CompactString>
}

fn first_version() -> u32 {
    1
}

/// Fields collected when a query is first saved
#[derive(Debug, Clone, Default)]
pub struct QueryDraft {
    pub name:         String,
    pub sql:          String,
    pub description:  String,
    pub result:       Option<String>,
    pub result_image: Option<String>,
    pub tags:         Vec<String>,
    pub is_favorite:  bool,
    pub visibility:   Visibility,
    pub user_id:      Option<String>
}

/// Editable fields of an existing query
#[derive(Debug, Clone, Default)]
pub struct QueryEdit {
    pub name:         String,
    pub sql:          String,
    pub description:  String,
    pub result:       Option<String>,
    pub result_image: Option<String>,
    pub edited_by:    Option<String>
}

impl QueryRecord {
    /// Build a new record with a first version snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the SQL text is empty or whitespace only.
    pub fn create<Tz: TimeZone>(draft: QueryDraft, now: DateTime<Tz>) -> AppResult<Self>
    where
        Tz::Offset: std::fmt::Display
    {
        if draft.sql.trim().is_empty() {
            return Err(record_error("SQL query cannot be empty"));
        }
        let id = now.timestamp_millis();
        let name = if draft.name.is_empty() {
            format!("Query {}", id)
        } else {
            draft.name
        };
        let moment = human_timestamp(&now);
        let result = draft.result.filter(|r| !r.is_empty());
        let result_image = draft.result_image.filter(|r| !r.is_empty());
        let first = QueryVersion {
            version: 1,
            name: name.clone(),
            sql: draft.sql.clone(),
            description: draft.description.clone(),
            result: result.clone(),
            result_image: result_image.clone(),
            edited_at: moment.clone(),
            edited_by: None,
            tags: Some(draft.tags.clone()),
            is_favorite: Some(draft.is_favorite)
        };
        Ok(Self {
            id,
            name,
            sql: draft.sql,
            description: draft.description,
            result,
            result_image,
            date: iso_date(&now),
            timestamp: moment,
            last_edited: None,
            tags: draft.tags,
            is_favorite: draft.is_favorite,
            visibility: draft.visibility,
            user_id: draft.user_id,
            current_version: 1,
            versions: vec![first],
            tag_names: Vec::new()
        })
    }

    /// Overwrite editable fields and append the matching version snapshot.
    ///
    /// `current_version` always equals the `version` of the appended entry
    /// afterwards, even when the stored history is sparse.
    pub fn apply_edit<Tz: TimeZone>(&mut self, edit: QueryEdit, now: DateTime<Tz>)
    where
        Tz::Offset: std::fmt::Display
    {
        let next = self.current_version.max(1) + 1;
        let moment = human_timestamp(&now);
        let result = edit.result.filter(|r| !r.is_empty());
        let result_image = edit.result_image.filter(|r| !r.is_empty());
        self.versions.push(QueryVersion {
            version: next,
            name: edit.name.clone(),
            sql: edit.sql.clone(),
            description: edit.description.clone(),
            result: result.clone(),
            result_image: result_image.clone(),
            edited_at: moment.clone(),
            edited_by: edit.edited_by,
            tags: None,
            is_favorite: None
        });
        self.name = edit.name;
        self.sql = edit.sql;
        self.description = edit.description;
        self.result = result;
        self.result_image = result_image;
        self.last_edited = Some(moment);
        self.current_version = next;
    }

    /// Name shown in listings and dumps
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Query {}", self.id)
        } else {
            self.name.clone()
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Case-insensitive match over name, description and SQL text
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.sql.to_lowercase().contains(&needle)
    }
}

/// Records visible in the public listing, in their original order
pub fn public_listing(records: &[QueryRecord]) -> Vec<&QueryRecord> {
    records.iter().filter(|r| r.is_public()).collect()
}

/// UTC calendar date in ISO form (`2024-01-15`), whatever the zone of
/// `moment`
pub fn iso_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display
{
    moment.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}

/// Human-readable moment (`1/15/2024, 3:04:05 PM`)
pub fn human_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display
{
    moment.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Current local time, the clock used for ids and timestamps
pub fn now() -> DateTime<Local> {
    Local::now()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_human_timestamp_format() {
        assert_eq!(human_timestamp(&fixed()), "1/15/2024, 3:04:05 PM");
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(iso_date(&fixed()), "2024-01-15");
    }

    #[test]
    fn test_iso_date_uses_utc_calendar_day() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let early = tokyo.with_ymd_and_hms(2024, 1, 16, 2, 0, 0).unwrap();
        assert_eq!(iso_date(&early), "2024-01-15");
        assert_eq!(human_timestamp(&early), "1/16/2024, 2:00:00 AM");
    }

    #[test]
    fn test_create_generates_placeholder_name() {
        let record = QueryRecord::create(
            QueryDraft {
                sql: "SELECT 1;".into(),
                ..Default::default()
            },
            fixed()
        )
        .unwrap();
        assert_eq!(record.name, format!("Query {}", fixed().timestamp_millis()));
        assert_eq!(record.id, fixed().timestamp_millis());
    }

    #[test]
    fn test_edit_from_missing_version_starts_at_two() {
        let mut record = QueryRecord {
            id: 1,
            sql: "SELECT 1".into(),
            current_version: 0,
            ..Default::default()
        };
        record.apply_edit(
            QueryEdit {
                sql: "SELECT 2".into(),
                ..Default::default()
            },
            fixed()
        );
        assert_eq!(record.current_version, 2);
        assert_eq!(record.versions.len(), 1);
        assert_eq!(record.versions[0].version, 2);
    }
}
