//! Human readable `.sql` dump.
//!
//! Every record is written as a banner of `--` comment lines followed by its
//! SQL and an optional `/* Sample Result: ... */` block. The reader walks the
//! file line by line and rebuilds records from those markers, so anything a
//! user adds by hand outside the markers is treated as SQL.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use compact_str::CompactString;

use super::bundle::iso_timestamp;
use crate::{
    error::{AppResult, file_read_error},
    record::{QueryRecord, Visibility, human_timestamp, iso_date},
    tags::{Tag, TagRepository}
};

const BANNER: &str = "-- ========================================";
const QUERY_HEADER: &str = "-- Query #";
const DESCRIPTION_PREFIX: &str = "-- Description:";
const TAGS_PREFIX: &str = "-- Tags:";
const RESULT_MARKER: &str = "Sample Result:";

/// Records recovered from a SQL dump
#[derive(Debug, Clone, PartialEq)]
pub struct SqlImport {
    pub queries: Vec<QueryRecord>
}

/// Render `queries` as a SQL dump, resolving tag ids through `repo`
pub fn export_to_sql(queries: &[QueryRecord], repo: &dyn TagRepository) -> AppResult<String> {
    let tags = repo.list_tags()?;
    Ok(render_sql_dump(queries, &tags, Utc::now()))
}

/// Render a SQL dump with a fixed generation time.
///
/// Tag ids without a match in `tags` are written as the raw id.
pub fn render_sql_dump(queries: &[QueryRecord], tags: &[Tag], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("-- SQL Query Manager Export\n");
    out.push_str(&format!("-- Generated on: {}\n", iso_timestamp(&generated_at)));
    out.push_str(&format!("-- Total queries: {}\n\n", queries.len()));

    for (index, query) in queries.iter().enumerate() {
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!(
            "{}{}: {}\n",
            QUERY_HEADER,
            index + 1,
            query.display_name()
        ));
        out.push_str(&format!("-- Created: {}\n", query.timestamp));
        if !query.description.is_empty() {
            out.push_str(&format!("{} {}\n", DESCRIPTION_PREFIX, query.description));
        }
        if !query.tags.is_empty() || !query.tag_names.is_empty() {
            let names: Vec<&str> = query
                .tags
                .iter()
                .map(|id| {
                    tags.iter()
                        .find(|t| &t.id == id)
                        .map_or(id.as_str(), |t| t.name.as_str())
                })
                .chain(query.tag_names.iter().map(|n| n.as_str()))
                .collect();
            out.push_str(&format!("{} {}\n", TAGS_PREFIX, names.join(", ")));
        }
        out.push_str(BANNER);
        out.push_str("\n\n");
        out.push_str(&query.sql);
        out.push_str("\n\n");
        if let Some(result) = query.result.as_deref().filter(|r| !r.is_empty()) {
            out.push_str(&format!("/* {}\n", RESULT_MARKER));
            out.push_str(result);
            out.push_str("\n*/\n\n");
        }
    }
    tracing::info!(queries = queries.len(), "exported SQL dump");
    out
}

/// Read and parse a SQL dump from disk
pub async fn import_from_sql(path: impl AsRef<Path>) -> AppResult<SqlImport> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| file_read_error(&path.display().to_string(), e))?;
    Ok(SqlImport {
        queries: parse_sql_dump(&content, chrono::Local::now())
    })
}

/// Rebuild records from the text of a SQL dump.
///
/// Never fails: lines that match no marker become SQL of the current record,
/// and SQL before the first `-- Query #` header is dropped. Imported records
/// carry their tag names in `tag_names`, ids are left for the caller to
/// resolve.
pub fn parse_sql_dump<Tz>(content: &str, now: DateTime<Tz>) -> Vec<QueryRecord>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display
{
    let mut parser = DumpParser::new(now);
    for line in content.lines() {
        parser.feed(line);
    }
    let queries = parser.finish();
    tracing::info!(queries = queries.len(), "imported SQL dump");
    queries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Outside any comment block
    Sql,
    /// Inside a `/* ... */` block that is dropped
    Comment,
    /// Inside a `/* Sample Result:` block
    Result
}

struct DumpParser<Tz: TimeZone> {
    now:       DateTime<Tz>,
    queries:   Vec<QueryRecord>,
    current:   Option<QueryRecord>,
    sql_lines: Vec<String>,
    state:     LineState
}

impl<Tz> DumpParser<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display
{
    fn new(now: DateTime<Tz>) -> Self {
        Self {
            now,
            queries: Vec::new(),
            current: None,
            sql_lines: Vec::new(),
            state: LineState::Sql
        }
    }

    fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        // A block opener wins over everything, even inside another block.
        if line.starts_with("/*") {
            self.open_block(line);
            return;
        }
        if line.ends_with("*/") {
            self.state = LineState::Sql;
            return;
        }
        match self.state {
            LineState::Result => {
                if let Some(result) = self.current.as_mut().and_then(|q| q.result.as_mut()) {
                    result.push_str(line);
                    result.push('\n');
                }
            }
            LineState::Comment => {}
            LineState::Sql => self.feed_sql_line(line)
        }
    }

    fn open_block(&mut self, line: &str) {
        if line.contains(RESULT_MARKER) {
            self.state = LineState::Result;
            if let Some(current) = self.current.as_mut() {
                current.result = Some(String::new());
            }
        } else {
            self.state = LineState::Comment;
        }
    }

    fn feed_sql_line(&mut self, line: &str) {
        if line.starts_with(QUERY_HEADER) {
            self.flush();
            self.current = Some(self.start_record(line));
            return;
        }
        if let Some(rest) = line.strip_prefix(DESCRIPTION_PREFIX)
            && let Some(current) = self.current.as_mut()
        {
            current.description = rest.trim().to_string();
            return;
        }
        if let Some(rest) = line.strip_prefix(TAGS_PREFIX)
            && let Some(current) = self.current.as_mut()
        {
            current.tag_names = rest
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(CompactString::from)
                .collect();
            return;
        }
        if line.starts_with("--") || line.starts_with('=') {
            return;
        }
        self.sql_lines.push(line.to_string());
    }

    fn start_record(&self, header: &str) -> QueryRecord {
        let name = header
            .split_once(": ")
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
            .map_or_else(
                || format!("Imported Query {}", self.queries.len() + 1),
                str::to_string
            );
        QueryRecord {
            id:               self.now.timestamp_millis() + self.queries.len() as i64,
            name,
            sql:              String::new(),
            description:      String::new(),
            result:           None,
            result_image:     None,
            date:             iso_date(&self.now),
            timestamp:        human_timestamp(&self.now),
            last_edited:      None,
            tags:             Vec::new(),
            is_favorite:      false,
            visibility:       Visibility::Private,
            user_id:          None,
            current_version:  1,
            versions:         Vec::new(),
            tag_names:        Vec::new()
        }
    }

    /// Push the open record if it collected any SQL; a header without SQL is
    /// dropped together with its metadata.
    fn flush(&mut self) {
        let lines = std::mem::take(&mut self.sql_lines);
        if let Some(mut record) = self.current.take()
            && !lines.is_empty()
        {
            record.sql = lines.join("\n").trim().to_string();
            self.queries.push(record);
        }
    }

    fn finish(mut self) -> Vec<QueryRecord> {
        if self.state != LineState::Sql {
            tracing::warn!("SQL dump ends inside an unterminated comment block");
        }
        self.flush();
        self.queries
    }
}
