use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::{
    analyzer::{QueryInsights, Severity, ValidationResult},
    exchange::ExportFormat,
    record::QueryRecord
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Validation result labelled with its source (file path or record name)
#[derive(Debug, Clone, Serialize)]
pub struct ValidationEntry {
    pub source: String,
    #[serde(flatten)]
    pub result: ValidationResult
}

/// Records read by an import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub source:  String,
    pub format:  ExportFormat,
    pub queries: Vec<QueryRecord>
}

/// File written by an export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path:          PathBuf,
    pub format:        ExportFormat,
    pub total_queries: usize
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(value).unwrap_or_default()),
        OutputFormat::Yaml => Some(serde_yaml::to_string(value).unwrap_or_default()),
        OutputFormat::Text => None
    }
}

fn heading(title: &str, opts: &OutputOptions) -> String {
    let line = format!("=== {} ===\n\n", title);
    if opts.colored { line.bold().to_string() } else { line }
}

fn severity_label(severity: Severity, opts: &OutputOptions) -> String {
    let label = format!("{:<5}", severity.to_string());
    if !opts.colored {
        return label;
    }
    match severity {
        Severity::Error => label.red().bold().to_string(),
        Severity::Warning => label.yellow().to_string(),
        Severity::Suggestion => label.cyan().to_string()
    }
}

/// Format validation results of one or more snippets
pub fn format_validation_report(entries: &[ValidationEntry], opts: &OutputOptions) -> String {
    if let Some(serialized) = serialize(entries, opts.format) {
        return serialized;
    }

    let mut output = heading("SQL Validation", opts);
    for entry in entries {
        let result = &entry.result;
        let header = format!(
            "{} ({}, complexity {})",
            entry.source, result.query_type, result.estimated_complexity
        );
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');

        let groups = [
            (Severity::Error, &result.errors),
            (Severity::Warning, &result.warnings),
            (Severity::Suggestion, &result.suggestions)
        ];
        let mut clean = true;
        for (severity, messages) in groups {
            for message in messages {
                clean = false;
                output.push_str(&format!(
                    "  {} {}\n",
                    severity_label(severity, opts),
                    message
                ));
            }
        }
        if clean {
            output.push_str("  No issues found\n");
        }
        output.push('\n');
    }

    let invalid = entries.iter().filter(|e| !e.result.is_valid).count();
    let warnings: usize = entries.iter().map(|e| e.result.warnings.len()).sum();
    let summary = format!(
        "Summary: {} checked, {} invalid, {} warnings",
        entries.len(),
        invalid,
        warnings
    );
    if opts.colored && invalid > 0 {
        output.push_str(&summary.red().to_string());
    } else if opts.colored && warnings > 0 {
        output.push_str(&summary.yellow().to_string());
    } else if opts.colored {
        output.push_str(&summary.green().to_string());
    } else {
        output.push_str(&summary);
    }
    output.push('\n');
    output
}

/// Format structural counts of a snippet
pub fn format_insights(insights: &QueryInsights, opts: &OutputOptions) -> String {
    if let Some(serialized) = serialize(insights, opts.format) {
        return serialized;
    }

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let mut output = heading("Query Insights", opts);
    output.push_str(&format!("Tables: {}\n", insights.table_count));
    output.push_str(&format!("Columns: {}\n", insights.column_count));
    output.push_str(&format!("Joins: {}\n", insights.join_count));
    output.push_str(&format!("Conditions: {}\n", insights.condition_count));
    output.push_str(&format!("Aggregation: {}\n", yes_no(insights.has_aggregation)));
    output.push_str(&format!("Subquery: {}\n", yes_no(insights.has_subquery)));
    output
}

/// Format suggested tag names
pub fn format_tag_suggestions(tags: &[&str], opts: &OutputOptions) -> String {
    if let Some(serialized) = serialize(tags, opts.format) {
        return serialized;
    }
    if tags.is_empty() {
        return String::from("No tag suggestions\n");
    }
    let mut output = String::new();
    for tag in tags {
        if opts.colored {
            output.push_str(&format!("#{}\n", tag.green()));
        } else {
            output.push_str(&format!("#{}\n", tag));
        }
    }
    output
}

/// Format the records read by an import
pub fn format_import_summary(summary: &ImportSummary, opts: &OutputOptions) -> String {
    if let Some(serialized) = serialize(summary, opts.format) {
        return serialized;
    }

    let mut output = heading("Import", opts);
    output.push_str(&format!(
        "Imported {} queries from {} ({})\n\n",
        summary.queries.len(),
        summary.source,
        summary.format
    ));
    for (i, query) in summary.queries.iter().enumerate() {
        let header = format!("#{} {}", i + 1, query.display_name());
        if opts.colored {
            output.push_str(&header.cyan().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        if !query.description.is_empty() {
            output.push_str(&format!("  {}\n", query.description));
        }
        if !query.tags.is_empty() {
            output.push_str(&format!("  Tags: {}\n", query.tags.join(", ")));
        }
        if !query.tag_names.is_empty() {
            let names: Vec<&str> = query.tag_names.iter().map(|n| n.as_str()).collect();
            output.push_str(&format!("  Unresolved tags: {}\n", names.join(", ")));
        }
    }
    output
}

/// Format the location of a written export
pub fn format_export_summary(summary: &ExportSummary, opts: &OutputOptions) -> String {
    if let Some(serialized) = serialize(summary, opts.format) {
        return serialized;
    }
    let line = format!(
        "Exported {} queries to {}\n",
        summary.total_queries,
        summary.path.display()
    );
    if opts.colored { line.green().to_string() } else { line }
}
