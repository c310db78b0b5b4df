//! Application types for CLI commands.
//!
//! This module defines the parameter and result structures passed between
//! the command-line layer and the command implementations.

use std::path::PathBuf;

use crate::{
    config::Config,
    exchange::ExportFormat,
    output::OutputOptions,
    record::QueryRecord,
    tags::{MemoryTagStore, TagRepository}
};

/// Settings shared by every command.
///
/// Built once from the parsed CLI and the loaded [`Config`]; the tag store
/// path from the command line wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Loaded configuration with rule and export settings.
    pub config:    Config,
    /// How results are rendered.
    pub output:    OutputOptions,
    /// JSON tag store, in-memory store when `None`.
    pub tags_path: Option<PathBuf>
}

/// Records read from a `.json` or `.sql` collection.
#[derive(Debug)]
pub struct Collection {
    pub queries:     Vec<QueryRecord>,
    /// Private copy of the tags and categories shipped inside a JSON bundle
    pub bundle_tags: Option<MemoryTagStore>
}

impl Collection {
    /// Tags to render names from: the bundle's own tags when it carries any,
    /// otherwise `fallback`.
    pub fn tag_source<'a>(&'a self, fallback: &'a dyn TagRepository) -> &'a dyn TagRepository {
        match &self.bundle_tags {
            Some(store) => store,
            None => fallback
        }
    }
}

/// Parameters for the export command.
///
/// # Example
///
/// ```
/// use sql_snippet_vault::{app::ExportParams, exchange::ExportFormat};
///
/// let params = ExportParams {
///     collection: "queries.json".into(),
///     format:     Some(ExportFormat::Sql),
///     output_dir: None
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExportParams {
    /// Collection to export (`.json` bundle or `.sql` dump).
    pub collection: PathBuf,
    /// Target format, config default when `None`.
    pub format:     Option<ExportFormat>,
    /// Target directory, config default when `None`.
    pub output_dir: Option<PathBuf>
}

/// Parameters for the import command.
#[derive(Debug, Clone)]
pub struct ImportParams {
    pub file:   PathBuf,
    /// Also write the imported records as a JSON array here.
    pub output: Option<PathBuf>
}

/// Output from CLI command execution.
///
/// Represents the final output ready for display, including the exit
/// code and all lines to be printed to stdout.
///
/// # Example
///
/// ```
/// use sql_snippet_vault::app::CommandOutput;
///
/// let output = CommandOutput {
///     exit_code: 0,
///     stdout:    vec!["SELECT 1;".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=clean, 1=warnings, 2=errors).
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}

impl CommandOutput {
    /// Successful output consisting of one block of text
    pub fn text(text: String) -> Self {
        Self {
            exit_code: 0,
            stdout:    vec![text]
        }
    }
}
