use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Snippets - validate, format, export and import saved SQL queries
#[derive(Parser, Debug)]
#[command(name = "sql-snippets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    pub output_format: Format,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// JSON file backing the tag store
    #[arg(long, env = "SQL_SNIPPETS_TAGS", global = true)]
    pub tags: Option<PathBuf>
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a SQL snippet
    Validate {
        /// Path to SQL file (use - for stdin)
        input: PathBuf
    },

    /// Validate every query of an exported JSON collection
    Lint {
        /// Path to JSON export
        collection: PathBuf
    },

    /// Reformat a SQL snippet with one clause per line
    Format {
        /// Path to SQL file (use - for stdin)
        input: PathBuf
    },

    /// Show structural counts of a SQL snippet
    Insights {
        /// Path to SQL file (use - for stdin)
        input: PathBuf
    },

    /// Suggest tags for a SQL snippet
    SuggestTags {
        /// Path to SQL file (use - for stdin)
        input: PathBuf
    },

    /// Export a JSON collection as a backup file
    Export {
        /// Path to JSON export holding the queries
        collection: PathBuf,

        /// Export format (config default when omitted)
        #[arg(long, value_enum)]
        format: Option<ExportKind>,

        /// Directory for the backup file
        #[arg(long, env = "SQL_SNIPPETS_OUTPUT_DIR")]
        output_dir: Option<PathBuf>
    },

    /// Import a .json or .sql file
    Import {
        /// Path to import file
        file: PathBuf,

        /// Write imported records as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportKind {
    Json,
    Sql
}
