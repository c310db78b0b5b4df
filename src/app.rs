//! Application logic for the `sql-snippets` CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing.
//!
//! - [`types`] - parameters and outputs of commands
//! - [`convert`] - CLI enums to domain types
//! - [`helpers`] - input reading, tag store selection, exit codes
//! - [`commands`] - one `run_*` function per subcommand

pub mod commands;
pub mod convert;
pub mod helpers;
pub mod types;

pub use commands::{
    run, run_export, run_format, run_import, run_insights, run_lint, run_suggest_tags,
    run_validate
};
pub use convert::{convert_export_kind, convert_format};
pub use helpers::{
    calculate_exit_code, create_output_options, input_label, load_collection, open_tag_store,
    read_sql_input
};
pub use types::{Collection, CommandOutput, ExportParams, ImportParams, RunContext};
