//! # SQL Snippets
//!
//! Command-line companion of a SQL snippet manager: heuristic validation,
//! formatting and insights for saved queries, plus JSON and `.sql` backups.
//!
//! # Quick Start
//!
//! ```bash
//! # Validate a snippet (exit code 0 clean, 1 warnings, 2 errors)
//! sql-snippets validate query.sql
//!
//! # Stream a snippet from stdin
//! echo "SELECT * FROM users" | sql-snippets validate -
//!
//! # Lint a whole exported collection as JSON
//! sql-snippets -f json lint backup.json
//!
//! # Convert a collection into a human readable dump
//! sql-snippets export backup.json --format sql --output-dir backups
//!
//! # Read a dump back into records
//! sql-snippets import backups/sql-queries-backup-2024-01-15.sql -o queries.json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_SNIPPETS_TAGS`, `SQL_SNIPPETS_OUTPUT_DIR`)
//! 3. `.sql-snippets.toml` in current directory
//! 4. `~/.config/sql-snippets/config.toml`
//!
//! ```toml
//! [rules]
//! disabled = ["STYLE001"]
//!
//! [store]
//! tags_path = "tags.json"
//!
//! [export]
//! output_dir = "backups"
//! default_format = "json"
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`
//! (default `warn`).

use std::{io, process};

use clap::Parser;
use sql_snippet_vault::{
    app::run,
    cli::Cli,
    config::Config,
    error::AppResult
};
use tokio::main;
use tracing_subscriber::EnvFilter;

#[main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(io::stderr)
        .init();

    match execute().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn execute() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let output = run(cli, config).await?;
    for line in &output.stdout {
        println!("{}", line);
    }
    Ok(output.exit_code)
}
