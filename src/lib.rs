//! # SQL Snippet Vault Library
//!
//! Core of a SQL snippet manager: query records with version history, a
//! heuristic SQL analyzer, tag repositories and JSON / `.sql` export and
//! import.
//!
//! # Modules
//!
//! - [`record`] - query records and edit bookkeeping
//! - [`analyzer`] - validation rules, formatting and insights
//! - [`tags`] - tag and category repository, tag suggestions
//! - [`exchange`] - export bundles, SQL dumps and import checks
//! - [`config`] - configuration loading
//! - [`output`] - result formatting
//! - [`cache`] - validation result cache
//! - [`app`] - CLI command implementations
//! - [`error`] - error types and constructors

pub mod analyzer;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod output;
pub mod record;
pub mod tags;
