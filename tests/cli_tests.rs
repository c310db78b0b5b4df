// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;
use sql_snippet_vault::cli::{Cli, Commands, ExportKind, Format};

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
}

#[test]
fn test_export_kind_variants() {
    let _json = ExportKind::Json;
    let _sql = ExportKind::Sql;
}

#[test]
fn test_parse_validate_stdin() {
    let cli = Cli::try_parse_from(["sql-snippets", "validate", "-"]).unwrap();
    assert!(matches!(cli.output_format, Format::Text));
    assert!(!cli.no_color);
    match cli.command {
        Commands::Validate {
            input
        } => assert_eq!(input, PathBuf::from("-")),
        other => panic!("unexpected command: {:?}", other)
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli =
        Cli::try_parse_from(["sql-snippets", "insights", "q.sql", "-f", "yaml", "--no-color"])
            .unwrap();
    assert!(matches!(cli.output_format, Format::Yaml));
    assert!(cli.no_color);
}

#[test]
fn test_parse_export_with_format() {
    let cli = Cli::try_parse_from([
        "sql-snippets",
        "export",
        "queries.json",
        "--format",
        "sql",
        "--output-dir",
        "backups"
    ])
    .unwrap();
    match cli.command {
        Commands::Export {
            collection,
            format,
            output_dir
        } => {
            assert_eq!(collection, PathBuf::from("queries.json"));
            assert!(matches!(format, Some(ExportKind::Sql)));
            assert_eq!(output_dir, Some(PathBuf::from("backups")));
        }
        other => panic!("unexpected command: {:?}", other)
    }
}

#[test]
fn test_parse_import_with_output() {
    let cli =
        Cli::try_parse_from(["sql-snippets", "import", "backup.sql", "-o", "records.json"])
            .unwrap();
    match cli.command {
        Commands::Import {
            file,
            output
        } => {
            assert_eq!(file, PathBuf::from("backup.sql"));
            assert_eq!(output, Some(PathBuf::from("records.json")));
        }
        other => panic!("unexpected command: {:?}", other)
    }
}

#[test]
fn test_parse_suggest_tags_subcommand_name() {
    let cli = Cli::try_parse_from(["sql-snippets", "suggest-tags", "q.sql"]).unwrap();
    assert!(matches!(cli.command, Commands::SuggestTags { .. }));
}

#[test]
fn test_rejects_unknown_export_format() {
    assert!(
        Cli::try_parse_from(["sql-snippets", "export", "q.json", "--format", "csv"]).is_err()
    );
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(["sql-snippets"]).is_err());
}
