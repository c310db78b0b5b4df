//! Command execution.
//!
//! Each `run_*` function implements one subcommand and returns a
//! [`CommandOutput`]; nothing here prints or exits, so every command can be
//! exercised from tests.

use std::path::Path;

use super::{
    convert::convert_export_kind,
    helpers::{
        calculate_exit_code, create_output_options, input_label, load_collection, open_tag_store,
        read_sql_input
    },
    types::{CommandOutput, ExportParams, ImportParams, RunContext}
};
use crate::{
    analyzer::{SqlAnalyzer, format_sql, get_query_insights},
    cli::{Cli, Commands},
    config::Config,
    error::{AppResult, file_write_error, serialization_error},
    exchange::{self, generate_backup_filename, import_file, resolve_imported_tags, save_file},
    output::{
        ExportSummary, ImportSummary, ValidationEntry, format_export_summary,
        format_import_summary, format_insights, format_tag_suggestions, format_validation_report
    },
    tags::suggest_tags
};

/// Dispatch a parsed command line
pub async fn run(cli: Cli, config: Config) -> AppResult<CommandOutput> {
    let ctx = RunContext {
        output:    create_output_options(cli.output_format, cli.no_color),
        tags_path: cli.tags.or_else(|| config.store.tags_path.clone()),
        config
    };

    match cli.command {
        Commands::Validate {
            input
        } => run_validate(&input, &ctx),
        Commands::Lint {
            collection
        } => run_lint(&collection, &ctx).await,
        Commands::Format {
            input
        } => run_format(&input),
        Commands::Insights {
            input
        } => run_insights(&input, &ctx),
        Commands::SuggestTags {
            input
        } => run_suggest_tags(&input, &ctx),
        Commands::Export {
            collection,
            format,
            output_dir
        } => {
            let params = ExportParams {
                collection,
                format: format.map(convert_export_kind),
                output_dir
            };
            run_export(params, &ctx).await
        }
        Commands::Import {
            file,
            output
        } => {
            run_import(
                ImportParams {
                    file,
                    output
                },
                &ctx
            )
            .await
        }
    }
}

/// Validate one snippet; exit code reflects the worst finding
pub fn run_validate(input: &Path, ctx: &RunContext) -> AppResult<CommandOutput> {
    let sql = read_sql_input(input)?;
    let analyzer = SqlAnalyzer::with_config(ctx.config.rules.clone());
    let entry = ValidationEntry {
        source: input_label(input),
        result: analyzer.validate(&sql)
    };
    let exit_code = calculate_exit_code(std::slice::from_ref(&entry.result));
    Ok(CommandOutput {
        exit_code,
        stdout: vec![format_validation_report(&[entry], &ctx.output)]
    })
}

/// Validate every record of a collection in parallel
pub async fn run_lint(collection: &Path, ctx: &RunContext) -> AppResult<CommandOutput> {
    let repo = open_tag_store(ctx.tags_path.as_deref());
    let queries = load_collection(collection, repo.as_ref()).await?.queries;
    let analyzer = SqlAnalyzer::with_config(ctx.config.rules.clone());
    let sqls: Vec<&str> = queries.iter().map(|q| q.sql.as_str()).collect();
    let results = analyzer.validate_batch(&sqls);
    let exit_code = calculate_exit_code(&results);
    tracing::info!(queries = queries.len(), exit_code, "linted collection");
    let entries: Vec<ValidationEntry> = queries
        .iter()
        .zip(results)
        .map(|(query, result)| ValidationEntry {
            source: query.display_name(),
            result
        })
        .collect();
    Ok(CommandOutput {
        exit_code,
        stdout: vec![format_validation_report(&entries, &ctx.output)]
    })
}

/// Print the snippet with one clause per line
pub fn run_format(input: &Path) -> AppResult<CommandOutput> {
    let sql = read_sql_input(input)?;
    Ok(CommandOutput::text(format_sql(&sql)))
}

pub fn run_insights(input: &Path, ctx: &RunContext) -> AppResult<CommandOutput> {
    let sql = read_sql_input(input)?;
    let insights = get_query_insights(&sql);
    Ok(CommandOutput::text(format_insights(&insights, &ctx.output)))
}

pub fn run_suggest_tags(input: &Path, ctx: &RunContext) -> AppResult<CommandOutput> {
    let sql = read_sql_input(input)?;
    let tags = suggest_tags(&sql);
    Ok(CommandOutput::text(format_tag_suggestions(&tags, &ctx.output)))
}

/// Write a dated backup of a collection
pub async fn run_export(params: ExportParams, ctx: &RunContext) -> AppResult<CommandOutput> {
    let repo = open_tag_store(ctx.tags_path.as_deref());
    let collection = load_collection(&params.collection, repo.as_ref()).await?;
    let format = params.format.unwrap_or(ctx.config.export.default_format);
    let dir = params
        .output_dir
        .unwrap_or_else(|| ctx.config.export.output_dir.clone());

    let tags = collection.tag_source(repo.as_ref());
    let content = exchange::export(&collection.queries, tags, format)?;
    let path = save_file(&dir, &generate_backup_filename(format), &content)?;
    let summary = ExportSummary {
        path,
        format,
        total_queries: collection.queries.len()
    };
    Ok(CommandOutput::text(format_export_summary(&summary, &ctx.output)))
}

/// Read an import file and show or save the recovered records
pub async fn run_import(params: ImportParams, ctx: &RunContext) -> AppResult<CommandOutput> {
    let repo = open_tag_store(ctx.tags_path.as_deref());
    let data = import_file(&params.file).await?;
    let format = data.format();
    let mut queries = data.into_queries();
    resolve_imported_tags(&mut queries, repo.as_ref())?;

    if let Some(output) = &params.output {
        let json =
            serde_json::to_string_pretty(&queries).map_err(|e| serialization_error(e.to_string()))?;
        std::fs::write(output, json)
            .map_err(|e| file_write_error(&output.display().to_string(), e))?;
        tracing::info!(path = %output.display(), "wrote imported records");
    }

    let summary = ImportSummary {
        source: input_label(&params.file),
        format,
        queries
    };
    Ok(CommandOutput::text(format_import_summary(&summary, &ctx.output)))
}
