//! Type conversion functions for CLI to internal types.
//!
//! This module translates the user-facing enums of the `cli` module into the
//! domain types used by the output and exchange layers.

use crate::{
    cli::{ExportKind, Format},
    exchange::ExportFormat,
    output::OutputFormat
};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use sql_snippet_vault::{app::convert_format, cli::Format, output::OutputFormat};
///
/// let format = convert_format(Format::Json);
/// assert!(matches!(format, OutputFormat::Json));
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Converts a CLI export kind to the exchange format.
pub fn convert_export_kind(kind: ExportKind) -> ExportFormat {
    match kind {
        ExportKind::Json => ExportFormat::Json,
        ExportKind::Sql => ExportFormat::Sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_format_text() {
        assert!(matches!(convert_format(Format::Text), OutputFormat::Text));
    }

    #[test]
    fn test_convert_format_json() {
        assert!(matches!(convert_format(Format::Json), OutputFormat::Json));
    }

    #[test]
    fn test_convert_format_yaml() {
        assert!(matches!(convert_format(Format::Yaml), OutputFormat::Yaml));
    }

    #[test]
    fn test_convert_export_kind() {
        assert_eq!(convert_export_kind(ExportKind::Json), ExportFormat::Json);
        assert_eq!(convert_export_kind(ExportKind::Sql), ExportFormat::Sql);
    }
}
