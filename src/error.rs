pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create file write error
pub fn file_write_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to write file '{}': {}", path, source))
}

/// Create JSON import error with position info from the decoder
pub fn json_parse_error(source: &serde_json::Error) -> AppError {
    // serde_json reports line 0 for errors raised after decoding
    let msg = if source.line() > 0 {
        format!(
            "line {}, column {}:\n  {}",
            source.line(),
            source.column(),
            source
        )
    } else {
        source.to_string()
    };
    import_error("JSON", msg)
}

/// Create import error for the given file kind ("JSON" or "SQL")
pub fn import_error(kind: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!(
        "Failed to parse {} file: {}",
        kind,
        message.into()
    ))
}

/// Create import format error (structurally valid file, wrong shape)
pub fn import_format_error(message: impl Into<String>) -> AppError {
    import_error("JSON", format!("Invalid file format: {}", message.into()))
}

/// Create import policy error (rejected before any parse attempt)
pub fn import_rejected_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create serialization error
pub fn serialization_error(message: impl Into<String>) -> AppError {
    AppError::internal(format!("Serialization failed: {}", message.into()))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create record validation error
pub fn record_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create tag store error for an already existing entity
pub fn already_exists_error(entity: &str) -> AppError {
    AppError::conflict(format!("{} already exists", entity))
}

/// Create tag store error for a missing entity
pub fn not_found_error(entity: &str) -> AppError {
    AppError::not_found(format!("{} not found", entity))
}

/// Create store lock error
pub fn store_lock_error() -> AppError {
    AppError::internal("Tag store lock poisoned")
}
