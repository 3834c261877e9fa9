//! Error types module
//!
//! All gateway failures are classified into the `AppError` taxonomy.
//! Name conflicts are user-correctable and map to 409; malformed requests
//! map to 400 with no backend call made; backend failures map to 500 and
//! never leak backend diagnostics to clients.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like name conflicts
    Debug,
    /// Warning level - for recoverable or partial failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File name already taken: {0}")]
    FileNameTaken(String),

    #[error("Folder name already taken: {0}")]
    FolderNameTaken(String),

    #[error("Object key already exists: {0}")]
    DuplicateKey(String),

    #[error("Bad request: {0}")]
    BadInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Archive build failed: {0}")]
    ArchiveBuildFailed(String),

    /// Batch uploads are sequential and not transactional: items stored
    /// before the failing one remain in the bucket and are listed here.
    #[error("Batch upload failed at `{failed_item}` after {} stored item(s)", .succeeded.len())]
    PartialBatchFailure {
        succeeded: Vec<String>,
        failed_item: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// `PartialBatchFailure` takes its status and sensitivity from the
/// underlying cause, so a mid-batch name conflict still answers 409.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::FileNameTaken(_) => (
            409,
            "FILE_NAME_TAKEN",
            false,
            Some("Choose a different file name"),
            false,
            LogLevel::Debug,
        ),
        AppError::FolderNameTaken(_) => (
            409,
            "FOLDER_NAME_TAKEN",
            false,
            Some("Choose a different folder name"),
            false,
            LogLevel::Debug,
        ),
        AppError::DuplicateKey(_) => (
            409,
            "DUPLICATE_KEY",
            false,
            Some("Choose a different name"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadInput(_) => (
            400,
            "BAD_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the key exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::StorageUnavailable(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::ArchiveBuildFailed(_) => (
            500,
            "ARCHIVE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::PartialBatchFailure { source, .. } => {
            let (status, _, recoverable, action, sensitive, _) =
                app_error_static_metadata(source);
            (
                status,
                "PARTIAL_BATCH_FAILURE",
                recoverable,
                action,
                sensitive,
                LogLevel::Warn,
            )
        }
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::FileNameTaken(_) => "FileNameTaken",
            AppError::FolderNameTaken(_) => "FolderNameTaken",
            AppError::DuplicateKey(_) => "DuplicateKey",
            AppError::BadInput(_) => "BadInput",
            AppError::NotFound(_) => "NotFound",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::ArchiveBuildFailed(_) => "ArchiveBuildFailed",
            AppError::PartialBatchFailure { .. } => "PartialBatchFailure",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::FileNameTaken(name) => format!("File name already taken: {}", name),
            AppError::FolderNameTaken(name) => format!("Folder name already taken: {}", name),
            AppError::DuplicateKey(key) => format!("Name already taken: {}", key),
            AppError::BadInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::StorageUnavailable(_) => "Failed to access storage".to_string(),
            AppError::ArchiveBuildFailed(_) => "Failed to build folder archive".to_string(),
            AppError::PartialBatchFailure {
                succeeded,
                failed_item,
                source,
            } => format!(
                "Batch upload failed at `{}` after {} stored item(s): {}",
                failed_item,
                succeeded.len(),
                source.client_message()
            ),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
