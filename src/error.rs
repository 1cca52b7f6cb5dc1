use thiserror::Error;

/// Main error type for the Rusty Grid crate.
/// Aggregates errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum RustyGridError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    #[error("{0}")]
    UrlError(#[from] url::ParseError),

    // Helper module errors
    #[error("{0}")]
    ReaderError(#[from] crate::helpers::file_reader::ReaderError),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyGridError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyGridError::WithContextError(format!("{}: {}", message, e)))
    }
}
