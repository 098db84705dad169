//! Error types for the movie loader.

use std::path::PathBuf;

use thiserror::Error;

use crate::movie::MovieRecord;

/// Fatal errors. Any of these aborts the load.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database connection error: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to close database connection: {0}")]
    Close(#[source] sqlx::Error),

    #[error("Failed to create table: {0}")]
    CreateTable(#[source] sqlx::Error),

    #[error("Failed to insert values for record {index}: {source}")]
    Insert {
        index: usize,
        record: Box<MovieRecord>,
        #[source]
        source: sqlx::Error,
    },

    #[error("Cannot load environment file: {0}")]
    EnvFile(#[source] dotenvy::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Cannot open input file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal coercion problem found while mapping a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    /// CSV line the value came from (the header is line 1)
    pub line_number: usize,
    /// Column index within the row
    pub column: usize,
    /// Record field the value was destined for
    pub field: &'static str,
    /// Raw text that failed to parse
    pub value: String,
    /// Parser message
    pub msg: String,
}

impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Line {}, column {} ({}): {}",
            self.line_number, self.column, self.field, self.msg
        )
    }
}
