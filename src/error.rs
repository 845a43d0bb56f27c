use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlAssisterError {
    #[error("no query present")]
    MissingQuery,

    #[error("no args present")]
    MissingArgs,

    #[error(
        "number of rows affected does not match the expected number of rows affected: {actual} / {expected}"
    )]
    RowsAffectedMismatch { actual: usize, expected: usize },

    #[error("query returned no rows")]
    NoRows,

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlAssisterError {
    #[must_use]
    pub fn is_missing_query(&self) -> bool {
        matches!(self, Self::MissingQuery)
    }

    #[must_use]
    pub fn is_missing_args(&self) -> bool {
        matches!(self, Self::MissingArgs)
    }

    #[must_use]
    pub fn is_rows_affected_mismatch(&self) -> bool {
        matches!(self, Self::RowsAffectedMismatch { .. })
    }
}
