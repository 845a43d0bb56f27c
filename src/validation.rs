//! Argument presence checks and affected-row verification shared by both executors.

use crate::error::SqlAssisterError;
use crate::types::RowValues;

/// Reject an empty query string.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`] when `query` is empty.
pub fn check_query(query: &str) -> Result<(), SqlAssisterError> {
    if query.is_empty() {
        return Err(SqlAssisterError::MissingQuery);
    }
    Ok(())
}

/// Reject an empty query string or an empty argument list.
///
/// The query is checked first, so an empty query always reports
/// [`SqlAssisterError::MissingQuery`] regardless of the arguments.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`] or [`SqlAssisterError::MissingArgs`].
pub fn check_query_with_args(query: &str, args: &[RowValues]) -> Result<(), SqlAssisterError> {
    check_query(query)?;
    if args.is_empty() {
        return Err(SqlAssisterError::MissingArgs);
    }
    Ok(())
}

/// Compare the driver-reported affected-row count against the expected one.
///
/// # Errors
/// Returns [`SqlAssisterError::RowsAffectedMismatch`] when the counts differ.
pub fn check_rows_affected(actual: usize, expected: usize) -> Result<(), SqlAssisterError> {
    if actual != expected {
        let err = SqlAssisterError::RowsAffectedMismatch { actual, expected };
        tracing::error!(error = %err, "unexpected affected-row count");
        return Err(err);
    }
    tracing::debug!(actual, expected, "rows affected");
    Ok(())
}
