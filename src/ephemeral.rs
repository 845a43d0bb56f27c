//! Executor functions for callers that open and close a connection per operation.
//!
//! Each function takes the handle explicitly instead of reusing one stored in an
//! [`Assister`](crate::Assister):
//!
//! ```rust,no_run
//! use sql_assister::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlAssisterError> {
//! let db = SqliteHandle::open_in_memory().await?;
//! db.execute_batch("CREATE TABLE book (id INTEGER PRIMARY KEY, name TEXT)").await?;
//! ephemeral::update_single_row(&db, "INSERT INTO book (id, name) VALUES (?1, ?2)", &args![1, "Dune"])
//!     .await?;
//! let row = ephemeral::scan_single_row_with_args(&db, "SELECT name FROM book WHERE id = ?1", &args![1])
//!     .await?;
//! let (name,): (String,) = row.scan()?;
//! # let _ = name;
//! # Ok(()) }
//! ```

use crate::error::SqlAssisterError;
use crate::executor::StatementExecutor;
use crate::options::AssisterOptions;
use crate::results::{Rows, SingleRow};
use crate::scan::FromRow;
use crate::types::RowValues;
use crate::validation::{check_query, check_query_with_args, check_rows_affected};

/// Executes any CRUD statement except a read and requires exactly one affected row.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`] for an empty query, the driver error if
/// preparation or execution fails, or [`SqlAssisterError::RowsAffectedMismatch`].
pub async fn update_single_row<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<(), SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    update_rows_with(handle, AssisterOptions::default(), query, args, 1).await
}

/// Executes a mutating statement and requires exactly `expected` affected rows.
///
/// # Errors
/// Same as [`update_single_row`].
pub async fn update_rows<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
    expected: usize,
) -> Result<(), SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    update_rows_with(handle, AssisterOptions::default(), query, args, expected).await
}

/// Runs a query expected to produce a single row. Arguments are optional.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`] or the driver error.
pub async fn scan_single_row<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<SingleRow, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    check_query(query)?;
    single_row_with(handle, AssisterOptions::default(), query, args).await
}

/// Runs a query expected to produce a single row; at least one argument is required.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`], [`SqlAssisterError::MissingArgs`], or the
/// driver error.
pub async fn scan_single_row_with_args<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<SingleRow, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    check_query_with_args(query, args)?;
    single_row_with(handle, AssisterOptions::default(), query, args).await
}

/// Runs a query producing zero or more rows. Arguments are optional.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`] or the driver error.
pub async fn scan_multiple_rows<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<Rows, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    check_query(query)?;
    multiple_rows_with(handle, AssisterOptions::default(), query, args).await
}

/// Runs a query producing zero or more rows; at least one argument is required.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`], [`SqlAssisterError::MissingArgs`], or the
/// driver error.
pub async fn scan_multiple_rows_with_args<H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<Rows, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    check_query_with_args(query, args)?;
    multiple_rows_with(handle, AssisterOptions::default(), query, args).await
}

/// Runs a single-row query and decodes the row into `T`.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`], the driver error,
/// [`SqlAssisterError::NoRows`], or [`SqlAssisterError::Conversion`].
pub async fn scan_struct<T, H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<T, SqlAssisterError>
where
    T: FromRow,
    H: StatementExecutor + ?Sized,
{
    scan_single_row(handle, query, args).await?.scan()
}

/// Runs a query and decodes every row into `T`.
///
/// # Errors
/// Returns [`SqlAssisterError::MissingQuery`], the driver error, or
/// [`SqlAssisterError::Conversion`].
pub async fn scan_structs<T, H>(
    handle: &H,
    query: &str,
    args: &[RowValues],
) -> Result<Vec<T>, SqlAssisterError>
where
    T: FromRow,
    H: StatementExecutor + ?Sized,
{
    scan_multiple_rows(handle, query, args).await?.scan_all()
}

pub(crate) async fn update_rows_with<H>(
    handle: &H,
    options: AssisterOptions,
    query: &str,
    args: &[RowValues],
    expected: usize,
) -> Result<(), SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    check_query(query)?;
    log_query(options, query);
    let affected = handle
        .execute_dml(query, args)
        .await
        .inspect_err(|err| log_failure(err, query))?;
    check_rows_affected(affected, expected)
}

pub(crate) async fn single_row_with<H>(
    handle: &H,
    options: AssisterOptions,
    query: &str,
    args: &[RowValues],
) -> Result<SingleRow, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    log_query(options, query);
    let result_set = handle
        .execute_select(query, args, Some(1))
        .await
        .inspect_err(|err| log_failure(err, query))?;
    Ok(SingleRow::from_result_set(result_set))
}

pub(crate) async fn multiple_rows_with<H>(
    handle: &H,
    options: AssisterOptions,
    query: &str,
    args: &[RowValues],
) -> Result<Rows, SqlAssisterError>
where
    H: StatementExecutor + ?Sized,
{
    log_query(options, query);
    let result_set = handle
        .execute_select(query, args, None)
        .await
        .inspect_err(|err| log_failure(err, query))?;
    Ok(Rows::from_result_set(result_set))
}

fn log_query(options: AssisterOptions, query: &str) {
    if options.log_queries {
        tracing::debug!(query, "executing statement");
    }
}

fn log_failure(err: &SqlAssisterError, query: &str) {
    tracing::error!(error = %err, query, "statement failed");
}
