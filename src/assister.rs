use crate::ephemeral::{multiple_rows_with, single_row_with, update_rows_with};
use crate::error::SqlAssisterError;
use crate::executor::StatementExecutor;
use crate::options::AssisterOptions;
use crate::results::{Rows, SingleRow};
use crate::scan::FromRow;
use crate::types::RowValues;
use crate::validation::{check_query, check_query_with_args};

/// Connection-bound executor.
///
/// Holds a long-lived handle and reuses it for every call. The handle can be
/// owned, borrowed (`Assister<&H>`), or shared (`Assister<Arc<H>>`); closing the
/// underlying connection stays the caller's job.
///
/// ```rust,no_run
/// use sql_assister::prelude::*;
///
/// #[derive(Debug)]
/// struct Book {
///     id: i64,
///     name: String,
/// }
/// from_row!(Book { id, name });
///
/// # async fn demo() -> Result<(), SqlAssisterError> {
/// let db = SqliteHandle::open_in_memory().await?;
/// db.execute_batch("CREATE TABLE book (id INTEGER PRIMARY KEY, name TEXT)").await?;
///
/// let assister = Assister::new(db);
/// assister
///     .update_single_row("INSERT INTO book (id, name) VALUES (?1, ?2)", &args![1, "Dune"])
///     .await?;
/// let book: Book = assister
///     .scan_struct("SELECT id, name FROM book WHERE id = ?1", &args![1])
///     .await?;
/// # let _ = book;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Assister<H> {
    handle: H,
    options: AssisterOptions,
}

impl<H: StatementExecutor> Assister<H> {
    #[must_use]
    pub fn new(handle: H) -> Self {
        Self::with_options(handle, AssisterOptions::default())
    }

    #[must_use]
    pub fn with_options(handle: H, options: AssisterOptions) -> Self {
        Self { handle, options }
    }

    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[must_use]
    pub fn options(&self) -> AssisterOptions {
        self.options
    }

    /// Give the handle back to the caller.
    #[must_use]
    pub fn into_inner(self) -> H {
        self.handle
    }

    /// Executes any CRUD statement except a read and requires exactly one affected row.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`] for an empty query, the driver error if
    /// preparation or execution fails, or [`SqlAssisterError::RowsAffectedMismatch`] when
    /// zero or several rows changed.
    pub async fn update_single_row(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<(), SqlAssisterError> {
        self.update_rows(query, args, 1).await
    }

    /// Executes a mutating statement and requires exactly `expected` affected rows.
    ///
    /// # Errors
    /// Same as [`Assister::update_single_row`].
    pub async fn update_rows(
        &self,
        query: &str,
        args: &[RowValues],
        expected: usize,
    ) -> Result<(), SqlAssisterError> {
        update_rows_with(&self.handle, self.options, query, args, expected).await
    }

    /// Runs a query expected to produce a single row. Arguments are optional.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`] or the driver error.
    pub async fn scan_single_row(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<SingleRow, SqlAssisterError> {
        check_query(query)?;
        single_row_with(&self.handle, self.options, query, args).await
    }

    /// Runs a query expected to produce a single row; at least one argument is required.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`], [`SqlAssisterError::MissingArgs`], or the
    /// driver error.
    pub async fn scan_single_row_with_args(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<SingleRow, SqlAssisterError> {
        check_query_with_args(query, args)?;
        single_row_with(&self.handle, self.options, query, args).await
    }

    /// Runs a query producing zero or more rows. Arguments are optional.
    ///
    /// Works for a single row too, but [`Assister::scan_single_row`] says what it means.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`] or the driver error.
    pub async fn scan_multiple_rows(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<Rows, SqlAssisterError> {
        check_query(query)?;
        multiple_rows_with(&self.handle, self.options, query, args).await
    }

    /// Runs a query producing zero or more rows; at least one argument is required.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`], [`SqlAssisterError::MissingArgs`], or the
    /// driver error.
    pub async fn scan_multiple_rows_with_args(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<Rows, SqlAssisterError> {
        check_query_with_args(query, args)?;
        multiple_rows_with(&self.handle, self.options, query, args).await
    }

    /// Runs a single-row query and decodes the row into `T`.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`], the driver error,
    /// [`SqlAssisterError::NoRows`], or [`SqlAssisterError::Conversion`].
    pub async fn scan_struct<T: FromRow>(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<T, SqlAssisterError> {
        self.scan_single_row(query, args).await?.scan()
    }

    /// Runs a query and decodes every row into `T`.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::MissingQuery`], the driver error, or
    /// [`SqlAssisterError::Conversion`].
    pub async fn scan_structs<T: FromRow>(
        &self,
        query: &str,
        args: &[RowValues],
    ) -> Result<Vec<T>, SqlAssisterError> {
        self.scan_multiple_rows(query, args).await?.scan_all()
    }
}
