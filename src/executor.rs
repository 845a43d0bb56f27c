use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SqlAssisterError;
use crate::results::ResultSet;
use crate::types::{DatabaseType, RowValues};

/// A live database handle that can prepare and run a single statement.
///
/// Implemented for [`SqliteHandle`](crate::sqlite::SqliteHandle) and
/// `tokio_postgres::Client`. The handle is owned by the caller; executors only
/// borrow or clone it.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Backend this handle talks to.
    fn database_type(&self) -> DatabaseType;

    /// Prepares and executes a mutating statement (INSERT, UPDATE, DELETE, ...) and returns
    /// the number of rows the driver reports as affected.
    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlAssisterError>;

    /// Prepares and runs a query, materializing at most `limit` rows (all rows when `None`).
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError>;
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for &T {
    fn database_type(&self) -> DatabaseType {
        (**self).database_type()
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlAssisterError> {
        (**self).execute_dml(query, params).await
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError> {
        (**self).execute_select(query, params, limit).await
    }
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for Arc<T> {
    fn database_type(&self) -> DatabaseType {
        (**self).database_type()
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlAssisterError> {
        (**self).execute_dml(query, params).await
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError> {
        (**self).execute_select(query, params, limit).await
    }
}
