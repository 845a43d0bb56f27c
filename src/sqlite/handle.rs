use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::config::SqliteOptions;
use super::params::Params;
use super::query::build_result_set;
use crate::error::SqlAssisterError;
use crate::executor::StatementExecutor;
use crate::results::ResultSet;
use crate::types::{DatabaseType, RowValues};

type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// Cloneable handle to one `rusqlite::Connection`.
///
/// Clones share the same connection. Driver calls run on tokio's blocking pool
/// while holding the connection mutex, so statements on one handle never
/// interleave.
#[derive(Clone)]
pub struct SqliteHandle {
    conn: SharedSqliteConnection,
}

impl SqliteHandle {
    /// Wrap a connection the caller already opened.
    #[must_use]
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open the database described by `opts` and apply its pragmas.
    ///
    /// # Errors
    /// Returns `SqlAssisterError::ConnectionError` if the file cannot be opened, or the
    /// driver error if a pragma fails.
    pub async fn open(opts: SqliteOptions) -> Result<Self, SqlAssisterError> {
        let db_path = opts.db_path.clone();
        let conn = tokio::task::spawn_blocking(move || rusqlite::Connection::open(&db_path))
            .await
            .map_err(|e| {
                SqlAssisterError::ExecutionError(format!("sqlite spawn_blocking join error: {e}"))
            })?
            .map_err(|e| {
                SqlAssisterError::ConnectionError(format!(
                    "Failed to open SQLite database {}: {e}",
                    opts.db_path
                ))
            })?;

        let handle = Self::from_connection(conn);
        if let Some(pragmas) = opts.pragma_batch() {
            handle.execute_batch(&pragmas).await?;
        }
        tracing::debug!(db_path = %opts.db_path, wal = opts.wal, "opened sqlite database");
        Ok(handle)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns `SqlAssisterError::ConnectionError` if `SQLite` cannot allocate the database.
    pub async fn open_in_memory() -> Result<Self, SqlAssisterError> {
        Self::open(SqliteOptions::new(":memory:".to_string())).await
    }

    /// Run synchronous work against the raw connection on the blocking pool.
    ///
    /// Use this for driver features the executor does not expose (savepoints,
    /// pragmas returning rows, custom functions).
    ///
    /// # Errors
    /// Returns whatever `func` returns, or `SqlAssisterError::ExecutionError` if the
    /// blocking task panicked.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, SqlAssisterError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlAssisterError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }

    /// Execute a batch of parameterless statements (DDL, pragmas, seed data).
    ///
    /// # Errors
    /// Returns `SqlAssisterError::SqliteError` if any statement fails.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), SqlAssisterError> {
        let sql_owned = sql.to_owned();
        self.with_connection(move |conn| Ok(conn.execute_batch(&sql_owned)?))
            .await
    }
}

impl fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteHandle")
            .field("shared", &Arc::strong_count(&self.conn))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StatementExecutor for SqliteHandle {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlAssisterError> {
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        self.with_connection(move |conn| {
            // `RETURNING` rows are drained and discarded; only the change count matters.
            {
                let mut stmt = conn.prepare_cached(&sql_owned)?;
                let mut rows = stmt.query(&params_owned.as_refs()[..])?;
                while rows.next()?.is_some() {}
            }
            usize::try_from(conn.changes()).map_err(|e| {
                SqlAssisterError::ExecutionError(format!("affected-row count out of range: {e}"))
            })
        })
        .await
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError> {
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(&sql_owned)?;
            build_result_set(&mut stmt, &params_owned, limit)
        })
        .await
    }
}

async fn run_blocking<F, R>(conn: SharedSqliteConnection, func: F) -> Result<R, SqlAssisterError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlAssisterError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlAssisterError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
