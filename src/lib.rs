//! Async helpers over a caller-owned database handle.
//!
//! [`Assister`] keeps one handle and reuses it; the [`ephemeral`] functions take
//! the handle on every call. Both reject empty queries, optionally require
//! arguments, verify affected-row counts on updates, and log each statement
//! through `tracing`.
//!
//! ```rust,no_run
//! use sql_assister::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlAssisterError> {
//! let db = SqliteHandle::open_in_memory().await?;
//! db.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, x INTEGER)").await?;
//! db.execute_batch("INSERT INTO t (id, x) VALUES (1, 0)").await?;
//!
//! let assister = Assister::new(db);
//! assister
//!     .update_single_row("UPDATE t SET x = ?1 WHERE id = ?2", &args![5, 1])
//!     .await?;
//!
//! let err = assister
//!     .update_single_row("UPDATE t SET x = ?1 WHERE id = ?2", &args![5, 2])
//!     .await
//!     .unwrap_err();
//! assert!(err.is_rows_affected_mismatch());
//! # Ok(()) }
//! ```

pub mod assister;
pub mod ephemeral;
pub mod error;
pub mod executor;
pub mod options;
pub mod prelude;
pub mod results;
pub mod scan;
pub mod types;
pub mod validation;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use assister::Assister;
pub use error::SqlAssisterError;
pub use executor::StatementExecutor;
pub use options::AssisterOptions;
pub use results::{CustomDbRow, ResultSet, Rows, SingleRow};
pub use scan::{FromRow, FromValue};
pub use types::{DatabaseType, RowValues};
