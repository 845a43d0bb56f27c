//! Convenient imports for common functionality.

pub use crate::assister::Assister;
pub use crate::ephemeral;
pub use crate::error::SqlAssisterError;
pub use crate::executor::StatementExecutor;
pub use crate::options::AssisterOptions;
pub use crate::results::{CustomDbRow, ResultSet, Rows, SingleRow};
pub use crate::scan::{FromRow, FromValue};
pub use crate::types::{DatabaseType, RowValues};
pub use crate::{args, from_row};

#[cfg(feature = "postgres")]
pub use crate::postgres::PostgresOptions;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteHandle, SqliteOptions, SqliteOptionsBuilder};
