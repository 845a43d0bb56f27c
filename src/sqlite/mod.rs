//! `SQLite` backend.
//!
//! - `config`: options for opening a handle
//! - `handle`: the shared connection and its `StatementExecutor` impl
//! - `params`: parameter conversion between assister and `SQLite` types
//! - `query`: result extraction

pub mod config;
mod handle;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use handle::SqliteHandle;
pub use params::Params;
pub use query::build_result_set;
