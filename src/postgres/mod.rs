//! Postgres backend: `tokio_postgres::Client` is the handle.

pub mod config;
mod executor;
pub mod params;
pub mod query;

pub use config::PostgresOptions;
pub use params::Params;
pub use query::build_result_set;
