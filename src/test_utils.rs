//! Throwaway Postgres servers for integration tests (feature `test-utils`).

use postgresql_embedded::PostgreSQL;

use crate::error::SqlAssisterError;
use crate::postgres::PostgresOptions;

/// A running embedded `PostgreSQL` instance and the options that reach it.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    pub options: PostgresOptions,
}

fn embedded_error(e: &postgresql_embedded::Error) -> SqlAssisterError {
    SqlAssisterError::ConnectionError(format!("embedded postgres: {e}"))
}

/// Start a fresh server from the bundled binaries and create `db_name` on it.
///
/// # Errors
/// Returns `SqlAssisterError::ConnectionError` if the server cannot be set up,
/// started, or the database cannot be created.
pub async fn setup_postgres_embedded(db_name: &str) -> Result<EmbeddedPostgres, SqlAssisterError> {
    let mut postgresql = PostgreSQL::default();
    postgresql.setup().await.map_err(|e| embedded_error(&e))?;
    postgresql.start().await.map_err(|e| embedded_error(&e))?;
    postgresql
        .create_database(db_name)
        .await
        .map_err(|e| embedded_error(&e))?;

    let settings = postgresql.settings();
    let options = PostgresOptions::default()
        .host(settings.host.clone())
        .port(settings.port)
        .dbname(db_name)
        .user(settings.username.clone())
        .password(settings.password.clone());
    tracing::debug!(port = settings.port, db_name, "embedded postgres started");

    Ok(EmbeddedPostgres {
        postgresql,
        options,
    })
}

/// Stop a server started by [`setup_postgres_embedded`].
pub async fn stop_postgres_embedded(postgres: EmbeddedPostgres) {
    let EmbeddedPostgres { postgresql, .. } = postgres;
    if let Err(e) = postgresql.stop().await {
        tracing::warn!(error = %e, "embedded postgres did not stop cleanly");
    }
}
