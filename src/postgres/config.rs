use tokio_postgres::{Client, NoTls};

use crate::error::SqlAssisterError;

/// Connection settings for opening a Postgres [`Client`].
#[derive(Debug, Clone, Default)]
pub struct PostgresOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl PostgresOptions {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Validate the settings and turn them into a driver config.
    ///
    /// # Errors
    /// Returns `SqlAssisterError::ConfigError` naming the first missing field.
    pub fn to_pg_config(&self) -> Result<tokio_postgres::Config, SqlAssisterError> {
        let required = |field: &Option<String>, name: &str| {
            field
                .clone()
                .ok_or_else(|| SqlAssisterError::ConfigError(format!("{name} is required")))
        };
        let dbname = required(&self.dbname, "dbname")?;
        let host = required(&self.host, "host")?;
        let port = self
            .port
            .ok_or_else(|| SqlAssisterError::ConfigError("port is required".to_string()))?;
        let user = required(&self.user, "user")?;
        let password = required(&self.password, "password")?;

        let mut config = tokio_postgres::Config::new();
        config
            .dbname(&dbname)
            .host(&host)
            .port(port)
            .user(&user)
            .password(password);
        Ok(config)
    }

    /// Connect without TLS and drive the connection on a background task.
    ///
    /// The returned client is the handle to pass to an executor. When the
    /// connection task ends with an error it is logged and every later call on
    /// the client fails.
    ///
    /// # Errors
    /// Returns `SqlAssisterError::ConfigError` for incomplete settings or
    /// `SqlAssisterError::ConnectionError` if the server cannot be reached.
    pub async fn connect(&self) -> Result<Client, SqlAssisterError> {
        let config = self.to_pg_config()?;
        let (client, connection) = config.connect(NoTls).await.map_err(|e| {
            SqlAssisterError::ConnectionError(format!("Failed to connect to Postgres: {e}"))
        })?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgres connection closed with error");
            }
        });
        Ok(client)
    }
}
