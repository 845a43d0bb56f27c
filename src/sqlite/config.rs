use std::time::Duration;

use super::handle::SqliteHandle;
use crate::error::SqlAssisterError;

/// Options for opening a [`SqliteHandle`].
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    /// Switch the database to write-ahead logging after opening.
    pub wal: bool,
    /// How long `SQLite` waits on a locked database before returning `SQLITE_BUSY`.
    pub busy_timeout: Option<Duration>,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            wal: false,
            busy_timeout: None,
        }
    }

    #[must_use]
    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    #[must_use]
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = Some(busy_timeout);
        self
    }

    /// Pragmas to run right after opening, or `None` when there is nothing to apply.
    pub(crate) fn pragma_batch(&self) -> Option<String> {
        let mut pragmas = Vec::new();
        if self.wal {
            pragmas.push("PRAGMA journal_mode = WAL;".to_string());
        }
        if let Some(timeout) = self.busy_timeout {
            pragmas.push(format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        (!pragmas.is_empty()).then(|| pragmas.join("\n"))
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(busy_timeout);
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the database with the collected options.
    ///
    /// # Errors
    ///
    /// Returns `SqlAssisterError` if the database cannot be opened or a pragma fails.
    pub async fn open(self) -> Result<SqliteHandle, SqlAssisterError> {
        SqliteHandle::open(self.finish()).await
    }
}

impl SqliteHandle {
    #[must_use]
    pub fn builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_follow_options() {
        assert_eq!(SqliteOptions::new("a.db".into()).pragma_batch(), None);

        let opts = SqliteOptionsBuilder::new("a.db".into())
            .wal(true)
            .busy_timeout(Duration::from_secs(5))
            .finish();
        assert_eq!(
            opts.pragma_batch().as_deref(),
            Some("PRAGMA journal_mode = WAL;\nPRAGMA busy_timeout = 5000;")
        );
    }
}
