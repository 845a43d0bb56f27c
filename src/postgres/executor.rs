use async_trait::async_trait;
use tokio_postgres::Client;

use super::params::Params;
use super::query::build_result_set;
use crate::error::SqlAssisterError;
use crate::executor::StatementExecutor;
use crate::results::ResultSet;
use crate::types::{DatabaseType, RowValues};

#[async_trait]
impl StatementExecutor for Client {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Postgres
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlAssisterError> {
        let stmt = self.prepare(query).await?;
        let converted = Params::convert(params);
        let rows = self.execute(&stmt, converted.as_refs()).await?;
        usize::try_from(rows).map_err(|e| {
            SqlAssisterError::ExecutionError(format!(
                "postgres affected rows conversion error: {e}"
            ))
        })
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError> {
        let stmt = self.prepare(query).await?;
        let converted = Params::convert(params);
        let rows = self.query(&stmt, converted.as_refs()).await?;
        build_result_set(&stmt, &rows, limit)
    }
}
