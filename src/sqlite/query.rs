use rusqlite::Statement;
use rusqlite::types::Value;

use super::params::Params;
use crate::error::SqlAssisterError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlAssisterError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlAssisterError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a prepared statement and read at most `limit` rows into a `ResultSet`.
///
/// Stepping stops as soon as the limit is reached, so a single-row lookup never
/// walks the rest of the result.
///
/// # Errors
/// Returns `SqlAssisterError::SqliteError` if binding, stepping, or reading a column fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &Params,
    limit: Option<usize>,
) -> Result<ResultSet, SqlAssisterError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_columns(column_names, limit.unwrap_or(10).min(10));
    let mut rows_iter = stmt.query(&params.as_refs()[..])?;

    while limit.is_none_or(|max| result_set.len() < max) {
        let Some(row) = rows_iter.next()? else {
            break;
        };
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
