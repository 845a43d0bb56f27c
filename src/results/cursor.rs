use std::sync::Arc;

use super::result_set::ResultSet;
use super::row::CustomDbRow;
use crate::error::SqlAssisterError;
use crate::scan::FromRow;

/// Cursor over the first row a query produced.
///
/// An empty result is not an error until the row is read, so a lookup that
/// matches nothing surfaces as [`SqlAssisterError::NoRows`] from [`SingleRow::scan`]
/// or [`SingleRow::row`].
#[derive(Debug, Clone)]
pub struct SingleRow {
    row: Option<CustomDbRow>,
    column_names: Arc<Vec<String>>,
}

impl SingleRow {
    pub(crate) fn from_result_set(result_set: ResultSet) -> Self {
        let column_names = Arc::clone(result_set.column_names());
        Self {
            row: result_set.results.into_iter().next(),
            column_names,
        }
    }

    /// Borrow the row.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::NoRows`] if the query matched nothing.
    pub fn row(&self) -> Result<&CustomDbRow, SqlAssisterError> {
        self.row.as_ref().ok_or(SqlAssisterError::NoRows)
    }

    /// Take the row out of the cursor.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::NoRows`] if the query matched nothing.
    pub fn into_row(self) -> Result<CustomDbRow, SqlAssisterError> {
        self.row.ok_or(SqlAssisterError::NoRows)
    }

    /// The row, or `None` when the query matched nothing.
    #[must_use]
    pub fn optional(self) -> Option<CustomDbRow> {
        self.row
    }

    /// Decode the row into `T`.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::NoRows`] for an empty cursor, or
    /// [`SqlAssisterError::Conversion`] if the row does not fit `T`.
    pub fn scan<T: FromRow>(&self) -> Result<T, SqlAssisterError> {
        T::from_row(self.row()?)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.is_none()
    }
}

/// Cursor over zero or more rows.
///
/// Iterating consumes the rows in the order the database returned them.
#[derive(Debug, Clone)]
pub struct Rows {
    column_names: Arc<Vec<String>>,
    rows: std::vec::IntoIter<CustomDbRow>,
}

impl Rows {
    pub(crate) fn from_result_set(result_set: ResultSet) -> Self {
        let column_names = Arc::clone(result_set.column_names());
        Self {
            column_names,
            rows: result_set.results.into_iter(),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// Decode the next row into `T`; `None` once the cursor is exhausted.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::Conversion`] if the row does not fit `T`.
    pub fn scan_next<T: FromRow>(&mut self) -> Option<Result<T, SqlAssisterError>> {
        self.rows.next().map(|row| T::from_row(&row))
    }

    /// Decode every remaining row into `T`, stopping at the first failure.
    ///
    /// # Errors
    /// Returns [`SqlAssisterError::Conversion`] if any row does not fit `T`.
    pub fn scan_all<T: FromRow>(self) -> Result<Vec<T>, SqlAssisterError> {
        self.rows.map(|row| T::from_row(&row)).collect()
    }
}

impl Iterator for Rows {
    type Item = CustomDbRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Rows {}
