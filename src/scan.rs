//! Decoding rows into caller types.
//!
//! [`FromValue`] converts a single column value; [`FromRow`] converts a whole row.
//! Tuples decode positionally (column `i` into element `i`), and the
//! [`from_row!`](crate::from_row) macro decodes a plain struct by column name:
//!
//! ```rust
//! use sql_assister::from_row;
//!
//! #[derive(Debug)]
//! struct Book {
//!     id: i64,
//!     name: String,
//!     subtitle: Option<String>,
//! }
//!
//! from_row!(Book { id, name, subtitle });
//! ```

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::SqlAssisterError;
use crate::results::CustomDbRow;
use crate::types::RowValues;

/// Conversion from one column value.
pub trait FromValue: Sized {
    /// # Errors
    /// Returns [`SqlAssisterError::Conversion`] if the value has an incompatible type.
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError>;
}

/// Conversion from a full row.
pub trait FromRow: Sized {
    /// # Errors
    /// Returns [`SqlAssisterError::Conversion`] if a column is missing or has an incompatible type.
    fn from_row(row: &CustomDbRow) -> Result<Self, SqlAssisterError>;
}

fn mismatch(expected: &str, value: &RowValues) -> SqlAssisterError {
    SqlAssisterError::Conversion(format!(
        "expected {expected}, found {}",
        value.type_name()
    ))
}

impl FromValue for RowValues {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value.as_int().copied().ok_or_else(|| mismatch("int", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide)
            .map_err(|_| SqlAssisterError::Conversion(format!("{wide} does not fit in i32")))
    }
}

impl FromValue for u32 {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        let wide = i64::from_value(value)?;
        u32::try_from(wide)
            .map_err(|_| SqlAssisterError::Conversion(format!("{wide} does not fit in u32")))
    }
}

impl FromValue for f64 {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value.as_float().ok_or_else(|| mismatch("float", value))
    }
}

impl FromValue for bool {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromValue for String {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value
            .as_text()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch("blob", value))
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value
            .as_timestamp()
            .ok_or_else(|| mismatch("timestamp", value))
    }
}

impl FromValue for JsonValue {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        value.as_json().ok_or_else(|| mismatch("json", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &RowValues) -> Result<Self, SqlAssisterError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Decode the column at `index`.
///
/// # Errors
/// Returns [`SqlAssisterError::Conversion`] if the row is too short or the value does not fit `T`.
pub fn column_at<T: FromValue>(row: &CustomDbRow, index: usize) -> Result<T, SqlAssisterError> {
    let value = row.get_by_index(index).ok_or_else(|| {
        SqlAssisterError::Conversion(format!(
            "row has {} columns, no column at index {index}",
            row.len()
        ))
    })?;
    T::from_value(value)
}

/// Decode the column called `name`.
///
/// # Errors
/// Returns [`SqlAssisterError::Conversion`] if the column is absent or the value does not fit `T`.
pub fn column_named<T: FromValue>(row: &CustomDbRow, name: &str) -> Result<T, SqlAssisterError> {
    let value = row
        .get(name)
        .ok_or_else(|| SqlAssisterError::Conversion(format!("no column named `{name}`")))?;
    T::from_value(value).map_err(|e| match e {
        SqlAssisterError::Conversion(msg) => {
            SqlAssisterError::Conversion(format!("column `{name}`: {msg}"))
        }
        other => other,
    })
}

impl FromRow for CustomDbRow {
    fn from_row(row: &CustomDbRow) -> Result<Self, SqlAssisterError> {
        Ok(row.clone())
    }
}

macro_rules! impl_from_row_for_tuple {
    ($($idx:tt => $ty:ident),+) => {
        impl<$($ty: FromValue),+> FromRow for ($($ty,)+) {
            fn from_row(row: &CustomDbRow) -> Result<Self, SqlAssisterError> {
                Ok(($(column_at::<$ty>(row, $idx)?,)+))
            }
        }
    };
}

impl_from_row_for_tuple!(0 => A);
impl_from_row_for_tuple!(0 => A, 1 => B);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_from_row_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);

/// Implement [`FromRow`](crate::scan::FromRow) for a struct whose fields are named after
/// result columns.
///
/// Each listed field is decoded with [`column_named`](crate::scan::column_named), so every
/// field type must implement [`FromValue`](crate::scan::FromValue). A field can be read from
/// a differently named column with `field = "column"`.
#[macro_export]
macro_rules! from_row {
    ($ty:ident { $($field:ident $(= $column:literal)?),+ $(,)? }) => {
        impl $crate::scan::FromRow for $ty {
            fn from_row(
                row: &$crate::results::CustomDbRow,
            ) -> ::std::result::Result<Self, $crate::SqlAssisterError> {
                ::std::result::Result::Ok($ty {
                    $($field: $crate::scan::column_named(
                        row,
                        $crate::from_row!(@column $field $(, $column)?),
                    )?,)+
                })
            }
        }
    };
    (@column $field:ident) => {
        ::std::stringify!($field)
    };
    (@column $field:ident, $column:literal) => {
        $column
    };
}
