//! Materialized query results and the cursors handed back to callers.

mod cursor;
mod result_set;
mod row;

pub use cursor::{Rows, SingleRow};
pub use result_set::ResultSet;
pub use row::CustomDbRow;
