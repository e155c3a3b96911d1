//! Logical column types, column schemas, and runtime column values.
//!
//! - `schema`: [`ColumnType`] tag set and [`ColumnSchema`] column description
//! - `value`: [`ColumnValue`] tagged runtime value (one variant per type,
//!   plus `Absent` for null)

pub mod schema;
pub mod value;

pub use schema::{ColumnSchema, ColumnType};
pub use value::ColumnValue;
