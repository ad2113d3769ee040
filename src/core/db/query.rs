/// Raw Query Results Module
///
/// Un-hydrated access to a result set: column names plus every value
/// rendered as display text.

use crate::core::db::connection::Cursor;
use crate::core::Result;
use rusqlite::types::ValueRef;

/// Represents the result of a SQL query execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data as string values
    pub rows: Vec<Vec<String>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// Drains a cursor into display rows
    pub fn from_cursor(cursor: &mut Cursor<'_>) -> Result<Self> {
        let columns = cursor.columns().to_vec();
        let mut rows = Vec::new();

        while let Some(row) = cursor.next_row()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(format_value(row.get_ref(i)?));
            }
            rows.push(values);
        }

        Ok(QueryResult::new(columns, rows))
    }
}

/// Formats a SQLite value for display
fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}
