/// Connection Management Module
///
/// Every call opens its own connection to the database file and releases it
/// before returning. Statements and row cursors borrow from that connection,
/// so they are always dropped first, on success and on every error path.

use crate::config::DatabaseConfig;
use crate::core::Result;
use rusqlite::{Connection, OpenFlags, Row, Rows};
use std::time::Duration;
use tracing::debug;

/// Live result cursor of one query
pub struct Cursor<'stmt> {
    columns: Vec<String>,
    rows: Rows<'stmt>,
}

impl<'stmt> Cursor<'stmt> {
    /// Column names of the result set, in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Advances to the next row, `None` once the result set is exhausted
    pub fn next_row(&mut self) -> Result<Option<&Row<'stmt>>> {
        Ok(self.rows.next()?)
    }
}

/// Opens connections and runs statements against a database file
#[derive(Debug, Clone, Default)]
pub struct Gateway {
    busy_timeout: Option<Duration>,
    read_only: bool,
    pragmas: Vec<String>,
}

impl Gateway {
    /// Creates a gateway with SQLite defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Gateway {
            busy_timeout: config.busy_timeout_ms.map(Duration::from_millis),
            read_only: config.read_only,
            pragmas: config.pragmas.clone(),
        }
    }

    /// Opens a fresh connection to `database_name`
    ///
    /// # Errors
    ///
    /// Returns `DbSetError::Database` if the file cannot be opened or a
    /// configured pragma fails.
    pub fn open(&self, database_name: &str) -> Result<Connection> {
        let flags = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::default()
        };

        let connection = Connection::open_with_flags(database_name, flags)?;

        if let Some(timeout) = self.busy_timeout {
            connection.busy_timeout(timeout)?;
        }
        for pragma in &self.pragmas {
            connection.execute_batch(pragma)?;
        }

        Ok(connection)
    }

    /// Runs a query and hands its cursor to `consume`.
    ///
    /// The cursor, statement and connection are closed when this returns,
    /// whether `consume` succeeded or not.
    pub fn query<R>(
        &self,
        database_name: &str,
        sql: &str,
        consume: impl FnOnce(&mut Cursor<'_>) -> Result<R>,
    ) -> Result<R> {
        let connection = self.open(database_name)?;
        let mut statement = connection.prepare(sql)?;
        let columns: Vec<String> = statement.column_names().into_iter().map(String::from).collect();

        debug!(database = database_name, sql, "running query");

        let mut cursor = Cursor {
            columns,
            rows: statement.query([])?,
        };
        let result = consume(&mut cursor);
        result
    }

    /// Runs every statement in `sql` without a result set.
    pub fn execute(&self, database_name: &str, sql: &str) -> Result<()> {
        let connection = self.open(database_name)?;

        debug!(database = database_name, sql, "executing command");

        connection.execute_batch(sql)?;
        Ok(())
    }
}
