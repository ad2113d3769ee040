/// # Test Utilities Module
///
/// Shared fixtures for the crate's unit and integration tests:
/// - Temp-file databases (every `DbSet` call opens its own connection, so
///   in-memory databases would not survive between calls)
/// - Sample record types covering renamed columns, missing table mappings
///   and unsupported property types
/// - `DbSetError`-specific assertion helpers
use crate::core::record::{Property, Record, RecordSchema};
use crate::core::{DbSetError, Result};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::SystemTime;
use tempfile::TempDir;

/// Isolated database file that is removed when the fixture drops
pub struct DatabaseFixture {
    _dir: TempDir,
    path: String,
}

impl DatabaseFixture {
    /// Creates an empty database file in a fresh temp directory
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let path: PathBuf = dir.path().join("fixture.db");
        let path = path.to_string_lossy().into_owned();
        Ok(DatabaseFixture { _dir: dir, path })
    }

    /// Creates a fixture with the `players` table and three sample rows
    pub fn with_players() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.setup_players_schema()?;
        fixture.populate_players()?;
        Ok(fixture)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let connection = Connection::open(&self.path)?;
        connection.execute_batch(sql)?;
        Ok(())
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let connection = Connection::open(&self.path)?;
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count = connection.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Column names deliberately differ from `Player` property names
    pub fn setup_players_schema(&self) -> Result<()> {
        self.execute_batch(
            "
            CREATE TABLE players (
                player_id INTEGER PRIMARY KEY,
                display_name TEXT NOT NULL,
                score REAL,
                level INTEGER
            );
        ",
        )
    }

    pub fn populate_players(&self) -> Result<()> {
        self.execute_batch(
            "
            INSERT INTO players (player_id, display_name, score, level) VALUES (1, 'alice', 12.5, 3);
            INSERT INTO players (player_id, display_name, score, level) VALUES (2, 'bob', 7.25, 1);
            INSERT INTO players (player_id, display_name, score, level) VALUES (3, 'charlie', 0.5, 9);
        ",
        )
    }
}

/// Record with renamed columns, mapped to `players`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub score: f32,
    pub level: i32,
}

impl Player {
    pub fn new(id: i32, name: &str, score: f32, level: i32) -> Self {
        Player {
            id,
            name: name.to_string(),
            score,
            level,
        }
    }
}

impl Record for Player {
    fn schema() -> RecordSchema<Self> {
        RecordSchema::new()
            .table("players")
            .property(
                Property::int32("id", |p: &mut Player, v| p.id = v)
                    .column("player_id")
                    .primary_key(),
            )
            .property(Property::text("name", |p: &mut Player, v| p.name = v).column("display_name"))
            .property(Property::float32("score", |p: &mut Player, v| p.score = v))
            .property(Property::int32("level", |p: &mut Player, v| p.level = v))
    }
}

/// Same columns as `Player`, but no table mapping
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnmappedPlayer {
    pub id: i32,
}

impl Record for UnmappedPlayer {
    fn schema() -> RecordSchema<Self> {
        RecordSchema::new()
            .property(
                Property::int32("id", |p: &mut UnmappedPlayer, v| p.id = v).column("player_id"),
            )
    }
}

/// Record with a property hydration cannot populate
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerProfile {
    pub id: i32,
    pub name: String,
    pub joined: Option<SystemTime>,
}

impl Record for PlayerProfile {
    fn schema() -> RecordSchema<Self> {
        RecordSchema::new()
            .table("players")
            .property(
                Property::int32("id", |p: &mut PlayerProfile, v| p.id = v).column("player_id"),
            )
            .property(
                Property::text("name", |p: &mut PlayerProfile, v| p.name = v)
                    .column("display_name"),
            )
            .property(Property::other("joined", "Option<SystemTime>").column("joined_at"))
    }
}

/// Error testing utilities specific to DbSetError patterns
pub mod error_testing {
    /// Verify error message quality (contains helpful information)
    pub fn verify_error_message_quality<T, E>(result: &std::result::Result<T, E>, context: &str)
    where
        T: std::fmt::Debug,
        E: std::fmt::Display,
    {
        if let Err(ref error) = result {
            let error_str = error.to_string();

            assert!(!error_str.is_empty(), "Error message should not be empty in {}", context);
            assert!(error_str.len() > 10, "Error message should be descriptive in {}", context);
            assert!(
                error_str.to_lowercase().contains("error"),
                "Error should indicate which layer failed: '{}' in {}",
                error_str,
                context
            );
        } else {
            panic!("Expected error but got Ok in {}", context);
        }
    }
}

#[macro_export]
macro_rules! assert_dbset_error {
    ($result:expr, $expected_type:ident, $context:expr) => {
        match $result {
            Err($crate::core::DbSetError::$expected_type { .. }) => {}
            Ok(_) => panic!(
                "Expected {} error but got Ok in {}",
                stringify!($expected_type),
                $context
            ),
            Err(other) => panic!(
                "Expected {} but got {:?} in {}",
                stringify!($expected_type),
                other,
                $context
            ),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_fixture_creation() {
        let fixture = DatabaseFixture::new().unwrap();
        assert!(fixture.path().ends_with("fixture.db"));
    }

    #[test]
    fn test_players_fixture() {
        let fixture = DatabaseFixture::with_players().unwrap();
        assert_eq!(fixture.count_rows("players").unwrap(), 3);
    }

    #[test]
    fn test_error_assertion_macro() {
        let result: Result<i32> = Err(DbSetError::Config("Test error".to_string()));
        assert_dbset_error!(result, Config, "macro test");

        let result: Result<i32> = Err(DbSetError::SchemaMissing { record: "Player" });
        assert_dbset_error!(result, SchemaMissing, "macro test");
    }

    #[test]
    fn test_error_message_quality() {
        let result: Result<i32> =
            Err(DbSetError::Config("Specific configuration problem".to_string()));
        error_testing::verify_error_message_quality(&result, "config error test");
    }
}
