/// Record Set Facade
///
/// [`DbSet`] binds one record type to one database file. The record's
/// schema is resolved once at construction; every call then opens its own
/// connection, runs the expanded SQL and, for queries, hydrates the rows.
use crate::config::Config;
use crate::core::db::{
    hydrate, resolve_schema, Gateway, QueryResult, TableDescriptor, TemplateExpander,
    TemplateMode,
};
use crate::core::record::{Record, SetterTable};
use crate::core::Result;
use std::fmt;
use tracing::debug;

const SELECT_ALL: &str = "SELECT * FROM @TableName";

/// Typed access to the table of record type `T`
///
/// # Examples
///
/// ```no_run
/// use dbset::{DbSet, Property, Record, RecordSchema};
///
/// #[derive(Debug, Default)]
/// struct Player {
///     id: i32,
///     name: String,
///     score: f32,
/// }
///
/// impl Record for Player {
///     fn schema() -> RecordSchema<Self> {
///         RecordSchema::new()
///             .table("players")
///             .property(
///                 Property::int32("id", |p: &mut Player, v| p.id = v)
///                     .column("player_id")
///                     .primary_key(),
///             )
///             .property(Property::text("name", |p: &mut Player, v| p.name = v))
///             .property(Property::float32("score", |p: &mut Player, v| p.score = v))
///     }
/// }
///
/// let players = DbSet::<Player>::new("game.db");
/// players.execute("INSERT INTO @TableName (player_id, name, score) VALUES (1, 'Ada', 9.5)")?;
/// for player in players.get_all()? {
///     println!("{:?}", player);
/// }
/// # Ok::<(), dbset::DbSetError>(())
/// ```
pub struct DbSet<T> {
    database_name: String,
    descriptor: TableDescriptor,
    setters: SetterTable<T>,
    gateway: Gateway,
    mode: TemplateMode,
}

impl<T: Record> DbSet<T> {
    /// Binds `T` to the database file at `database_name` with default settings.
    ///
    /// A record type without a table mapping is accepted; the missing
    /// mapping is logged and surfaces later when SQL referencing
    /// `@TableName` runs.
    pub fn new(database_name: impl Into<String>) -> Self {
        Self::with_config(database_name, &Config::default())
    }

    /// Binds `T` using connection and template settings from `config`.
    pub fn with_config(database_name: impl Into<String>, config: &Config) -> Self {
        let schema = T::schema();
        let descriptor = resolve_schema(&schema);
        let setters = SetterTable::from_schema(&schema);

        DbSet {
            database_name: database_name.into(),
            descriptor,
            setters,
            gateway: Gateway::from_config(&config.database),
            mode: config.templates.mode,
        }
    }

    /// Like [`DbSet::new`], but rejects record types without a table mapping.
    ///
    /// # Errors
    ///
    /// Returns `DbSetError::SchemaMissing` when `T` registers no table.
    pub fn strict(database_name: impl Into<String>) -> Result<Self> {
        let set = Self::new(database_name);
        set.descriptor.require_table()?;
        Ok(set)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Table name, `None` when `T` registered no table mapping
    pub fn table_name(&self) -> Option<&str> {
        self.descriptor.table_name()
    }

    pub fn descriptor(&self) -> &TableDescriptor {
        &self.descriptor
    }

    /// Expands `command` and runs it without a result set.
    ///
    /// # Errors
    ///
    /// Template errors in quoted mode, engine errors always.
    pub fn execute(&self, command: &str) -> Result<()> {
        let sql = self.expand(command)?;
        debug!(record = self.descriptor.record(), template = command, "execute");
        self.gateway.execute(&self.database_name, &sql)
    }

    /// Expands `query`, runs it and hydrates every row into a `T`.
    ///
    /// The whole result is materialized before the connection closes.
    ///
    /// # Errors
    ///
    /// Engine, coercion and property lookup errors abort the call; no
    /// partial result is returned.
    pub fn query(&self, query: &str) -> Result<Vec<T>> {
        let sql = self.expand(query)?;
        debug!(record = self.descriptor.record(), template = query, "query");
        self.gateway.query(&self.database_name, &sql, |cursor| {
            hydrate(cursor, &self.descriptor, &self.setters)
        })
    }

    /// Every row of the mapped table.
    pub fn get_all(&self) -> Result<Vec<T>> {
        self.query(SELECT_ALL)
    }

    /// Expands `query` and returns the rows as display text, without hydration.
    pub fn query_raw(&self, query: &str) -> Result<QueryResult> {
        let sql = self.expand(query)?;
        debug!(record = self.descriptor.record(), template = query, "raw query");
        self.gateway
            .query(&self.database_name, &sql, QueryResult::from_cursor)
    }

    fn expand(&self, template: &str) -> Result<String> {
        TemplateExpander::new(
            self.mode,
            self.descriptor.record(),
            self.descriptor.table_name(),
            &self.database_name,
        )
        .expand(template)
    }
}

impl<T> fmt::Debug for DbSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSet")
            .field("database_name", &self.database_name)
            .field("descriptor", &self.descriptor)
            .field("gateway", &self.gateway)
            .field("mode", &self.mode)
            .finish()
    }
}
