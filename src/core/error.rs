/// DbSet Error Module
///
/// This module defines the error type shared by every layer of the crate,
/// from value coercion up to the record set facade.
use crate::core::coerce::ValueType;
use thiserror::Error;

/// Error type for record set operations.
///
/// The variants follow the failure modes of the mapping engine:
/// - Engine failures from SQLite (open, prepare, execute, missing columns)
/// - Record types without a table mapping, when the caller asks for one
/// - Result columns that cannot be routed to any property
/// - Values that cannot be coerced into the declared scalar type
/// - Configuration loading
#[derive(Error, Debug)]
pub enum DbSetError {
    /// Errors raised by the underlying SQLite engine, passed through untouched
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The record type registered no table mapping
    #[error("Schema error: no table mapping registered for record type `{record}`")]
    SchemaMissing { record: &'static str },

    /// A coerced column value has no property to land on
    #[error("Hydration error: column `{column}` matches no property of `{record}`")]
    PropertyLookup { record: &'static str, column: String },

    /// A stored value could not be converted into the declared scalar type
    #[error("Coercion error: column `{column}` cannot be read as {target}: {detail}")]
    Coercion {
        column: String,
        target: ValueType,
        detail: String,
    },

    /// An identifier rejected before being spliced into SQL text
    #[error("Template error: `{0}` is not a valid SQL identifier")]
    InvalidIdentifier(String),

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors while loading configuration
    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Type alias for Result to use DbSetError as the error type.
pub type Result<T> = std::result::Result<T, DbSetError>;
