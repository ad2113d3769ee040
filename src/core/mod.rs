/// Core Module for DbSet
///
/// The building blocks behind the record set facade: value coercion, record
/// registration, the database layer, and the shared error type.

pub mod coerce;
pub mod db;
pub mod error;
pub mod record;

// Re-export commonly used types for convenience
pub use error::{DbSetError, Result};
