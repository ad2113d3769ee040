//! A minimal record-set ORM over SQLite.
//!
//! A record type registers its table and columns through [`Record`], and a
//! [`DbSet`] runs caller SQL against that table, expanding `@TableName` and
//! `@DatabaseName` and hydrating result rows into typed records.

// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod dbset;
pub mod logging;

#[cfg(test)]
mod test_utils;

pub use crate::core::coerce::{Value, ValueType};
pub use crate::core::db::{ColumnDescriptor, QueryResult, TableDescriptor, TemplateMode};
pub use crate::core::record::{ColumnMapping, Property, Record, RecordSchema, TableMapping};
pub use crate::core::{DbSetError, Result};
pub use config::Config;
pub use dbset::DbSet;
