/// Schema Resolution Module
///
/// Turns the registered schema of a record type into the table and column
/// metadata the rest of the engine works from.
use crate::core::coerce::ValueType;
use crate::core::record::{Record, RecordSchema};
use crate::core::{DbSetError, Result};
use std::fmt;
use tracing::{debug, warn};

/// Mapping between one stored column and one record property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Declared scalar type of the property
    pub value_type: ValueType,
    /// Column name as the database reports it
    pub column_name: String,
    /// Name of the property that receives the value
    pub property_name: String,
    /// Whether the column was flagged as primary key
    pub is_primary_key: bool,
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type: {}, Name: {}, Primary Key: {})",
            self.value_type, self.column_name, self.is_primary_key
        )
    }
}

/// Table name plus the ordered column descriptors of one record type
///
/// Column order follows property registration order, not storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    record: &'static str,
    table_name: Option<String>,
    columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub(crate) fn from_parts(
        record: &'static str,
        table_name: Option<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        TableDescriptor {
            record,
            table_name,
            columns,
        }
    }

    /// Rust type name of the record this descriptor was resolved from
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Table name, `None` when the record registered no table mapping
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// First descriptor whose column name matches exactly
    pub fn column_named(&self, column_name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Table name, or `SchemaMissing` for callers that treat it as fatal
    pub fn require_table(&self) -> Result<&str> {
        self.table_name().ok_or(DbSetError::SchemaMissing {
            record: self.record,
        })
    }
}

/// Resolves the descriptor of `T` from its registered schema.
///
/// A missing table mapping is logged and leaves the table name unset.
pub fn resolve<T: Record>() -> TableDescriptor {
    resolve_schema(&T::schema())
}

/// Like [`resolve`], but a missing table mapping is an error.
pub fn try_resolve<T: Record>() -> Result<TableDescriptor> {
    let descriptor = resolve::<T>();
    descriptor.require_table()?;
    Ok(descriptor)
}

/// Builds a descriptor from an already constructed schema.
pub fn resolve_schema<T>(schema: &RecordSchema<T>) -> TableDescriptor {
    let record = std::any::type_name::<T>();

    let table_name = match schema.table_mapping() {
        Some(mapping) => Some(mapping.table_name.clone()),
        None => {
            warn!(record, "no table mapping registered for record type");
            None
        }
    };

    let columns: Vec<ColumnDescriptor> = schema
        .properties()
        .iter()
        .map(|property| {
            let value_type = property.setter().value_type();
            match property.column_mapping() {
                Some(mapping) => ColumnDescriptor {
                    value_type,
                    column_name: mapping.column_name.clone(),
                    property_name: property.name().to_string(),
                    is_primary_key: mapping.primary_key,
                },
                None => ColumnDescriptor {
                    value_type,
                    column_name: property.name().to_string(),
                    property_name: property.name().to_string(),
                    is_primary_key: false,
                },
            }
        })
        .collect();

    debug!(
        record,
        table = table_name.as_deref().unwrap_or(""),
        columns = columns.len(),
        "resolved record schema"
    );

    TableDescriptor::from_parts(record, table_name, columns)
}
