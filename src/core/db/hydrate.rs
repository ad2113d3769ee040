/// Row Hydration Module
///
/// Turns result rows into populated record instances. Values are read by
/// column name, coerced to the descriptor's declared type, then routed to a
/// property setter which coerces once more to the property's own type.
use crate::core::coerce::{self, Value};
use crate::core::db::connection::Cursor;
use crate::core::db::schema::{ColumnDescriptor, TableDescriptor};
use crate::core::record::{Setter, SetterTable};
use crate::core::{DbSetError, Result};
use rusqlite::Row;
use tracing::{debug, trace};

/// Materializes every remaining row of `cursor` as a `T`.
///
/// # Errors
///
/// - `DbSetError::Database` if a descriptor's column is absent from the
///   result set or the engine fails mid-iteration
/// - `DbSetError::Coercion` if a value cannot become an `i32`
/// - `DbSetError::PropertyLookup` if a column matches no property
pub fn hydrate<T: Default>(
    cursor: &mut Cursor<'_>,
    descriptor: &TableDescriptor,
    setters: &SetterTable<T>,
) -> Result<Vec<T>> {
    let mut records = Vec::new();

    while let Some(row) = cursor.next_row()? {
        let values = read_row(row, descriptor.columns())?;

        let mut record = T::default();
        for (column_name, value) in &values {
            let setter = locate_setter(column_name, descriptor, setters)?;
            setter.assign(&mut record, value, column_name)?;
        }
        records.push(record);
    }

    debug!(record = descriptor.record(), rows = records.len(), "hydrated records");
    Ok(records)
}

/// Reads and coerces every supported column of one row
fn read_row<'d>(row: &Row<'_>, columns: &'d [ColumnDescriptor]) -> Result<Vec<(&'d str, Value)>> {
    let mut values = Vec::with_capacity(columns.len());

    for column in columns {
        if !column.value_type.is_supported() {
            trace!(
                column = column.column_name.as_str(),
                value_type = %column.value_type,
                "skipping unsupported property type"
            );
            continue;
        }

        let raw = row.get_ref(column.column_name.as_str())?;
        if let Some(value) = coerce::coerce(raw, column.value_type, &column.column_name)? {
            values.push((column.column_name.as_str(), value));
        }
    }

    Ok(values)
}

/// Finds the setter for a column: by the column's own name first, then
/// through the descriptor that renamed it.
fn locate_setter<T>(
    column_name: &str,
    descriptor: &TableDescriptor,
    setters: &SetterTable<T>,
) -> Result<Setter<T>> {
    setters
        .get(column_name)
        .or_else(|| {
            descriptor
                .column_named(column_name)
                .and_then(|column| setters.get(&column.property_name))
        })
        .ok_or_else(|| DbSetError::PropertyLookup {
            record: descriptor.record(),
            column: column_name.to_string(),
        })
}
