/// Record Registration Module
///
/// Record types describe themselves once through [`Record::schema`]: an
/// optional table mapping plus one [`Property`] per field. Each property
/// carries a typed setter, so hydration never needs runtime reflection.
use crate::core::coerce::{self, Value, ValueType};
use crate::core::Result;
use std::collections::HashMap;
use std::fmt;

/// A type that can be hydrated from rows of one table.
///
/// `Default` is the parameterless construction path used for every row.
///
/// # Examples
///
/// ```
/// use dbset::{Property, Record, RecordSchema};
///
/// #[derive(Debug, Default)]
/// struct Player {
///     id: i32,
///     name: String,
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
///     }
/// }
/// ```
pub trait Record: Default + Sized {
    fn schema() -> RecordSchema<Self>;
}

/// Type-level mapping to a stored table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMapping {
    pub table_name: String,
}

/// Property-level mapping to a stored column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub column_name: String,
    pub primary_key: bool,
}

/// Typed assignment into one field of `T`
pub enum Setter<T> {
    Int32(fn(&mut T, i32)),
    Text(fn(&mut T, String)),
    Float32(fn(&mut T, f32)),
    /// A field of a type hydration does not support
    Other(&'static str),
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Setter<T> {}

impl<T> fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({})", self.value_type())
    }
}

impl<T> Setter<T> {
    pub fn value_type(&self) -> ValueType {
        match self {
            Setter::Int32(_) => ValueType::Int32,
            Setter::Text(_) => ValueType::Text,
            Setter::Float32(_) => ValueType::Float32,
            Setter::Other(name) => ValueType::Other(name),
        }
    }

    /// Coerces `value` to this setter's type and stores it on `record`.
    ///
    /// `Other` setters ignore the value.
    pub fn assign(&self, record: &mut T, value: &Value, column: &str) -> Result<()> {
        let raw = value.as_value_ref();
        match *self {
            Setter::Int32(set) => set(record, coerce::to_i32(raw, column)?),
            Setter::Text(set) => match value {
                // Render the f32 itself; widening to f64 first adds digits
                Value::Float32(f) => set(record, f.to_string()),
                _ => set(record, coerce::to_text(raw)),
            },
            Setter::Float32(set) => set(record, coerce::to_f32(raw)),
            Setter::Other(_) => {}
        }
        Ok(())
    }
}

/// One declared field of a record type
#[derive(Debug, Clone)]
pub struct Property<T> {
    name: String,
    setter: Setter<T>,
    column: Option<ColumnMapping>,
}

impl<T> Property<T> {
    fn new(name: impl Into<String>, setter: Setter<T>) -> Self {
        Property {
            name: name.into(),
            setter,
            column: None,
        }
    }

    pub fn int32(name: impl Into<String>, set: fn(&mut T, i32)) -> Self {
        Self::new(name, Setter::Int32(set))
    }

    pub fn text(name: impl Into<String>, set: fn(&mut T, String)) -> Self {
        Self::new(name, Setter::Text(set))
    }

    pub fn float32(name: impl Into<String>, set: fn(&mut T, f32)) -> Self {
        Self::new(name, Setter::Float32(set))
    }

    /// Declares a field whose type hydration cannot populate.
    pub fn other(name: impl Into<String>, type_name: &'static str) -> Self {
        Self::new(name, Setter::Other(type_name))
    }

    /// Maps the property onto a differently named column.
    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        let primary_key = self.column.as_ref().is_some_and(|c| c.primary_key);
        self.column = Some(ColumnMapping {
            column_name: column_name.into(),
            primary_key,
        });
        self
    }

    /// Flags the mapped column as primary key.
    ///
    /// Without a preceding `column` call the column keeps the property name.
    pub fn primary_key(mut self) -> Self {
        let column_name = match self.column.take() {
            Some(mapping) => mapping.column_name,
            None => self.name.clone(),
        };
        self.column = Some(ColumnMapping {
            column_name,
            primary_key: true,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn setter(&self) -> Setter<T> {
        self.setter
    }

    pub fn column_mapping(&self) -> Option<&ColumnMapping> {
        self.column.as_ref()
    }
}

/// Registered schema of a record type: table mapping plus ordered properties
#[derive(Debug, Clone)]
pub struct RecordSchema<T> {
    table: Option<TableMapping>,
    properties: Vec<Property<T>>,
}

impl<T> Default for RecordSchema<T> {
    fn default() -> Self {
        RecordSchema {
            table: None,
            properties: Vec::new(),
        }
    }
}

impl<T> RecordSchema<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table = Some(TableMapping {
            table_name: table_name.into(),
        });
        self
    }

    pub fn property(mut self, property: Property<T>) -> Self {
        self.properties.push(property);
        self
    }

    pub fn table_mapping(&self) -> Option<&TableMapping> {
        self.table.as_ref()
    }

    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }
}

/// Setters of a record type keyed by property name
#[derive(Debug)]
pub struct SetterTable<T> {
    setters: HashMap<String, Setter<T>>,
}

impl<T> SetterTable<T> {
    /// Builds the table; the first property registered under a name wins.
    pub fn from_schema(schema: &RecordSchema<T>) -> Self {
        let mut setters = HashMap::with_capacity(schema.properties.len());
        for property in &schema.properties {
            setters
                .entry(property.name.clone())
                .or_insert(property.setter);
        }
        SetterTable { setters }
    }

    pub fn get(&self, property_name: &str) -> Option<Setter<T>> {
        self.setters.get(property_name).copied()
    }

    pub fn len(&self) -> usize {
        self.setters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}
