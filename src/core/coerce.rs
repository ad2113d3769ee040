/// Primitive Coercion Module
///
/// Converts raw SQLite values into the three scalar types a record property
/// may declare: `i32`, `String` and `f32`. Every other property type is
/// carried as `ValueType::Other` and never read.
use crate::core::{DbSetError, Result};
use rusqlite::types::ValueRef;
use std::fmt;

/// Scalar type tag carried by each column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// 32-bit signed integer
    Int32,
    /// UTF-8 text
    Text,
    /// Single-precision float
    Float32,
    /// Any other Rust type, named for diagnostics only
    Other(&'static str),
}

impl ValueType {
    /// Whether hydration reads columns of this type at all
    pub fn is_supported(&self) -> bool {
        !matches!(self, ValueType::Other(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int32 => f.write_str("i32"),
            ValueType::Text => f.write_str("String"),
            ValueType::Float32 => f.write_str("f32"),
            ValueType::Other(name) => f.write_str(name),
        }
    }
}

/// A coerced column value, ready to be assigned to a property
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Text(String),
    Float32(f32),
}

impl Value {
    /// Views the value the way SQLite would hand it back, so it can pass
    /// through the same coercion functions a second time.
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Int32(i) => ValueRef::Integer(i64::from(*i)),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Float32(f) => ValueRef::Real(f64::from(*f)),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int32(_) => ValueType::Int32,
            Value::Text(_) => ValueType::Text,
            Value::Float32(_) => ValueType::Float32,
        }
    }
}

/// Coerces a raw value into `target`.
///
/// Returns `Ok(None)` for unsupported targets; those are skipped silently.
pub fn coerce(value: ValueRef<'_>, target: ValueType, column: &str) -> Result<Option<Value>> {
    let coerced = match target {
        ValueType::Int32 => Value::Int32(to_i32(value, column)?),
        ValueType::Text => Value::Text(to_text(value)),
        ValueType::Float32 => Value::Float32(to_f32(value)),
        ValueType::Other(_) => return Ok(None),
    };
    Ok(Some(coerced))
}

/// Strict integer conversion.
///
/// Reals round half to even, numeric text is parsed. NULL, blobs,
/// non-numeric text and anything outside the `i32` range are errors.
pub fn to_i32(value: ValueRef<'_>, column: &str) -> Result<i32> {
    let fail = |detail: String| DbSetError::Coercion {
        column: column.to_string(),
        target: ValueType::Int32,
        detail,
    };

    match value {
        ValueRef::Null => Err(fail("value is NULL".to_string())),
        ValueRef::Integer(i) => {
            i32::try_from(i).map_err(|_| fail(format!("{} is out of range", i)))
        }
        ValueRef::Real(r) => {
            let rounded = r.round_ties_even();
            let in_range = rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX);
            if rounded.is_finite() && in_range {
                Ok(rounded as i32)
            } else {
                Err(fail(format!("{} is out of range", r)))
            }
        }
        ValueRef::Text(t) => {
            let text = String::from_utf8_lossy(t);
            text.trim()
                .parse::<i32>()
                .map_err(|e| fail(format!("'{}': {}", text, e)))
        }
        ValueRef::Blob(b) => Err(fail(format!("<BLOB: {} bytes>", b.len()))),
    }
}

/// Lenient text conversion; NULL becomes the empty string and a blob
/// becomes a `<BLOB: n bytes>` placeholder.
pub fn to_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}

/// Lenient float conversion; anything unparseable becomes `0.0`.
pub fn to_f32(value: ValueRef<'_>) -> f32 {
    match value {
        ValueRef::Integer(i) => i as f32,
        ValueRef::Real(r) => r as f32,
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim().parse().unwrap_or(0.0),
        ValueRef::Null | ValueRef::Blob(_) => 0.0,
    }
}
