//! Dynamic values produced and consumed by the codec interpreter.

use std::collections::BTreeMap;

/// Decoded record: field name to value.
pub type Record = BTreeMap<String, Value>;

/// A value decoded from (or to be encoded into) a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U64(u64),
    I64(i64),
    /// Name of an enum variant.
    Enum(String),
    /// Text produced by a composite codec.
    Text(String),
    /// Raw bytes produced by a composite codec.
    Bytes(Vec<u8>),
    /// A nested record.
    Record(Record),
}

impl Value {
    /// Integer content as `i128`, for range checks.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::U64(v) => Some(i128::from(*v)),
            Value::I64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Enum(s) | Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}
