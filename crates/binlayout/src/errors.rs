//! Error types for codec generation and for running generated codecs.

use thiserror::Error;

/// Errors produced when generating codecs for a [crate::schema::RecordSchema].
///
/// Every variant is fatal for the affected schema only and names the record
/// (and field, where one is involved) it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The target type cannot receive generated members.
    #[error("record `{record}` cannot be augmented with generated codecs")]
    SchemaNotAugmentable { record: String },
    /// Both the little-endian and the big-endian directive are present.
    #[error("record `{record}` declares both little-endian and big-endian byte order")]
    AmbiguousEndianness { record: String },
    /// A field type is none of integer, byte, enum or composite.
    #[error("field `{record}.{field}` has unsupported type `{type_name}`")]
    UnsupportedFieldType {
        record: String,
        field: String,
        type_name: String,
    },
    /// A composite field type offers no usable decode/encode operation pair.
    #[error("field `{record}.{field}`: type `{type_name}` offers no usable decode/encode pair")]
    MissingContract {
        record: String,
        field: String,
        type_name: String,
    },
    /// Field name is not a usable identifier, or clashes with another field.
    #[error("record `{record}` has an invalid or clashing field name `{field}`")]
    InvalidFieldName { record: String, field: String },
    /// A composite is declared but no runtime codec is registered for it.
    #[error("field `{record}.{field}`: no runtime codec bound for composite `{type_name}`")]
    UnboundComposite {
        record: String,
        field: String,
        type_name: String,
    },
}

impl GenerateError {
    /// Name of the record the error was raised for.
    pub fn record(&self) -> &str {
        match self {
            GenerateError::SchemaNotAugmentable { record }
            | GenerateError::AmbiguousEndianness { record }
            | GenerateError::UnsupportedFieldType { record, .. }
            | GenerateError::MissingContract { record, .. }
            | GenerateError::InvalidFieldName { record, .. }
            | GenerateError::UnboundComposite { record, .. } => record,
        }
    }
}

/// Errors returned by generated (or interpreted) decode and encode procedures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input is shorter than decode needs, or output shorter than encode needs.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
    /// A nested composite reported more bytes than the space it was handed.
    #[error("nested codec at offset {offset} reported {reported} bytes, only {available} available")]
    InvalidLength {
        offset: usize,
        reported: usize,
        available: usize,
    },
    /// Integer has no matching variant in the target enum.
    #[error("value {value} is not a variant of `{type_name}`")]
    InvalidEnumValue { type_name: String, value: i128 },
    /// Record passed to encode lacks a field.
    #[error("missing field `{0}`")]
    MissingField(String),
    /// Value shape does not match the field kind.
    #[error("field `{field}` expects {expected}")]
    TypeMismatch { field: String, expected: &'static str },
    /// Integer value does not fit the field width.
    #[error("value {value} does not fit field `{field}`")]
    ValueOutOfRange { field: String, value: i128 },
    /// The requested decode/encode operation was not generated for this record.
    #[error("record `{record}` has no `{operation}` operation")]
    UnsupportedOperation { record: String, operation: String },
}

/// Errors turning a declarative bundle into schemas and type declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Enum representation is not a primitive type name.
    #[error("enum `{name}` has unknown representation `{repr}`")]
    UnknownEnumRepr { name: String, repr: String },
    /// Two enums, or two records, share a name.
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
}
