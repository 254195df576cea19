//! Type classification: what each declared field type means for the layout.

use crate::{
    endian::Variant,
    errors::GenerateError,
    field::{FieldDescriptor, Primitive, TypeRef},
    schema::RecordSchema,
    types::{CompositeContract, TypeDecl, TypeRegistry},
};

/// An integer of 1, 2, 4 or 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerType {
    pub width: usize,
    pub signed: bool,
}

impl IntegerType {
    pub fn from_primitive(primitive: Primitive) -> Option<Self> {
        let (width, signed) = match primitive {
            Primitive::U8 => (1, false),
            Primitive::I8 => (1, true),
            Primitive::U16 => (2, false),
            Primitive::I16 => (2, true),
            Primitive::U32 => (4, false),
            Primitive::I32 => (4, true),
            Primitive::U64 => (8, false),
            Primitive::I64 => (8, true),
            _ => return None,
        };

        Some(IntegerType { width, signed })
    }

    /// Rust spelling of the type, e.g. `i32`.
    pub fn rust_name(&self) -> &'static str {
        match (self.width, self.signed) {
            (1, false) => "u8",
            (1, true) => "i8",
            (2, false) => "u16",
            (2, true) => "i16",
            (4, false) => "u32",
            (4, true) => "i32",
            (8, true) => "i64",
            _ => "u64",
        }
    }

    /// Inclusive value range as `i128`.
    pub fn range(&self) -> (i128, i128) {
        let bits = (self.width * 8) as u32;
        if self.signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }
}

/// What a field type means for decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// 2, 4 or 8 byte integer; byte-order sensitive.
    FixedWidthInteger(IntegerType),
    /// Single byte; byte order never applies.
    Byte { signed: bool },
    /// Enum stored as its underlying integer.
    Enum { name: String, underlying: IntegerType },
    /// Nested type with its own decode/encode operations and dynamic width.
    Composite {
        name: String,
        contract: CompositeContract,
    },
}

impl TypeKind {
    /// Byte width when known without reading data.
    pub fn static_width(&self) -> Option<usize> {
        match self {
            TypeKind::FixedWidthInteger(int) => Some(int.width),
            TypeKind::Byte { .. } => Some(1),
            TypeKind::Enum { underlying, .. } => Some(underlying.width),
            TypeKind::Composite { .. } => None,
        }
    }
}

/// A field paired with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    pub name: String,
    pub kind: TypeKind,
}

/// Classifies a single field of `record`.
///
/// A composite is accepted only if its contract offers an operation for every
/// one of `variants`, the codec variants the record will get.
pub fn classify(
    record: &str,
    field: &FieldDescriptor,
    registry: &TypeRegistry,
    variants: &[Variant],
) -> Result<TypeKind, GenerateError> {
    let unsupported = || GenerateError::UnsupportedFieldType {
        record: record.to_string(),
        field: field.name.clone(),
        type_name: field.ty.to_string(),
    };

    match &field.ty {
        TypeRef::Primitive(primitive) => {
            let int = IntegerType::from_primitive(*primitive).ok_or_else(unsupported)?;
            if int.width == 1 {
                Ok(TypeKind::Byte { signed: int.signed })
            } else {
                Ok(TypeKind::FixedWidthInteger(int))
            }
        }
        TypeRef::Named(name) => match registry.get(name) {
            Some(TypeDecl::Enum(decl)) => {
                let underlying = IntegerType::from_primitive(decl.repr).ok_or_else(unsupported)?;
                Ok(TypeKind::Enum {
                    name: decl.name.clone(),
                    underlying,
                })
            }
            Some(TypeDecl::Composite(decl)) if decl.contract.serves(variants) => {
                Ok(TypeKind::Composite {
                    name: decl.name.clone(),
                    contract: decl.contract,
                })
            }
            _ => Err(GenerateError::MissingContract {
                record: record.to_string(),
                field: field.name.clone(),
                type_name: name.clone(),
            }),
        },
        TypeRef::Array { .. } => Err(unsupported()),
    }
}

/// Classifies every field of `schema` in declaration order.
pub fn classify_fields(
    schema: &RecordSchema,
    registry: &TypeRegistry,
    variants: &[Variant],
) -> Result<Vec<ClassifiedField>, GenerateError> {
    schema
        .fields()
        .iter()
        .map(|field| {
            Ok(ClassifiedField {
                name: field.name.clone(),
                kind: classify(schema.name(), field, registry, variants)?,
            })
        })
        .collect()
}
