//! Field descriptors and the type references they declare.

use std::fmt;

/// A single named field of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name of the field; becomes the key in decoded records and the member
    /// name in rendered code.
    pub name: String,
    /// Type the field was declared with, before classification.
    pub ty: TypeRef,
    /// Zero-based position in the record; decode and encode order.
    pub ordinal: usize,
}

/// A declared field type as the front end saw it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A language primitive, supported or not.
    Primitive(Primitive),
    /// A user-declared type: an enum or a composite.
    Named(String),
    /// A fixed-length array. Never classifiable; kept so the front end can
    /// hand it over and get a precise error back.
    Array { element: Box<TypeRef>, len: usize },
}

impl TypeRef {
    pub const U8: TypeRef = TypeRef::Primitive(Primitive::U8);
    pub const I8: TypeRef = TypeRef::Primitive(Primitive::I8);
    pub const U16: TypeRef = TypeRef::Primitive(Primitive::U16);
    pub const I16: TypeRef = TypeRef::Primitive(Primitive::I16);
    pub const U32: TypeRef = TypeRef::Primitive(Primitive::U32);
    pub const I32: TypeRef = TypeRef::Primitive(Primitive::I32);
    pub const U64: TypeRef = TypeRef::Primitive(Primitive::U64);
    pub const I64: TypeRef = TypeRef::Primitive(Primitive::I64);

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn array(element: TypeRef, len: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            len,
        }
    }

    /// Parses a type as written in Rust source: `u32`, `[u8; 16]`, `Header`.
    ///
    /// Anything that is not a primitive or a well-formed array is taken as a
    /// named type; classification decides whether it is usable.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            if let Some((element, len)) = inner.rsplit_once(';') {
                if let Ok(len) = len.trim().parse::<usize>() {
                    return TypeRef::array(TypeRef::parse(element), len);
                }
            }
        }

        match Primitive::from_name(text) {
            Some(primitive) => TypeRef::Primitive(primitive),
            None => TypeRef::Named(text.to_string()),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        TypeRef::parse(value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(primitive) => f.write_str(primitive.name()),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Array { element, len } => write!(f, "[{}; {}]", element, len),
        }
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    Usize,
    Isize,
    F32,
    F64,
    Bool,
    Char,
    Str,
}

impl Primitive {
    const ALL: [Primitive; 17] = [
        Primitive::U8,
        Primitive::I8,
        Primitive::U16,
        Primitive::I16,
        Primitive::U32,
        Primitive::I32,
        Primitive::U64,
        Primitive::I64,
        Primitive::U128,
        Primitive::I128,
        Primitive::Usize,
        Primitive::Isize,
        Primitive::F32,
        Primitive::F64,
        Primitive::Bool,
        Primitive::Char,
        Primitive::Str,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::U8 => "u8",
            Primitive::I8 => "i8",
            Primitive::U16 => "u16",
            Primitive::I16 => "i16",
            Primitive::U32 => "u32",
            Primitive::I32 => "i32",
            Primitive::U64 => "u64",
            Primitive::I64 => "i64",
            Primitive::U128 => "u128",
            Primitive::I128 => "i128",
            Primitive::Usize => "usize",
            Primitive::Isize => "isize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Str => "str",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}
