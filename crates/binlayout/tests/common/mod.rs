#![allow(dead_code)]

use std::sync::Arc;

use binlayout::{
    CodecError, CompositeCodec, CompositeContract, EnumDecl, Operation, RecordSchema, TypeRef,
    TypeRegistry, Value, field::Primitive,
};

/// 16-byte null-padded UTF-8 name.
#[derive(Debug)]
pub struct SymbolNameCodec;

impl SymbolNameCodec {
    pub const SIZE: usize = 16;
}

impl CompositeCodec for SymbolNameCodec {
    fn contract(&self) -> CompositeContract {
        CompositeContract::GENERIC
    }

    fn decode(&self, _: Operation, buffer: &[u8]) -> Result<(Value, usize), CodecError> {
        binlayout::wire::require(buffer.len(), Self::SIZE)?;
        let raw = &buffer[..Self::SIZE];
        let end = raw.iter().position(|b| *b == 0).unwrap_or(Self::SIZE);
        let name = String::from_utf8_lossy(&raw[..end]).into_owned();
        Ok((Value::Text(name), Self::SIZE))
    }

    fn encode(&self, _: Operation, value: &Value, buffer: &mut [u8]) -> Result<usize, CodecError> {
        let name = value.as_str().ok_or_else(|| CodecError::TypeMismatch {
            field: "SymbolName".to_string(),
            expected: "text",
        })?;
        binlayout::wire::require(buffer.len(), Self::SIZE)?;
        let bytes = name.as_bytes();
        let len = bytes.len().min(Self::SIZE);
        buffer[..len].copy_from_slice(&bytes[..len]);
        buffer[len..Self::SIZE].fill(0);
        Ok(Self::SIZE)
    }
}

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register_composite("SymbolName", Arc::new(SymbolNameCodec))
        .declare_enum(code_directory_version());
    registry
}

pub fn code_directory_version() -> EnumDecl {
    EnumDecl::new("CodeDirectoryVersion", Primitive::I32)
        .variant("Baseline", 0x20001)
        .variant("SupportsScatter", 0x20100)
        .variant("SupportsTeamId", 0x20200)
        .variant("SupportsCodeLimit64", 0x20300)
        .variant("SupportsExecSegment", 0x20400)
        .variant("SupportsPreEncrypt", 0x20500)
        .variant("HighestVersion", 0x20400)
}

pub fn simple() -> RecordSchema {
    RecordSchema::builder("SimpleBinary")
        .field("a", TypeRef::U32)
        .field("b", TypeRef::I32)
        .field("c", TypeRef::I64)
        .little_endian()
        .build()
}

pub fn nested(little_endian: bool) -> RecordSchema {
    let builder = RecordSchema::builder("NestedBinary")
        .field("symbol_name", TypeRef::named("SymbolName"))
        .field("a", TypeRef::U32)
        .field("b", TypeRef::I32)
        .field("c", TypeRef::I64);

    if little_endian {
        builder.little_endian().build()
    } else {
        builder.build()
    }
}

pub fn code_directory_header() -> RecordSchema {
    [
        ("magic", "u32"),
        ("size", "u32"),
        ("version", "CodeDirectoryVersion"),
        ("flags", "u32"),
        ("hashes_offset", "u32"),
        ("identifier_offset", "u32"),
        ("special_slot_count", "u32"),
        ("code_slot_count", "u32"),
        ("executable_length", "u32"),
        ("hash_size", "u8"),
        ("hash_type", "u8"),
        ("platform", "u8"),
        ("log2_page_size", "u8"),
        ("reserved", "u32"),
    ]
    .into_iter()
    .fold(RecordSchema::builder("CodeDirectoryHeader"), |b, (name, ty)| {
        b.field(name, ty)
    })
    .build()
}

pub const SIMPLE_BYTES: [u8; 16] = [1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];

pub fn nested_bytes() -> Vec<u8> {
    let mut data = vec![b'N', b'M'];
    data.resize(16, 0);
    data.extend_from_slice(&SIMPLE_BYTES);
    data
}
