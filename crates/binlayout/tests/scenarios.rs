mod common;

use binlayout::{
    ByteOrder, Catalog, CodecError, GenerateError, Operation, RecordCodec, RecordSchema, TypeRef,
    TypeRegistry, Value, generate,
};
use common::*;

#[test]
fn test_simple_little_endian() {
    let codec = RecordCodec::compile(&simple(), &registry()).unwrap();

    let (decoded, read) = codec.decode(&SIMPLE_BYTES).unwrap();
    assert_eq!(read, 16);
    assert_eq!(decoded["a"], Value::U64(1));
    assert_eq!(decoded["b"], Value::I64(2));
    assert_eq!(decoded["c"], Value::I64(4));

    let mut buffer = [0u8; 16];
    assert_eq!(codec.encode(&decoded, &mut buffer).unwrap(), 16);
    assert_eq!(buffer, SIMPLE_BYTES);
}

#[test]
fn test_nested_composite() {
    let codec = RecordCodec::compile(&nested(true), &registry()).unwrap();
    let input = nested_bytes();

    let (decoded, read) = codec.decode(&input).unwrap();
    assert_eq!(read, 32);
    assert_eq!(decoded["symbol_name"], Value::Text("NM".to_string()));
    assert_eq!(decoded["a"], Value::U64(1));
    assert_eq!(decoded["b"], Value::I64(2));
    assert_eq!(decoded["c"], Value::I64(4));

    let mut buffer = [0u8; 100];
    let written = codec.encode(&decoded, &mut buffer).unwrap();
    assert_eq!(written, read);
    assert_eq!(&buffer[..written], input.as_slice());
}

#[test]
fn test_nested_without_directive_has_both_orders() {
    let codec = RecordCodec::compile(&nested(false), &registry()).unwrap();

    let names: Vec<String> = codec
        .generated()
        .codecs
        .iter()
        .map(|ir| ir.decode.name.clone())
        .collect();
    assert_eq!(names, vec!["decode_little_endian", "decode_big_endian"]);
    assert!(matches!(
        codec.decode(&nested_bytes()),
        Err(CodecError::UnsupportedOperation { .. })
    ));

    let (little, _) = codec.decode_little_endian(&nested_bytes()).unwrap();
    let mut little_bytes = [0u8; 32];
    assert_eq!(codec.encode_little_endian(&little, &mut little_bytes).unwrap(), 32);
    assert_eq!(little_bytes.as_slice(), nested_bytes().as_slice());

    let mut big_bytes = [0u8; 32];
    assert_eq!(codec.encode_big_endian(&little, &mut big_bytes).unwrap(), 32);
    assert_eq!(&big_bytes[16..20], &[0, 0, 0, 1]);

    let (big, read) = codec.decode_big_endian(&big_bytes).unwrap();
    assert_eq!(read, 32);
    assert_eq!(big, little);

    let mut again = [0u8; 32];
    codec.encode_big_endian(&big, &mut again).unwrap();
    assert_eq!(again, big_bytes);

    let (misread, _) = codec.decode_little_endian(&big_bytes).unwrap();
    assert_eq!(misread["symbol_name"], Value::Text("NM".to_string()));
    assert_eq!(misread["a"], Value::U64(0x0100_0000));
    assert_ne!(misread["c"], little["c"]);
}

#[test]
fn test_code_directory_header() {
    let codec = RecordCodec::compile(&code_directory_header(), &registry()).unwrap();
    assert_eq!(codec.generated().codecs[0].static_size, 44);

    let mut data = Vec::new();
    for word in [0xFADE_0C02u32, 44] {
        data.extend_from_slice(&word.to_be_bytes());
    }
    data.extend_from_slice(&0x20400i32.to_be_bytes());
    for word in [0u32, 0x58, 0x30, 2, 5, 0x1000] {
        data.extend_from_slice(&word.to_be_bytes());
    }
    data.extend_from_slice(&[32, 2, 0, 12]);
    data.extend_from_slice(&0u32.to_be_bytes());

    let (decoded, read) = codec.decode_big_endian(&data).unwrap();
    assert_eq!(read, 44);
    assert_eq!(decoded["magic"], Value::U64(0xFADE_0C02));
    assert_eq!(
        decoded["version"],
        Value::Enum("SupportsExecSegment".to_string())
    );
    assert_eq!(decoded["log2_page_size"], Value::U64(12));

    let mut values = decoded.clone();
    values.insert(
        "version".to_string(),
        Value::Enum("HighestVersion".to_string()),
    );
    let mut buffer = [0u8; 44];
    codec.encode_big_endian(&values, &mut buffer).unwrap();
    assert_eq!(buffer.as_slice(), data.as_slice());

    data[8..12].copy_from_slice(&0x30000i32.to_be_bytes());
    assert_eq!(
        codec.decode_big_endian(&data).unwrap_err(),
        CodecError::InvalidEnumValue {
            type_name: "CodeDirectoryVersion".to_string(),
            value: 0x30000
        }
    );
}

#[test]
fn test_ambiguous_endianness_rejected() {
    let schema = RecordSchema::builder("Both")
        .field("a", TypeRef::U32)
        .little_endian()
        .big_endian()
        .build();
    assert_eq!(
        generate(&schema, &registry()).unwrap_err(),
        GenerateError::AmbiguousEndianness {
            record: "Both".to_string()
        }
    );
}

#[test]
fn test_unsupported_and_missing_types() {
    let floats = RecordSchema::builder("Floats")
        .field("x", TypeRef::parse("f32"))
        .build();
    assert!(matches!(
        generate(&floats, &registry()),
        Err(GenerateError::UnsupportedFieldType { ref field, .. }) if field == "x"
    ));

    let mut registry = TypeRegistry::new();
    registry.declare_composite("Opaque", Default::default());
    let opaque = RecordSchema::builder("Holder")
        .field("o", TypeRef::named("Opaque"))
        .build();
    assert!(matches!(
        generate(&opaque, &registry),
        Err(GenerateError::MissingContract { .. })
    ));
}

#[test]
fn test_truncated_nested_input() {
    let codec = RecordCodec::compile(&nested(true), &registry()).unwrap();
    let input = nested_bytes();

    assert_eq!(
        codec.decode(&input[..20]).unwrap_err(),
        CodecError::BufferTooSmall {
            needed: 32,
            available: 20
        }
    );
    assert_eq!(
        codec.decode(&input[..10]).unwrap_err(),
        CodecError::BufferTooSmall {
            needed: 16,
            available: 10
        }
    );
}

#[test]
fn test_catalog_nests_compiled_records() {
    let outer = RecordSchema::builder("Pair")
        .field("first", TypeRef::named("SimpleBinary"))
        .field("second", TypeRef::named("SimpleBinary"))
        .little_endian()
        .build();
    let schemas = vec![simple(), outer];
    let catalog = Catalog::compile(registry(), &schemas);
    assert!(catalog.errors().is_empty());

    let pair = catalog.codec("Pair").unwrap();
    let mut data = SIMPLE_BYTES.to_vec();
    data.extend_from_slice(&SIMPLE_BYTES);

    let (decoded, read) = pair.decode_with(Operation::Generic, &data).unwrap();
    assert_eq!(read, 32);
    assert_eq!(decoded["first"], decoded["second"]);

    assert!(matches!(
        pair.decode_with(Operation::Ordered(ByteOrder::Big), &data),
        Err(CodecError::UnsupportedOperation { .. })
    ));
}
