//! # binlayout
//!
//! Layout planning and codec generation for fixed-layout binary records.
//!
//! Describe a record as an ordered list of typed fields, optionally pinned to
//! one byte order, and binlayout plans where every field lives and emits a
//! decode/encode pair per byte-order variant. Fields are fixed-width
//! integers, bytes, enums stored as integers, or composite types that decode
//! themselves and report how many bytes they used, which makes later offsets
//! depend on run-time lengths.
//!
//! The emitted procedures can be rendered as Rust source ([render]) or run
//! directly against byte buffers ([RecordCodec]).
//!
//! ## Example
//!
//! ```
//! use binlayout::{RecordCodec, RecordSchema, TypeRef, TypeRegistry, Value};
//!
//! let schema = RecordSchema::builder("Simple")
//!     .field("a", TypeRef::U32)
//!     .field("b", TypeRef::I32)
//!     .field("c", TypeRef::I64)
//!     .little_endian()
//!     .build();
//! let codec = RecordCodec::compile(&schema, &TypeRegistry::new()).unwrap();
//!
//! let data = [1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];
//! let (record, read) = codec.decode(&data).unwrap();
//! assert_eq!(read, 16);
//! assert_eq!(record["b"], Value::I64(2));
//! ```

pub mod catalog;
pub mod classify;
pub mod codec;
pub mod emit;
pub mod endian;
pub mod errors;
pub mod field;
pub mod generate;
pub mod layout;
pub mod render;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod types;
pub mod value;
pub mod wire;

pub use catalog::Catalog;
pub use codec::RecordCodec;
pub use emit::Naming;
pub use endian::ByteOrder;
pub use errors::{CodecError, DefinitionError, GenerateError};
pub use generate::{GenerateOptions, GeneratedCodec, generate, generate_all, generate_with};
pub use render::{RenderOptions, render};
pub use schema::{RecordSchema, TypeRef};
pub use types::{CompositeCodec, CompositeContract, EnumDecl, Operation, TypeRegistry};
pub use value::{Record, Value};
