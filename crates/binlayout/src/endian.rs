//! Byte-order resolution: which codec variants a record gets and how they are named.

use std::fmt;

use crate::{errors::GenerateError, schema::RecordSchema};

/// Byte order applied to multi-byte integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl ByteOrder {
    /// Suffix appended to operation names of suffixed variants.
    pub fn suffix(self) -> &'static str {
        match self {
            ByteOrder::Little => "_little_endian",
            ByteOrder::Big => "_big_endian",
        }
    }

    /// Path of this order inside the runtime crate, as used by rendered code.
    pub fn variant_path(self) -> &'static str {
        match self {
            ByteOrder::Little => "ByteOrder::Little",
            ByteOrder::Big => "ByteOrder::Big",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little-endian"),
            ByteOrder::Big => f.write_str("big-endian"),
        }
    }
}

/// One generated decode/encode pair: the byte order it applies and whether
/// its operation names carry the order suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    pub order: ByteOrder,
    pub suffixed: bool,
}

impl Variant {
    pub fn unsuffixed(order: ByteOrder) -> Self {
        Variant {
            order,
            suffixed: false,
        }
    }

    pub fn suffixed(order: ByteOrder) -> Self {
        Variant {
            order,
            suffixed: true,
        }
    }

    /// `base` with this variant's suffix, e.g. `decode_big_endian`.
    pub fn operation_name(&self, base: &str) -> String {
        if self.suffixed {
            format!("{}{}", base, self.order.suffix())
        } else {
            base.to_string()
        }
    }
}

/// Resolves the variants to generate from the record's byte-order directives.
///
/// One directive yields a single unsuffixed variant, none yields a suffixed
/// little-endian and big-endian pair, both is rejected.
pub fn resolve_variants(schema: &RecordSchema) -> Result<Vec<Variant>, GenerateError> {
    let directives = schema.directives();

    match (directives.little_endian, directives.big_endian) {
        (true, true) => Err(GenerateError::AmbiguousEndianness {
            record: schema.name().to_string(),
        }),
        (true, false) => Ok(vec![Variant::unsuffixed(ByteOrder::Little)]),
        (false, true) => Ok(vec![Variant::unsuffixed(ByteOrder::Big)]),
        (false, false) => Ok(vec![
            Variant::suffixed(ByteOrder::Little),
            Variant::suffixed(ByteOrder::Big),
        ]),
    }
}
