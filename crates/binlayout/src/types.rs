//! Named types a record can refer to: enums and composites.
//!
//! The classifier never inspects user types itself; it asks a [TypeRegistry]
//! what a name stands for and which decode/encode operations it offers.

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    endian::{ByteOrder, Variant},
    errors::CodecError,
    field::Primitive,
    value::Value,
};

/// A fieldless enum stored as its underlying integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    /// Underlying representation, e.g. `i32` for `#[repr(i32)]`.
    pub repr: Primitive,
    /// Declared variants. Several names may share one discriminant; the first
    /// one declared wins when decoding.
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    pub value: i128,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>, repr: Primitive) -> Self {
        EnumDecl {
            name: name.into(),
            repr,
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>, value: i128) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value,
        });
        self
    }

    pub fn name_of(&self, value: i128) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.name.as_str())
    }

    pub fn value_of(&self, name: &str) -> Option<i128> {
        self.variants.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

/// A concrete decode/encode pair offered by a composite type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `decode` / `encode`, byte-order agnostic.
    Generic,
    /// `decode_little_endian` / `encode_little_endian` and the big-endian pair.
    Ordered(ByteOrder),
}

impl Operation {
    /// Operation name built from `base`, e.g. `decode_big_endian`.
    pub fn name(&self, base: &str) -> String {
        match self {
            Operation::Generic => base.to_string(),
            Operation::Ordered(order) => format!("{}{}", base, order.suffix()),
        }
    }
}

/// Which decode/encode pairs a composite type exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeContract {
    pub generic: bool,
    pub little_endian: bool,
    pub big_endian: bool,
}

impl CompositeContract {
    /// Only the byte-order agnostic pair.
    pub const GENERIC: CompositeContract = CompositeContract {
        generic: true,
        little_endian: false,
        big_endian: false,
    };

    /// Both suffixed pairs, no generic one.
    pub const ORDERED: CompositeContract = CompositeContract {
        generic: false,
        little_endian: true,
        big_endian: true,
    };

    pub fn offers(&self, operation: Operation) -> bool {
        match operation {
            Operation::Generic => self.generic,
            Operation::Ordered(ByteOrder::Little) => self.little_endian,
            Operation::Ordered(ByteOrder::Big) => self.big_endian,
        }
    }

    /// True when every one of `variants` can select an operation from this
    /// contract.
    pub fn serves(&self, variants: &[Variant]) -> bool {
        variants.iter().all(|v| self.select(*v).is_some())
    }

    /// Picks the operation a codec variant calls.
    ///
    /// Suffixed variants take the matching suffixed pair over the generic one;
    /// unsuffixed variants take the generic pair, falling back to the pair
    /// matching their byte order.
    pub fn select(&self, variant: Variant) -> Option<Operation> {
        let ordered = Operation::Ordered(variant.order);
        let preference = if variant.suffixed {
            [ordered, Operation::Generic]
        } else {
            [Operation::Generic, ordered]
        };

        preference.into_iter().find(|op| self.offers(*op))
    }
}

/// Runtime implementation of a composite type, used by the interpreter.
pub trait CompositeCodec: fmt::Debug + Send + Sync {
    /// Operation pairs this codec implements.
    fn contract(&self) -> CompositeContract;

    /// Decodes a value from the start of `buffer`, returning it with the
    /// number of bytes consumed.
    fn decode(&self, operation: Operation, buffer: &[u8]) -> Result<(Value, usize), CodecError>;

    /// Encodes `value` at the start of `buffer`, returning the bytes written.
    fn encode(
        &self,
        operation: Operation,
        value: &Value,
        buffer: &mut [u8],
    ) -> Result<usize, CodecError>;
}

/// A composite type: its contract and, when running codecs directly, its
/// implementation.
#[derive(Debug, Clone)]
pub struct CompositeDecl {
    pub name: String,
    pub contract: CompositeContract,
    pub codec: Option<Arc<dyn CompositeCodec>>,
}

#[derive(Debug, Clone)]
pub enum TypeDecl {
    Enum(EnumDecl),
    Composite(CompositeDecl),
}

/// Named types visible to the classifier.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDecl>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_enum(&mut self, decl: EnumDecl) -> &mut Self {
        self.types.insert(decl.name.clone(), TypeDecl::Enum(decl));
        self
    }

    /// Declares a composite by contract only; enough to generate and render
    /// codecs, not to run them.
    pub fn declare_composite(
        &mut self,
        name: impl Into<String>,
        contract: CompositeContract,
    ) -> &mut Self {
        let name = name.into();
        self.types.insert(
            name.clone(),
            TypeDecl::Composite(CompositeDecl {
                name,
                contract,
                codec: None,
            }),
        );
        self
    }

    /// Registers a runtime composite; its contract is taken from the codec.
    pub fn register_composite(
        &mut self,
        name: impl Into<String>,
        codec: Arc<dyn CompositeCodec>,
    ) -> &mut Self {
        let name = name.into();
        self.types.insert(
            name.clone(),
            TypeDecl::Composite(CompositeDecl {
                name,
                contract: codec.contract(),
                codec: Some(codec),
            }),
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_variant_prefers_ordered_pair() {
        let contract = CompositeContract {
            generic: true,
            little_endian: true,
            big_endian: true,
        };
        assert_eq!(
            contract.select(Variant::suffixed(ByteOrder::Big)),
            Some(Operation::Ordered(ByteOrder::Big))
        );
        assert_eq!(
            contract.select(Variant::unsuffixed(ByteOrder::Big)),
            Some(Operation::Generic)
        );
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(
            CompositeContract::GENERIC.select(Variant::suffixed(ByteOrder::Little)),
            Some(Operation::Generic)
        );
        assert_eq!(
            CompositeContract::ORDERED.select(Variant::unsuffixed(ByteOrder::Little)),
            Some(Operation::Ordered(ByteOrder::Little))
        );
    }

    #[test]
    fn test_contract_serves_variants() {
        let both = [
            Variant::suffixed(ByteOrder::Little),
            Variant::suffixed(ByteOrder::Big),
        ];
        let little = [Variant::unsuffixed(ByteOrder::Little)];
        let little_only = CompositeContract {
            generic: false,
            little_endian: true,
            big_endian: false,
        };

        assert!(CompositeContract::GENERIC.serves(&both));
        assert!(CompositeContract::ORDERED.serves(&both));
        assert!(!CompositeContract::default().serves(&little));
        assert!(little_only.serves(&little));
        assert!(!little_only.serves(&both));
        assert!(!little_only.serves(&[Variant::unsuffixed(ByteOrder::Big)]));
    }

    #[test]
    fn test_enum_lookup_first_wins() {
        let decl = EnumDecl::new("Version", Primitive::I32)
            .variant("Baseline", 0x20001)
            .variant("SupportsExecSegment", 0x20400)
            .variant("HighestVersion", 0x20400);
        assert_eq!(decl.name_of(0x20400), Some("SupportsExecSegment"));
        assert_eq!(decl.value_of("HighestVersion"), Some(0x20400));
        assert_eq!(decl.name_of(7), None);
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Generic.name("encode"), "encode");
        assert_eq!(
            Operation::Ordered(ByteOrder::Little).name("decode"),
            "decode_little_endian"
        );
    }
}
