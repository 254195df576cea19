//! JSON-deserializable record and enum descriptions.
//!
//! These types describe records the way a schema file would: field names with
//! their type as written in Rust source, plus the enums those fields refer to.
//! A [BundleDef] converts into a [Catalog] (or into the raw
//! [TypeRegistry]/[RecordSchema] parts) ready to decode and encode.
//!
//! ```json
//! {
//!   "enums": [
//!     { "name": "Version", "repr": "i32",
//!       "variants": [{ "name": "Baseline", "value": 131073 }] }
//!   ],
//!   "records": [
//!     { "name": "Header", "big_endian": true,
//!       "fields": [{ "name": "version", "type": "Version" },
//!                  { "name": "flags", "type": "u32" }] }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    errors::DefinitionError,
    field::{Primitive, TypeRef},
    generate::GenerateOptions,
    schema::{Directives, RecordSchema},
    types::{EnumDecl, TypeRegistry},
};

/// Top-level definition: enums first, then records in declaration order.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct BundleDef {
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub records: Vec<RecordDef>,
    /// Base names of the generated operations.
    #[serde(default)]
    pub options: GenerateOptions,
}

/// A record and its byte-order directives.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecordDef {
    pub name: String,
    #[serde(default)]
    pub little_endian: bool,
    #[serde(default)]
    pub big_endian: bool,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    pub name: String,
    /// Type as written in Rust source: `u32`, `Version`, `[u8; 16]`.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A fieldless enum and its underlying integer type.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnumDef {
    pub name: String,
    /// Underlying representation, e.g. `"u16"`.
    pub repr: String,
    pub variants: Vec<EnumVariantDef>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnumVariantDef {
    pub name: String,
    pub value: i64,
}

impl TryFrom<EnumDef> for EnumDecl {
    type Error = DefinitionError;

    fn try_from(def: EnumDef) -> Result<Self, Self::Error> {
        let repr =
            Primitive::from_name(def.repr.trim()).ok_or_else(|| DefinitionError::UnknownEnumRepr {
                name: def.name.clone(),
                repr: def.repr.clone(),
            })?;

        Ok(def
            .variants
            .into_iter()
            .fold(EnumDecl::new(def.name, repr), |decl, v| {
                decl.variant(v.name, i128::from(v.value))
            }))
    }
}

impl From<RecordDef> for RecordSchema {
    fn from(def: RecordDef) -> Self {
        def.fields
            .into_iter()
            .fold(RecordSchema::builder(def.name), |builder, field| {
                builder.field(field.name, TypeRef::parse(&field.ty))
            })
            .directives(Directives {
                little_endian: def.little_endian,
                big_endian: def.big_endian,
            })
            .build()
    }
}

impl BundleDef {
    /// Splits the bundle into a registry holding its enums and the record
    /// schemas, in declaration order.
    pub fn into_parts(self) -> Result<(TypeRegistry, Vec<RecordSchema>), DefinitionError> {
        let mut names = HashSet::new();
        let declared = self
            .enums
            .iter()
            .map(|e| &e.name)
            .chain(self.records.iter().map(|r| &r.name));
        for name in declared {
            if !names.insert(name.as_str()) {
                return Err(DefinitionError::DuplicateType(name.clone()));
            }
        }

        let mut registry = TypeRegistry::new();
        for def in self.enums {
            registry.declare_enum(EnumDecl::try_from(def)?);
        }

        let schemas = self.records.into_iter().map(RecordSchema::from).collect();

        Ok((registry, schemas))
    }
}

impl TryFrom<BundleDef> for Catalog {
    type Error = DefinitionError;

    /// Record-level generation failures do not fail the conversion; they are
    /// reported through [Catalog::errors].
    fn try_from(def: BundleDef) -> Result<Self, Self::Error> {
        let options = def.options.clone();
        let (registry, schemas) = def.into_parts()?;
        Ok(Catalog::compile_with(registry, &schemas, &options))
    }
}
