//! Generation driver: schema in, one decode/encode pair per variant out.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    classify::classify_fields,
    emit::{self, CodecIr, Naming},
    endian::{ByteOrder, resolve_variants},
    errors::GenerateError,
    layout, render,
    schema::RecordSchema,
    types::{CompositeContract, TypeRegistry},
};

/// Options applied to every schema of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerateOptions {
    pub naming: Naming,
}

/// All codec variants generated for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCodec {
    pub record: String,
    /// One entry per variant: a single unsuffixed pair, or little-endian then
    /// big-endian.
    pub codecs: Vec<CodecIr>,
}

impl GeneratedCodec {
    /// The contract other records see when they nest this one.
    pub fn contract(&self) -> CompositeContract {
        let mut contract = CompositeContract::default();
        for ir in &self.codecs {
            match (ir.variant.suffixed, ir.variant.order) {
                (false, _) => contract.generic = true,
                (true, ByteOrder::Little) => contract.little_endian = true,
                (true, ByteOrder::Big) => contract.big_endian = true,
            }
        }
        contract
    }
}

/// Generates codecs for `schema` with default options.
pub fn generate(
    schema: &RecordSchema,
    registry: &TypeRegistry,
) -> Result<GeneratedCodec, GenerateError> {
    generate_with(schema, registry, &GenerateOptions::default())
}

pub fn generate_with(
    schema: &RecordSchema,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Result<GeneratedCodec, GenerateError> {
    let result = generate_inner(schema, registry, options);

    match &result {
        Ok(generated) => debug!(
            record = schema.name(),
            variants = generated.codecs.len(),
            "generated codecs"
        ),
        Err(err) => debug!(record = schema.name(), error = %err, "generation rejected"),
    }

    result
}

fn generate_inner(
    schema: &RecordSchema,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Result<GeneratedCodec, GenerateError> {
    if !schema.is_augmentable() {
        return Err(GenerateError::SchemaNotAugmentable {
            record: schema.name().to_string(),
        });
    }

    check_field_names(schema)?;

    let variants = resolve_variants(schema)?;
    let fields = classify_fields(schema, registry, &variants)?;

    let codecs = variants
        .into_iter()
        .map(|variant| {
            layout::plan(schema.name(), &fields, variant)
                .map(|plan| emit::emit(&plan, &options.naming))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedCodec {
        record: schema.name().to_string(),
        codecs,
    })
}

/// Names that cannot be written even as raw identifiers.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED.contains(&name)
}

/// Every name must be an identifier, and no two may share a rendered local.
fn check_field_names(schema: &RecordSchema) -> Result<(), GenerateError> {
    let mut seen = HashSet::with_capacity(schema.fields().len());

    for field in schema.fields() {
        if !is_identifier(&field.name) || !seen.insert(render::local(&field.name)) {
            return Err(GenerateError::InvalidFieldName {
                record: schema.name().to_string(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}

/// Generates every schema independently; a failure affects only its own entry.
pub fn generate_all<'a, I>(
    schemas: I,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Vec<Result<GeneratedCodec, GenerateError>>
where
    I: IntoIterator<Item = &'a RecordSchema>,
{
    schemas
        .into_iter()
        .map(|schema| generate_with(schema, registry, options))
        .collect()
}
