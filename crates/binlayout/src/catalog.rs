//! A set of compiled records that can nest inside each other.

use std::sync::Arc;

use tracing::debug;

use crate::{
    codec::RecordCodec,
    errors::GenerateError,
    generate::GenerateOptions,
    schema::RecordSchema,
    types::TypeRegistry,
};

/// Records compiled in declaration order.
///
/// Each record that compiles is registered as a composite, so records declared
/// after it can use it as a field type. A failing record is reported in
/// [Catalog::errors] and does not stop the others.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    registry: TypeRegistry,
    codecs: Vec<Arc<RecordCodec>>,
    errors: Vec<GenerateError>,
}

impl Catalog {
    pub fn compile<'a, I>(registry: TypeRegistry, schemas: I) -> Self
    where
        I: IntoIterator<Item = &'a RecordSchema>,
    {
        Self::compile_with(registry, schemas, &GenerateOptions::default())
    }

    pub fn compile_with<'a, I>(
        registry: TypeRegistry,
        schemas: I,
        options: &GenerateOptions,
    ) -> Self
    where
        I: IntoIterator<Item = &'a RecordSchema>,
    {
        let mut catalog = Catalog {
            registry,
            codecs: Vec::new(),
            errors: Vec::new(),
        };

        for schema in schemas {
            catalog.add(schema, options);
        }

        debug!(
            records = catalog.codecs.len(),
            errors = catalog.errors.len(),
            "catalog compiled"
        );

        catalog
    }

    /// Compiles one more record against everything compiled so far.
    pub fn add(&mut self, schema: &RecordSchema, options: &GenerateOptions) -> bool {
        match RecordCodec::compile_with(schema, &self.registry, options) {
            Ok(codec) => {
                let codec = Arc::new(codec);
                self.registry
                    .register_composite(schema.name(), codec.clone());
                self.codecs.push(codec);
                debug!(record = schema.name(), "catalog entry compiled");
                true
            }
            Err(err) => {
                self.errors.push(err);
                false
            }
        }
    }

    pub fn codec(&self, name: &str) -> Option<&RecordCodec> {
        self.codecs
            .iter()
            .find(|codec| codec.name() == name)
            .map(|codec| codec.as_ref())
    }

    /// Names of the compiled records, in declaration order.
    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.codecs.iter().map(|codec| codec.name())
    }

    pub fn errors(&self) -> &[GenerateError] {
        &self.errors
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}
