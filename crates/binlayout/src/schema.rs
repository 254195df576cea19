//! Record schema: the normalized, immutable description of one composite type.

pub use crate::field::{FieldDescriptor, Primitive, TypeRef};

/// Byte-order directives attached to a record declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directives {
    pub little_endian: bool,
    pub big_endian: bool,
}

/// A record to generate codecs for. Build one with [RecordSchema::builder].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    directives: Directives,
    augmentable: bool,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            directives: Directives::default(),
            augmentable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn directives(&self) -> Directives {
        self.directives
    }

    /// Whether the target type can receive generated members at all.
    pub fn is_augmentable(&self) -> bool {
        self.augmentable
    }
}

/// Builder for [RecordSchema]; assigns ordinals in call order.
#[derive(Debug, Clone)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    directives: Directives,
    augmentable: bool,
}

impl RecordSchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        let ordinal = self.fields.len();
        self.fields.push(FieldDescriptor {
            name: name.into(),
            ty: ty.into(),
            ordinal,
        });
        self
    }

    pub fn little_endian(mut self) -> Self {
        self.directives.little_endian = true;
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.directives.big_endian = true;
        self
    }

    pub fn directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Marks the target as closed for extension (e.g. a foreign type).
    pub fn augmentable(mut self, augmentable: bool) -> Self {
        self.augmentable = augmentable;
        self
    }

    pub fn build(self) -> RecordSchema {
        RecordSchema {
            name: self.name,
            fields: self.fields,
            directives: self.directives,
            augmentable: self.augmentable,
        }
    }
}
