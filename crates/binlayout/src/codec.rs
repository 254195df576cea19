//! Interpreter for generated codecs.
//!
//! A [RecordCodec] runs the emitted procedures directly against caller
//! buffers, producing and consuming dynamic [Record]s. It follows exactly the
//! statements the renderer prints, so rendered and interpreted codecs agree
//! byte for byte.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    classify::IntegerType,
    emit::{CodecIr, FieldStep, Stmt},
    endian::ByteOrder,
    errors::{CodecError, GenerateError},
    field::TypeRef,
    generate::{GenerateOptions, GeneratedCodec, generate_with},
    layout::FieldAccess,
    schema::RecordSchema,
    types::{CompositeCodec, CompositeContract, EnumDecl, Operation, TypeDecl, TypeRegistry},
    value::{Record, Value},
    wire,
};

/// Generated codecs for one record, bound to their runtime collaborators.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    generated: GeneratedCodec,
    enums: BTreeMap<String, EnumDecl>,
    composites: BTreeMap<String, Arc<dyn CompositeCodec>>,
}

impl RecordCodec {
    /// Generates codecs for `schema` and binds every enum and composite it
    /// refers to.
    pub fn compile(schema: &RecordSchema, registry: &TypeRegistry) -> Result<Self, GenerateError> {
        Self::compile_with(schema, registry, &GenerateOptions::default())
    }

    pub fn compile_with(
        schema: &RecordSchema,
        registry: &TypeRegistry,
        options: &GenerateOptions,
    ) -> Result<Self, GenerateError> {
        let generated = generate_with(schema, registry, options)?;
        let mut enums = BTreeMap::new();
        let mut composites = BTreeMap::new();

        for field in schema.fields() {
            let TypeRef::Named(name) = &field.ty else {
                continue;
            };

            match registry.get(name) {
                Some(TypeDecl::Enum(decl)) => {
                    enums.insert(name.clone(), decl.clone());
                }
                Some(TypeDecl::Composite(decl)) => {
                    let codec = decl.codec.clone().ok_or_else(|| GenerateError::UnboundComposite {
                        record: schema.name().to_string(),
                        field: field.name.clone(),
                        type_name: name.clone(),
                    })?;
                    composites.insert(name.clone(), codec);
                }
                None => {}
            }
        }

        Ok(RecordCodec {
            generated,
            enums,
            composites,
        })
    }

    pub fn name(&self) -> &str {
        &self.generated.record
    }

    pub fn generated(&self) -> &GeneratedCodec {
        &self.generated
    }

    fn ir(&self, operation: Operation) -> Option<&CodecIr> {
        self.generated.codecs.iter().find(|ir| match operation {
            Operation::Generic => !ir.variant.suffixed,
            Operation::Ordered(order) => ir.variant.suffixed && ir.variant.order == order,
        })
    }

    fn ir_or_err(&self, operation: Operation, base: &str) -> Result<&CodecIr, CodecError> {
        self.ir(operation)
            .ok_or_else(|| CodecError::UnsupportedOperation {
                record: self.name().to_string(),
                operation: operation.name(base),
            })
    }

    /// Decodes with the unsuffixed variant (records with one directive).
    pub fn decode(&self, buffer: &[u8]) -> Result<(Record, usize), CodecError> {
        self.decode_with(Operation::Generic, buffer)
    }

    pub fn decode_little_endian(&self, buffer: &[u8]) -> Result<(Record, usize), CodecError> {
        self.decode_with(Operation::Ordered(ByteOrder::Little), buffer)
    }

    pub fn decode_big_endian(&self, buffer: &[u8]) -> Result<(Record, usize), CodecError> {
        self.decode_with(Operation::Ordered(ByteOrder::Big), buffer)
    }

    pub fn decode_with(
        &self,
        operation: Operation,
        buffer: &[u8],
    ) -> Result<(Record, usize), CodecError> {
        let ir = self.ir_or_err(operation, "decode")?;
        let mut lengths = Vec::with_capacity(ir.decode.returns.lengths.len());
        let mut locals: Vec<(String, Value)> = Vec::with_capacity(ir.decode.body.len());
        let mut record = Record::new();

        for stmt in &ir.decode.body {
            match stmt {
                Stmt::Require(expr) => wire::require(buffer.len(), expr.eval(&lengths))?,
                Stmt::Read(step) => {
                    let value = self.read_field(step, buffer, &mut lengths)?;
                    locals.push((step.field.clone(), value));
                }
                Stmt::Construct(_) => record = locals.drain(..).collect(),
                Stmt::Write(_) => {}
            }
        }

        Ok((record, ir.decode.returns.eval(&lengths)))
    }

    /// Encodes with the unsuffixed variant (records with one directive).
    pub fn encode(&self, record: &Record, buffer: &mut [u8]) -> Result<usize, CodecError> {
        self.encode_with(Operation::Generic, record, buffer)
    }

    pub fn encode_little_endian(
        &self,
        record: &Record,
        buffer: &mut [u8],
    ) -> Result<usize, CodecError> {
        self.encode_with(Operation::Ordered(ByteOrder::Little), record, buffer)
    }

    pub fn encode_big_endian(
        &self,
        record: &Record,
        buffer: &mut [u8],
    ) -> Result<usize, CodecError> {
        self.encode_with(Operation::Ordered(ByteOrder::Big), record, buffer)
    }

    pub fn encode_with(
        &self,
        operation: Operation,
        record: &Record,
        buffer: &mut [u8],
    ) -> Result<usize, CodecError> {
        let ir = self.ir_or_err(operation, "encode")?;
        let mut lengths = Vec::with_capacity(ir.encode.returns.lengths.len());

        for stmt in &ir.encode.body {
            match stmt {
                Stmt::Require(expr) => wire::require(buffer.len(), expr.eval(&lengths))?,
                Stmt::Write(step) => {
                    let value = record
                        .get(&step.field)
                        .ok_or_else(|| CodecError::MissingField(step.field.clone()))?;
                    self.write_field(step, value, buffer, &mut lengths)?;
                }
                Stmt::Read(_) | Stmt::Construct(_) => {}
            }
        }

        Ok(ir.encode.returns.eval(&lengths))
    }

    fn read_field(
        &self,
        step: &FieldStep,
        buffer: &[u8],
        lengths: &mut Vec<usize>,
    ) -> Result<Value, CodecError> {
        let offset = step.offset.eval(lengths);

        match &step.access {
            FieldAccess::Integer { int, order } => {
                let raw = wire::read_uint(buffer, offset, int.width, *order)?;
                Ok(integer_value(raw, *int))
            }
            FieldAccess::Byte { signed } => {
                let raw = wire::read_uint(buffer, offset, 1, ByteOrder::Little)?;
                Ok(integer_value(raw, IntegerType { width: 1, signed: *signed }))
            }
            FieldAccess::Enum {
                name,
                underlying,
                order,
            } => {
                let raw = wire::read_uint(buffer, offset, underlying.width, *order)?;
                let value = integer_value(raw, *underlying)
                    .as_integer()
                    .unwrap_or_default();
                self.enum_decl(name)?
                    .name_of(value)
                    .map(|variant| Value::Enum(variant.to_string()))
                    .ok_or_else(|| CodecError::InvalidEnumValue {
                        type_name: name.clone(),
                        value,
                    })
            }
            FieldAccess::Composite {
                name, operation, ..
            } => {
                let codec = self.composite(name, *operation, "decode")?;
                let (value, consumed) =
                    wire::decode_nested(buffer, offset, |rest| codec.decode(*operation, rest))?;
                lengths.push(consumed);
                Ok(value)
            }
        }
    }

    fn write_field(
        &self,
        step: &FieldStep,
        value: &Value,
        buffer: &mut [u8],
        lengths: &mut Vec<usize>,
    ) -> Result<(), CodecError> {
        let offset = step.offset.eval(lengths);

        match &step.access {
            FieldAccess::Integer { int, order } => {
                let raw = integer_raw(&step.field, value, *int)?;
                wire::write_uint(buffer, offset, int.width, *order, raw)
            }
            FieldAccess::Byte { signed } => {
                let int = IntegerType {
                    width: 1,
                    signed: *signed,
                };
                let raw = integer_raw(&step.field, value, int)?;
                wire::write_uint(buffer, offset, 1, ByteOrder::Little, raw)
            }
            FieldAccess::Enum {
                name,
                underlying,
                order,
            } => {
                let decl = self.enum_decl(name)?;
                let discriminant = match value {
                    Value::Enum(variant) | Value::Text(variant) => {
                        decl.value_of(variant).ok_or_else(|| CodecError::TypeMismatch {
                            field: step.field.clone(),
                            expected: "a declared enum variant",
                        })?
                    }
                    other => {
                        let raw = other.as_integer().ok_or_else(|| CodecError::TypeMismatch {
                            field: step.field.clone(),
                            expected: "an enum variant or discriminant",
                        })?;
                        if decl.name_of(raw).is_none() {
                            return Err(CodecError::InvalidEnumValue {
                                type_name: name.clone(),
                                value: raw,
                            });
                        }
                        raw
                    }
                };
                let raw = checked_raw(&step.field, discriminant, *underlying)?;
                wire::write_uint(buffer, offset, underlying.width, *order, raw)
            }
            FieldAccess::Composite {
                name, operation, ..
            } => {
                let codec = self.composite(name, *operation, "encode")?;
                let written = wire::encode_nested(buffer, offset, |rest| {
                    codec.encode(*operation, value, rest)
                })?;
                lengths.push(written);
                Ok(())
            }
        }
    }

    fn enum_decl(&self, name: &str) -> Result<&EnumDecl, CodecError> {
        self.enums
            .get(name)
            .ok_or_else(|| CodecError::UnsupportedOperation {
                record: name.to_string(),
                operation: "enum conversion".to_string(),
            })
    }

    fn composite(
        &self,
        name: &str,
        operation: Operation,
        base: &str,
    ) -> Result<&Arc<dyn CompositeCodec>, CodecError> {
        self.composites
            .get(name)
            .ok_or_else(|| CodecError::UnsupportedOperation {
                record: name.to_string(),
                operation: operation.name(base),
            })
    }
}

fn integer_value(raw: u64, int: IntegerType) -> Value {
    if int.signed {
        Value::I64(wire::sign_extend(raw, int.width * 8))
    } else {
        Value::U64(raw)
    }
}

fn integer_raw(field: &str, value: &Value, int: IntegerType) -> Result<u64, CodecError> {
    let v = value.as_integer().ok_or_else(|| CodecError::TypeMismatch {
        field: field.to_string(),
        expected: "an integer",
    })?;
    checked_raw(field, v, int)
}

fn checked_raw(field: &str, v: i128, int: IntegerType) -> Result<u64, CodecError> {
    let (min, max) = int.range();
    if v < min || v > max {
        return Err(CodecError::ValueOutOfRange {
            field: field.to_string(),
            value: v,
        });
    }

    Ok(v as u64)
}

/// Compiled records nest inside other records like any composite type.
impl CompositeCodec for RecordCodec {
    fn contract(&self) -> CompositeContract {
        self.generated.contract()
    }

    fn decode(&self, operation: Operation, buffer: &[u8]) -> Result<(Value, usize), CodecError> {
        self.decode_with(operation, buffer)
            .map(|(record, consumed)| (Value::Record(record), consumed))
    }

    fn encode(
        &self,
        operation: Operation,
        value: &Value,
        buffer: &mut [u8],
    ) -> Result<usize, CodecError> {
        let record = value.as_record().ok_or_else(|| CodecError::TypeMismatch {
            field: self.name().to_string(),
            expected: "a record",
        })?;
        self.encode_with(operation, record, buffer)
    }
}
