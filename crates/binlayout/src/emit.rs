//! Codec emission: turns a [LayoutPlan] into decode and encode procedures.
//!
//! Procedures are a flat list of [Stmt]s rather than source text. The
//! [crate::render] module prints them as Rust, [crate::codec] runs them.

use crate::{
    endian::Variant,
    layout::{FieldAccess, LayoutPlan, OffsetExpr, PlannedField, Width},
};

/// Base names of the generated operations; variants append their suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Naming {
    pub decode: String,
    pub encode: String,
}

impl Default for Naming {
    fn default() -> Self {
        Naming {
            decode: "decode".to_string(),
            encode: "encode".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decode,
    Encode,
}

/// One field access at a planned offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStep {
    pub field: String,
    pub access: FieldAccess,
    pub offset: OffsetExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Fail with `BufferTooSmall` unless the buffer holds this many bytes.
    Require(OffsetExpr),
    /// Decode a field into a local; composites also bind their length.
    Read(FieldStep),
    /// Encode a field from the instance; composites also bind their length.
    Write(FieldStep),
    /// Build the record from every decoded local at once.
    Construct(Vec<String>),
}

/// A decode or encode procedure. Both return `returns` bytes on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub name: String,
    pub direction: Direction,
    pub body: Vec<Stmt>,
    pub returns: OffsetExpr,
}

/// Decode/encode pair for one record and one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecIr {
    pub record: String,
    pub variant: Variant,
    /// Lower bound on the encoded size.
    pub static_size: usize,
    pub decode: Procedure,
    pub encode: Procedure,
}

/// Emits the decode/encode pair for `plan`.
pub fn emit(plan: &LayoutPlan, naming: &Naming) -> CodecIr {
    CodecIr {
        record: plan.record.clone(),
        variant: plan.variant,
        static_size: plan.static_size(),
        decode: procedure(plan, Direction::Decode, &plan.variant.operation_name(&naming.decode)),
        encode: procedure(plan, Direction::Encode, &plan.variant.operation_name(&naming.encode)),
    }
}

/// Builds one procedure. Both directions walk the same plan and place the
/// same `Require`s: one for every static byte up front, then one after each
/// composite covering everything known at that point.
fn procedure(plan: &LayoutPlan, direction: Direction, name: &str) -> Procedure {
    let static_size = plan.static_size();
    let mut body = Vec::with_capacity(plan.fields.len() * 2 + 2);
    let mut known = OffsetExpr::constant(static_size);

    body.push(Stmt::Require(known.clone()));

    for field in &plan.fields {
        let step = step(field);
        body.push(match direction {
            Direction::Decode => Stmt::Read(step),
            Direction::Encode => Stmt::Write(step),
        });

        if let Width::Dynamic(length) = field.width {
            known.lengths.push(length);
            body.push(Stmt::Require(known.clone()));
        }
    }

    if direction == Direction::Decode {
        body.push(Stmt::Construct(
            plan.fields.iter().map(|f| f.name.clone()).collect(),
        ));
    }

    Procedure {
        name: name.to_string(),
        direction,
        body,
        returns: plan.total.clone(),
    }
}

fn step(field: &PlannedField) -> FieldStep {
    FieldStep {
        field: field.name.clone(),
        access: field.access.clone(),
        offset: field.offset.clone(),
    }
}
