//! Layout planning: per-field offsets and widths for one codec variant.
//!
//! Offsets are a static byte count plus the lengths reported at run time by
//! every composite field that precedes the field. Decode and encode share the
//! same plan, so their offset arithmetic cannot drift apart.

use std::fmt;

use tracing::trace;

use crate::{
    classify::{ClassifiedField, IntegerType, TypeKind},
    endian::{ByteOrder, Variant},
    errors::GenerateError,
    types::Operation,
};

/// Runtime length reported by the n-th composite field (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LengthVar(pub usize);

impl LengthVar {
    /// Identifier used for the variable in rendered code.
    pub fn ident(&self) -> String {
        format!("len_{}", self.0)
    }

    /// Position in a zero-based table of reported lengths.
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

/// `base + len_1 + len_2 + ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OffsetExpr {
    pub base: usize,
    pub lengths: Vec<LengthVar>,
}

impl OffsetExpr {
    pub fn constant(base: usize) -> Self {
        OffsetExpr {
            base,
            lengths: Vec::new(),
        }
    }

    /// True when the value is known without decoding anything.
    pub fn is_static(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Evaluates the expression against the lengths reported so far.
    /// Lengths not reported yet count as zero.
    pub fn eval(&self, reported: &[usize]) -> usize {
        self.lengths.iter().fold(self.base, |acc, var| {
            acc + reported.get(var.index()).copied().unwrap_or(0)
        })
    }
}

impl fmt::Display for OffsetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for var in &self.lengths {
            write!(f, " + {}", var.ident())?;
        }
        Ok(())
    }
}

/// Width a field occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Static(usize),
    /// Known only once the composite at this position has been decoded.
    Dynamic(LengthVar),
}

/// How a planned field is read and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccess {
    Integer {
        int: IntegerType,
        order: ByteOrder,
    },
    Byte {
        signed: bool,
    },
    Enum {
        name: String,
        underlying: IntegerType,
        order: ByteOrder,
    },
    Composite {
        name: String,
        operation: Operation,
        length: LengthVar,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    pub name: String,
    pub access: FieldAccess,
    pub offset: OffsetExpr,
    pub width: Width,
}

/// The ordered field plan of one record for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub record: String,
    pub variant: Variant,
    pub fields: Vec<PlannedField>,
    /// Bytes consumed by the whole record.
    pub total: OffsetExpr,
}

impl LayoutPlan {
    /// Sum of all statically known widths: a lower bound on the record size.
    pub fn static_size(&self) -> usize {
        self.total.base
    }

    /// Number of composite length variables the plan binds.
    pub fn length_vars(&self) -> usize {
        self.total.lengths.len()
    }
}

/// Plans the fields of `record` for `variant`.
///
/// Fails with [GenerateError::MissingContract] when a composite offers no
/// operation for `variant`; fields classified for the same variants never do.
pub fn plan(
    record: &str,
    fields: &[ClassifiedField],
    variant: Variant,
) -> Result<LayoutPlan, GenerateError> {
    let mut offset = 0usize;
    let mut dynamic: Vec<LengthVar> = Vec::new();
    let mut planned = Vec::with_capacity(fields.len());

    for field in fields {
        let at = OffsetExpr {
            base: offset,
            lengths: dynamic.clone(),
        };

        let (access, width) = match &field.kind {
            TypeKind::FixedWidthInteger(int) => (
                FieldAccess::Integer {
                    int: *int,
                    order: variant.order,
                },
                Width::Static(int.width),
            ),
            TypeKind::Byte { signed } => (FieldAccess::Byte { signed: *signed }, Width::Static(1)),
            TypeKind::Enum { name, underlying } => (
                FieldAccess::Enum {
                    name: name.clone(),
                    underlying: *underlying,
                    order: variant.order,
                },
                Width::Static(underlying.width),
            ),
            TypeKind::Composite { name, contract } => {
                let operation = contract.select(variant).ok_or_else(|| {
                    GenerateError::MissingContract {
                        record: record.to_string(),
                        field: field.name.clone(),
                        type_name: name.clone(),
                    }
                })?;
                let length = LengthVar(dynamic.len() + 1);
                dynamic.push(length);
                (
                    FieldAccess::Composite {
                        name: name.clone(),
                        operation,
                        length,
                    },
                    Width::Dynamic(length),
                )
            }
        };

        if let Width::Static(width) = width {
            offset += width;
        }

        trace!(record, field = %field.name, offset = %at, "planned field");

        planned.push(PlannedField {
            name: field.name.clone(),
            access,
            offset: at,
            width,
        });
    }

    Ok(LayoutPlan {
        record: record.to_string(),
        variant,
        fields: planned,
        total: OffsetExpr {
            base: offset,
            lengths: dynamic,
        },
    })
}
