//! Renders emitted codecs as Rust source.
//!
//! The output is an `impl` block for the record type. It calls into the
//! runtime's [crate::wire] helpers, so every access stays bounds-checked.

use crate::{
    emit::{CodecIr, Direction, FieldStep, Procedure, Stmt},
    generate::GeneratedCodec,
    layout::{FieldAccess, OffsetExpr},
    types::Operation,
};

/// Options for rendered source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Path the generated code uses to reach this crate.
    pub runtime_path: String,
    /// Visibility of the generated functions, e.g. `pub` or `pub(crate)`.
    pub visibility: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            runtime_path: "::binlayout".to_string(),
            visibility: "pub".to_string(),
        }
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Field name as a Rust identifier.
fn ident(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Local holding a decoded field; kept clear of the names the body uses.
pub(crate) fn local(name: &str) -> String {
    let is_length = name
        .strip_prefix("len_")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));

    if name == "buffer" || name == "rest" || is_length {
        format!("{}_", name)
    } else {
        ident(name)
    }
}

fn expr(offset: &OffsetExpr) -> String {
    let vars: Vec<String> = offset.lengths.iter().map(|v| v.ident()).collect();

    match (offset.base, vars.is_empty()) {
        (base, true) => base.to_string(),
        (0, false) => vars.join(" + "),
        (base, false) => format!("{} + {}", base, vars.join(" + ")),
    }
}

/// Renders every variant of `generated` as one `impl` block.
pub fn render(generated: &GeneratedCodec, options: &RenderOptions) -> String {
    let mut out = format!("impl {} {{\n", generated.record);

    for (i, ir) in generated.codecs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_codec(ir, options));
    }

    out.push_str("}\n");
    out
}

/// Renders the decode and encode functions of one variant.
pub fn render_codec(ir: &CodecIr, options: &RenderOptions) -> String {
    let mut out = render_procedure(&ir.decode, options);
    out.push('\n');
    out.push_str(&render_procedure(&ir.encode, options));
    out
}

fn render_procedure(procedure: &Procedure, options: &RenderOptions) -> String {
    let rt = &options.runtime_path;
    let mut out = String::new();

    let signature = match procedure.direction {
        Direction::Decode => format!(
            "    {} fn {}(buffer: &[u8]) -> ::core::result::Result<(Self, usize), {}::CodecError> {{\n",
            options.visibility, procedure.name, rt
        ),
        Direction::Encode => format!(
            "    {} fn {}(&self, buffer: &mut [u8]) -> ::core::result::Result<usize, {}::CodecError> {{\n",
            options.visibility, procedure.name, rt
        ),
    };
    out.push_str(&signature);

    for stmt in &procedure.body {
        let line = match stmt {
            Stmt::Require(needed) => {
                format!("{}::wire::require(buffer.len(), {})?;", rt, expr(needed))
            }
            Stmt::Read(step) => read(step, rt),
            Stmt::Write(step) => write(step, rt),
            Stmt::Construct(fields) => {
                let inits: Vec<String> = fields
                    .iter()
                    .map(|f| {
                        let (field, local) = (ident(f), local(f));
                        if field == local {
                            field
                        } else {
                            format!("{}: {}", field, local)
                        }
                    })
                    .collect();
                if inits.is_empty() {
                    "let result = Self {};".to_string()
                } else {
                    format!("let result = Self {{ {} }};", inits.join(", "))
                }
            }
        };
        out.push_str("        ");
        out.push_str(&line);
        out.push('\n');
    }

    let returns = match procedure.direction {
        Direction::Decode => format!("Ok((result, {}))", expr(&procedure.returns)),
        Direction::Encode => format!("Ok({})", expr(&procedure.returns)),
    };
    out.push_str(&format!("        {}\n    }}\n", returns));
    out
}

fn composite_fn(name: &str, operation: Operation, base: &str) -> String {
    format!("{}::{}", name, operation.name(base))
}

fn read(step: &FieldStep, rt: &str) -> String {
    let local = local(&step.field);
    let at = expr(&step.offset);

    match &step.access {
        FieldAccess::Integer { int, order } => format!(
            "let {} = {}::wire::read::<{}>(buffer, {}, {}::{})?;",
            local,
            rt,
            int.rust_name(),
            at,
            rt,
            order.variant_path()
        ),
        FieldAccess::Byte { signed } => format!(
            "let {} = {}::wire::read::<{}>(buffer, {}, {}::ByteOrder::Little)?;",
            local,
            rt,
            if *signed { "i8" } else { "u8" },
            at,
            rt
        ),
        FieldAccess::Enum {
            name,
            underlying,
            order,
        } => format!(
            "let {} = {}::wire::read_enum::<{}, {}>(buffer, {}, {}::{}, \"{}\")?;",
            local,
            rt,
            name,
            underlying.rust_name(),
            at,
            rt,
            order.variant_path(),
            name
        ),
        FieldAccess::Composite {
            name,
            operation,
            length,
        } => format!(
            "let ({}, {}) = {}::wire::decode_nested(buffer, {}, {})?;",
            local,
            length.ident(),
            rt,
            at,
            composite_fn(name, *operation, "decode")
        ),
    }
}

fn write(step: &FieldStep, rt: &str) -> String {
    let field = ident(&step.field);
    let at = expr(&step.offset);

    match &step.access {
        FieldAccess::Integer { int, order } => format!(
            "{}::wire::write::<{}>(buffer, {}, {}::{}, self.{})?;",
            rt,
            int.rust_name(),
            at,
            rt,
            order.variant_path(),
            field
        ),
        FieldAccess::Byte { signed } => format!(
            "{}::wire::write::<{}>(buffer, {}, {}::ByteOrder::Little, self.{})?;",
            rt,
            if *signed { "i8" } else { "u8" },
            at,
            rt,
            field
        ),
        FieldAccess::Enum {
            underlying, order, ..
        } => format!(
            "{}::wire::write::<{}>(buffer, {}, {}::{}, self.{} as {})?;",
            rt,
            underlying.rust_name(),
            at,
            rt,
            order.variant_path(),
            field,
            underlying.rust_name()
        ),
        FieldAccess::Composite {
            operation, length, ..
        } => format!(
            "let {} = {}::wire::encode_nested(buffer, {}, |rest| self.{}.{}(rest))?;",
            length.ident(),
            rt,
            at,
            field,
            operation.name("encode")
        ),
    }
}
