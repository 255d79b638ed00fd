//! IR dump: human-readable text output for IR ops.
//!
//! Mirrors QEMU's `tcg_dump_ops()` in `tcg/tcg.c`.

use std::fmt::Write as FmtWrite;
use std::io::Write;

use crate::context::Context;
use crate::op::Op;
use crate::opcode::Opcode;
use crate::temp::{TempIdx, TempKind};
use crate::types::{AccType, MemOp, RoundingMode, Type};

/// Format a temp reference for display.
fn fmt_temp(ctx: &Context, idx: TempIdx, buf: &mut String) -> std::fmt::Result {
    let i = idx.0 as usize;
    if i >= ctx.nb_temps() as usize {
        let v = idx.0;
        return write!(buf, "$0x{v:x}");
    }
    let t = ctx.temp(idx);
    match t.kind {
        TempKind::Const => {
            let v = t.val;
            write!(buf, "$0x{v:x}")
        }
        TempKind::Global | TempKind::Fixed => match t.name {
            Some(name) => write!(buf, "{name}"),
            None => write!(buf, "g{i}"),
        },
        TempKind::Ebb => {
            let local = i as u32 - ctx.nb_globals();
            write!(buf, "tmp{local}")
        }
    }
}

fn type_suffix(ty: Type) -> &'static str {
    match ty {
        Type::I8 => "_i8",
        Type::I16 => "_i16",
        Type::I32 => "_i32",
        Type::I64 => "_i64",
    }
}

/// Build the opcode name with type suffix for polymorphic ops.
fn op_name(op: &Op) -> String {
    let def = op.opc.def();
    if op.opc.is_int_polymorphic() {
        let base = def.name;
        let suffix = type_suffix(op.op_type);
        format!("{base}{suffix}")
    } else {
        def.name.to_string()
    }
}

fn memop_name(bits: u32) -> &'static str {
    match MemOp::new(bits as u16).size() {
        MemOp::SIZE_8 => "ub",
        MemOp::SIZE_16 => "uw",
        MemOp::SIZE_32 => "ul",
        _ => "uq",
    }
}

/// Render one op (without trailing newline) into `buf`.
fn fmt_op(ctx: &Context, op: &Op, buf: &mut String) -> std::fmt::Result {
    let name = op_name(op);
    write!(buf, " {name}")?;

    let mut first = true;
    for &a in op.oargs().iter().chain(op.iargs()) {
        buf.push_str(if first { " " } else { ", " });
        first = false;
        fmt_temp(ctx, a, buf)?;
    }

    // Constant args, rendered per opcode
    let sep = if first { " " } else { ", " };
    match op.opc {
        Opcode::GuestLd | Opcode::GuestSt => {
            let mo = memop_name(op.carg(0));
            let acc = AccType::from_raw(op.carg(1)).map_or("???", AccType::name);
            write!(buf, "{sep}{mo}, {acc}")
        }
        Opcode::FpToFixedS
        | Opcode::FpToFixedU
        | Opcode::FixedToFpS
        | Opcode::FixedToFpU => {
            let fbits = op.carg(0);
            let rm = RoundingMode::from_raw(op.carg(1))
                .map_or("???", RoundingMode::name);
            write!(buf, "{sep}fbits={fbits}, {rm}")
        }
        Opcode::Ld | Opcode::St => {
            let off = op.carg(0);
            write!(buf, "{sep}$0x{off:x}")
        }
        _ => {
            let mut sep = sep;
            for c in op.cargs() {
                let v = c.0;
                write!(buf, "{sep}$0x{v:x}")?;
                sep = ", ";
            }
            Ok(())
        }
    }
}

/// Dump all IR ops in `ctx` to the given writer.
///
/// Output format mirrors QEMU's `tcg_dump_ops()`.
pub fn dump_ops(ctx: &Context, w: &mut impl Write) -> std::io::Result<()> {
    dump_ops_with(ctx, w, |_, _| Ok(()))
}

/// Dump IR ops with an annotation callback for `InsnStart`.
///
/// `insn_anno` is called at each guest instruction boundary with
/// `(pc, writer)`; use it to print the raw instruction word on the
/// `---- 0x...` header line.
pub fn dump_ops_with(
    ctx: &Context,
    w: &mut impl Write,
    insn_anno: impl Fn(u64, &mut dyn Write) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let mut buf = String::with_capacity(128);

    for op in ctx.ops() {
        if op.opc == Opcode::InsnStart {
            let lo = op.carg(0) as u64;
            let hi = op.carg(1) as u64;
            let pc = (hi << 32) | lo;
            write!(w, " ---- 0x{pc:016x}")?;
            insn_anno(pc, w)?;
            writeln!(w)?;
            writeln!(w, " insn_start $0x{pc:x}")?;
            continue;
        }

        buf.clear();
        // Writing into a String cannot fail.
        let _ = fmt_op(ctx, op, &mut buf);
        writeln!(w, "{buf}")?;
    }
    Ok(())
}

/// Render the whole op list as a `String`.
pub fn dump_to_string(ctx: &Context) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = dump_ops(ctx, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}
