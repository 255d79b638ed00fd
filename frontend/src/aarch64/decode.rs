//! A64 instruction decoder for the supported encoding classes.
//!
//! A flat `(mask, bits)` pattern table in the style of a decodetree
//! output: the first pattern whose fixed bits match selects a
//! `trans_*` method on the [`Decode`] trait, which receives the
//! extracted fields as an argument set.
//!
//! Supported classes:
//!
//! ```text
//! conversion between FP and fixed-point
//!   sf 0 0 11110 type 0 rmode opcode scale Rn Rd
//! load/store register (unprivileged)
//!   size 111 0 00 opc 0 imm9 10 Rn Rt
//! ```

use super::imm::Imm;
use super::types::{Reg, VReg};

// ── Argument sets ────────────────────────────────────────────────

/// FP register to general register, `FCVTZS`/`FCVTZU` (scalar, fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsFpToFix {
    pub sf: bool,
    pub ftype: Imm<2>,
    pub scale: Imm<6>,
    pub vn: VReg,
    pub rd: Reg,
}

/// General register to FP register, `SCVTF`/`UCVTF` (scalar, fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsFixToFp {
    pub sf: bool,
    pub ftype: Imm<2>,
    pub scale: Imm<6>,
    pub rn: Reg,
    pub vd: VReg,
}

/// Unprivileged load/store with the size implied by the mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsLdstUnpriv {
    pub imm9: Imm<9>,
    pub rn: Reg,
    pub rt: Reg,
}

/// `STTR`/`LDTR`: W or X form selected by `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsLdstUnprivSized {
    pub size: Imm<2>,
    pub imm9: Imm<9>,
    pub rn: Reg,
    pub rt: Reg,
}

/// `LDTRSB`/`LDTRSH`: destination width selected by `opc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsLdstUnprivSigned {
    pub opc: Imm<2>,
    pub imm9: Imm<9>,
    pub rn: Reg,
    pub rt: Reg,
}

// ── Decode trait ─────────────────────────────────────────────────

/// Translator callbacks, one per pattern.
///
/// Each returns `true` when the encoding was translated and `false`
/// when the field combination is unallocated. A `false` return must
/// not have emitted any IR.
pub trait Decode<Ir> {
    fn trans_fcvtzs_float_fix(&mut self, ir: &mut Ir, a: &ArgsFpToFix) -> bool;
    fn trans_fcvtzu_float_fix(&mut self, ir: &mut Ir, a: &ArgsFpToFix) -> bool;
    fn trans_scvtf_float_fix(&mut self, ir: &mut Ir, a: &ArgsFixToFp) -> bool;
    fn trans_ucvtf_float_fix(&mut self, ir: &mut Ir, a: &ArgsFixToFp) -> bool;

    fn trans_sttrb(&mut self, ir: &mut Ir, a: &ArgsLdstUnpriv) -> bool;
    fn trans_sttrh(&mut self, ir: &mut Ir, a: &ArgsLdstUnpriv) -> bool;
    fn trans_sttr(&mut self, ir: &mut Ir, a: &ArgsLdstUnprivSized) -> bool;
    fn trans_ldtrb(&mut self, ir: &mut Ir, a: &ArgsLdstUnpriv) -> bool;
    fn trans_ldtrh(&mut self, ir: &mut Ir, a: &ArgsLdstUnpriv) -> bool;
    fn trans_ldtr(&mut self, ir: &mut Ir, a: &ArgsLdstUnprivSized) -> bool;
    fn trans_ldtrsb(&mut self, ir: &mut Ir, a: &ArgsLdstUnprivSigned) -> bool;
    fn trans_ldtrsh(&mut self, ir: &mut Ir, a: &ArgsLdstUnprivSigned) -> bool;
    fn trans_ldtrsw(&mut self, ir: &mut Ir, a: &ArgsLdstUnpriv) -> bool;
}

// ── Pattern table ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsnKind {
    FcvtzsFloatFix,
    FcvtzuFloatFix,
    ScvtfFloatFix,
    UcvtfFloatFix,
    Sttrb,
    Sttrh,
    Sttr,
    Ldtrb,
    Ldtrh,
    Ldtr,
    Ldtrsb,
    Ldtrsh,
    Ldtrsw,
}

#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub name: &'static str,
    pub mask: u32,
    pub bits: u32,
    pub kind: InsnKind,
}

impl Pattern {
    pub const fn matches(&self, insn: u32) -> bool {
        insn & self.mask == self.bits
    }
}

const fn pat(name: &'static str, mask: u32, bits: u32, kind: InsnKind) -> Pattern {
    Pattern {
        name,
        mask,
        bits,
        kind,
    }
}

// Fixed bits: 30:29 = 00, 28:24 = 11110, 21 = 0, rmode, opcode.
const FP_FIX_MASK: u32 = 0x7f3f_0000;
// Fixed bits: 29:24 = 111000, 21 = 0, 11:10 = 10, plus size/opc as
// constrained by each pattern.
const LDST_SIZE_OPC: u32 = 0xffe0_0c00;
const LDST_SIZE_OPC1: u32 = 0xffa0_0c00;
const LDST_SIZE1_OPC: u32 = 0xbfe0_0c00;

/// All supported encodings, in match priority order.
pub static PATTERNS: [Pattern; 13] = [
    pat("fcvtzs_float_fix", FP_FIX_MASK, 0x1e18_0000, InsnKind::FcvtzsFloatFix),
    pat("fcvtzu_float_fix", FP_FIX_MASK, 0x1e19_0000, InsnKind::FcvtzuFloatFix),
    pat("scvtf_float_fix", FP_FIX_MASK, 0x1e02_0000, InsnKind::ScvtfFloatFix),
    pat("ucvtf_float_fix", FP_FIX_MASK, 0x1e03_0000, InsnKind::UcvtfFloatFix),
    pat("sttrb", LDST_SIZE_OPC, 0x3800_0800, InsnKind::Sttrb),
    pat("ldtrb", LDST_SIZE_OPC, 0x3840_0800, InsnKind::Ldtrb),
    pat("ldtrsb", LDST_SIZE_OPC1, 0x3880_0800, InsnKind::Ldtrsb),
    pat("sttrh", LDST_SIZE_OPC, 0x7800_0800, InsnKind::Sttrh),
    pat("ldtrh", LDST_SIZE_OPC, 0x7840_0800, InsnKind::Ldtrh),
    pat("ldtrsh", LDST_SIZE_OPC1, 0x7880_0800, InsnKind::Ldtrsh),
    pat("sttr", LDST_SIZE1_OPC, 0xb800_0800, InsnKind::Sttr),
    pat("ldtr", LDST_SIZE1_OPC, 0xb840_0800, InsnKind::Ldtr),
    pat("ldtrsw", LDST_SIZE_OPC, 0xb880_0800, InsnKind::Ldtrsw),
];

/// First pattern matching `insn`, if any.
pub fn lookup(insn: u32) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.matches(insn))
}

/// Decode `insn` and call the matching translator.
///
/// `None` when no pattern matches, otherwise the translator's verdict.
pub fn decode<Ir, T: Decode<Ir>>(ctx: &mut T, ir: &mut Ir, insn: u32) -> Option<bool> {
    let pattern = lookup(insn)?;
    Some(dispatch(ctx, ir, pattern.kind, insn))
}

/// Extract the argument set for `kind` from `insn` and call its
/// translator.
pub fn dispatch<Ir, T: Decode<Ir>>(ctx: &mut T, ir: &mut Ir, kind: InsnKind, insn: u32) -> bool {
    match kind {
        InsnKind::FcvtzsFloatFix => ctx.trans_fcvtzs_float_fix(ir, &extract_fp_to_fix(insn)),
        InsnKind::FcvtzuFloatFix => ctx.trans_fcvtzu_float_fix(ir, &extract_fp_to_fix(insn)),
        InsnKind::ScvtfFloatFix => ctx.trans_scvtf_float_fix(ir, &extract_fix_to_fp(insn)),
        InsnKind::UcvtfFloatFix => ctx.trans_ucvtf_float_fix(ir, &extract_fix_to_fp(insn)),
        InsnKind::Sttrb => ctx.trans_sttrb(ir, &extract_ldst_unpriv(insn)),
        InsnKind::Sttrh => ctx.trans_sttrh(ir, &extract_ldst_unpriv(insn)),
        InsnKind::Sttr => ctx.trans_sttr(ir, &extract_ldst_unpriv_sized(insn)),
        InsnKind::Ldtrb => ctx.trans_ldtrb(ir, &extract_ldst_unpriv(insn)),
        InsnKind::Ldtrh => ctx.trans_ldtrh(ir, &extract_ldst_unpriv(insn)),
        InsnKind::Ldtr => ctx.trans_ldtr(ir, &extract_ldst_unpriv_sized(insn)),
        InsnKind::Ldtrsb => ctx.trans_ldtrsb(ir, &extract_ldst_unpriv_signed(insn)),
        InsnKind::Ldtrsh => ctx.trans_ldtrsh(ir, &extract_ldst_unpriv_signed(insn)),
        InsnKind::Ldtrsw => ctx.trans_ldtrsw(ir, &extract_ldst_unpriv(insn)),
    }
}

// ── Field extraction ─────────────────────────────────────────────

fn field(insn: u32, lsb: u32, len: u32) -> u32 {
    (insn >> lsb) & ((1 << len) - 1)
}

fn extract_fp_to_fix(insn: u32) -> ArgsFpToFix {
    ArgsFpToFix {
        sf: field(insn, 31, 1) != 0,
        ftype: Imm::from_insn(insn, 22),
        scale: Imm::from_insn(insn, 10),
        vn: VReg::new(field(insn, 5, 5)),
        rd: Reg::from_field_zr(field(insn, 0, 5)),
    }
}

fn extract_fix_to_fp(insn: u32) -> ArgsFixToFp {
    ArgsFixToFp {
        sf: field(insn, 31, 1) != 0,
        ftype: Imm::from_insn(insn, 22),
        scale: Imm::from_insn(insn, 10),
        rn: Reg::from_field_zr(field(insn, 5, 5)),
        vd: VReg::new(field(insn, 0, 5)),
    }
}

fn extract_ldst_unpriv(insn: u32) -> ArgsLdstUnpriv {
    ArgsLdstUnpriv {
        imm9: Imm::from_insn(insn, 12),
        rn: Reg::from_field_sp(field(insn, 5, 5)),
        rt: Reg::from_field_zr(field(insn, 0, 5)),
    }
}

fn extract_ldst_unpriv_sized(insn: u32) -> ArgsLdstUnprivSized {
    ArgsLdstUnprivSized {
        size: Imm::from_insn(insn, 30),
        imm9: Imm::from_insn(insn, 12),
        rn: Reg::from_field_sp(field(insn, 5, 5)),
        rt: Reg::from_field_zr(field(insn, 0, 5)),
    }
}

fn extract_ldst_unpriv_signed(insn: u32) -> ArgsLdstUnprivSigned {
    ArgsLdstUnprivSigned {
        opc: Imm::from_insn(insn, 22),
        imm9: Imm::from_insn(insn, 12),
        rn: Reg::from_field_sp(field(insn, 5, 5)),
        rt: Reg::from_field_zr(field(insn, 0, 5)),
    }
}
