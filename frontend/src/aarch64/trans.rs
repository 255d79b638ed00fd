//! A64 instruction translation to IR.
//!
//! Each `trans_*` validates its fields first and returns `false` before
//! emitting anything when the encoding is unallocated. The shared
//! bodies are `gen_*` helpers parameterised by an IR emitter function
//! pointer.

use a64_ir::{AccType, Context, RoundingMode, TempIdx, Type};

use super::decode::*;
use super::imm::Imm;
use super::types::{fp_data_size, load_store_form, MemAccess, Reg};
use super::A64DisasContext;

/// FP-to-fixed emitter: `fn(ir, dst, src, fbits, rmode) -> dst`.
type FpToFixedOp = fn(&mut Context, TempIdx, TempIdx, u32, RoundingMode) -> TempIdx;

/// Fixed-to-FP emitter: `fn(ir, ty, dst, src, fbits, rmode) -> dst`.
type FixedToFpOp =
    fn(&mut Context, Type, TempIdx, TempIdx, u32, RoundingMode) -> TempIdx;

/// Operand widths shared by the scalar fixed-point conversions.
struct FixedConv {
    intsize: u32,
    fltsize: u32,
    fracbits: u32,
}

/// Validate `sf`/`type`/`scale` of a fixed-point conversion.
///
/// Half precision is not supported, the reserved type is unallocated,
/// and a 32-bit integer needs `scale >= 32`.
fn fixed_conv(sf: bool, ftype: Imm<2>, scale: Imm<6>) -> Option<FixedConv> {
    let intsize = if sf { 64 } else { 32 };
    let fltsize = match fp_data_size(ftype) {
        Some(size @ (32 | 64)) => size,
        _ => return None,
    };
    if !sf && !scale.bit(5) {
        return None;
    }
    Some(FixedConv {
        intsize,
        fltsize,
        fracbits: 64 - scale.raw(),
    })
}

// ── Helpers ────────────────────────────────────────────────────

impl A64DisasContext<'_> {
    // -- FP <-> fixed-point --------------------------------

    /// `Rd = op(Vn, fracbits)`, truncating toward zero.
    fn gen_fp_to_fixed(
        &self,
        ir: &mut Context,
        a: &ArgsFpToFix,
        op32: FpToFixedOp,
        op64: FpToFixedOp,
    ) -> bool {
        let Some(conv) = fixed_conv(a.sf, a.ftype, a.scale) else {
            return false;
        };
        let fltval = self.v_scalar(ir, conv.fltsize, a.vn);
        let ty = Type::from_bits(conv.intsize);
        let d = ir.new_temp(ty);
        let op = if conv.intsize == 64 { op64 } else { op32 };
        let intval = op(ir, d, fltval, conv.fracbits, RoundingMode::TowardsZero);
        self.set_x(ir, conv.intsize, a.rd, intval);
        true
    }

    /// `Vd = op(Rn, fracbits)`, rounding per FPCR.
    fn gen_fixed_to_fp(&self, ir: &mut Context, a: &ArgsFixToFp, op: FixedToFpOp) -> bool {
        let Some(conv) = fixed_conv(a.sf, a.ftype, a.scale) else {
            return false;
        };
        let intval = self.x(ir, conv.intsize, a.rn);
        let ty = Type::from_bits(conv.fltsize);
        let d = ir.new_temp(ty);
        let fltval = op(ir, ty, d, intval, conv.fracbits, self.fpcr_rmode);
        self.set_v_scalar(ir, conv.fltsize, a.vd, fltval);
        true
    }

    // -- Unprivileged loads and stores ---------------------

    /// `Mem[Rn + imm9] = Rt<datasize-1:0>`.
    fn gen_store_unpriv(
        &self,
        ir: &mut Context,
        datasize: u32,
        imm9: Imm<9>,
        rn: Reg,
        rt: Reg,
    ) -> bool {
        let address = self.gen_address_imm9(ir, rn, imm9);
        let data = self.x(ir, datasize, rt);
        self.set_mem(ir, address, datasize / 8, AccType::Unpriv, data);
        true
    }

    /// `Rt = ZeroExtend(Mem[Rn + imm9])` into a W register for sub-word
    /// sizes.
    fn gen_load_unpriv(
        &self,
        ir: &mut Context,
        datasize: u32,
        imm9: Imm<9>,
        rn: Reg,
        rt: Reg,
    ) -> bool {
        let address = self.gen_address_imm9(ir, rn, imm9);
        let data = self.mem(ir, address, datasize / 8, AccType::Unpriv);
        let regsize = datasize.max(32);
        let value = self.zero_extend(ir, data, regsize);
        self.set_x(ir, regsize, rt, value);
        true
    }

    /// Byte/halfword load-store whose behaviour `opc` selects.
    fn gen_ldst_unpriv_signed(
        &self,
        ir: &mut Context,
        size: u32,
        a: &ArgsLdstUnprivSigned,
    ) -> bool {
        let datasize = 8 << size;
        let form = load_store_form(size, a.opc);
        match form.access {
            MemAccess::Store => self.gen_store_unpriv(ir, datasize, a.imm9, a.rn, a.rt),
            MemAccess::Load => {
                let address = self.gen_address_imm9(ir, a.rn, a.imm9);
                let data = self.mem(ir, address, datasize / 8, AccType::Unpriv);
                let value = if form.signed {
                    self.sign_extend(ir, data, form.regsize)
                } else {
                    self.zero_extend(ir, data, form.regsize)
                };
                self.set_x(ir, form.regsize, a.rt, value);
                true
            }
            MemAccess::Prefetch => true,
        }
    }
}

// ── Decode trait implementation ────────────────────────────────

impl Decode<Context> for A64DisasContext<'_> {
    // ── Conversion between FP and fixed-point ─────────

    fn trans_fcvtzs_float_fix(&mut self, ir: &mut Context, a: &ArgsFpToFix) -> bool {
        self.gen_fp_to_fixed(
            ir,
            a,
            Context::gen_fp_to_fixed_s32,
            Context::gen_fp_to_fixed_s64,
        )
    }

    fn trans_fcvtzu_float_fix(&mut self, ir: &mut Context, a: &ArgsFpToFix) -> bool {
        self.gen_fp_to_fixed(
            ir,
            a,
            Context::gen_fp_to_fixed_u32,
            Context::gen_fp_to_fixed_u64,
        )
    }

    fn trans_scvtf_float_fix(&mut self, ir: &mut Context, a: &ArgsFixToFp) -> bool {
        self.gen_fixed_to_fp(ir, a, Context::gen_fixed_s_to_fp)
    }

    fn trans_ucvtf_float_fix(&mut self, ir: &mut Context, a: &ArgsFixToFp) -> bool {
        self.gen_fixed_to_fp(ir, a, Context::gen_fixed_u_to_fp)
    }

    // ── Load/store register (unprivileged) ────────────

    fn trans_sttrb(&mut self, ir: &mut Context, a: &ArgsLdstUnpriv) -> bool {
        self.gen_store_unpriv(ir, 8, a.imm9, a.rn, a.rt)
    }

    fn trans_sttrh(&mut self, ir: &mut Context, a: &ArgsLdstUnpriv) -> bool {
        self.gen_store_unpriv(ir, 16, a.imm9, a.rn, a.rt)
    }

    fn trans_sttr(&mut self, ir: &mut Context, a: &ArgsLdstUnprivSized) -> bool {
        let datasize = 8 << a.size.raw();
        self.gen_store_unpriv(ir, datasize, a.imm9, a.rn, a.rt)
    }

    fn trans_ldtrb(&mut self, ir: &mut Context, a: &ArgsLdstUnpriv) -> bool {
        self.gen_load_unpriv(ir, 8, a.imm9, a.rn, a.rt)
    }

    fn trans_ldtrh(&mut self, ir: &mut Context, a: &ArgsLdstUnpriv) -> bool {
        self.gen_load_unpriv(ir, 16, a.imm9, a.rn, a.rt)
    }

    fn trans_ldtr(&mut self, ir: &mut Context, a: &ArgsLdstUnprivSized) -> bool {
        let datasize = 8 << a.size.raw();
        self.gen_load_unpriv(ir, datasize, a.imm9, a.rn, a.rt)
    }

    fn trans_ldtrsb(&mut self, ir: &mut Context, a: &ArgsLdstUnprivSigned) -> bool {
        self.gen_ldst_unpriv_signed(ir, 0, a)
    }

    fn trans_ldtrsh(&mut self, ir: &mut Context, a: &ArgsLdstUnprivSigned) -> bool {
        self.gen_ldst_unpriv_signed(ir, 1, a)
    }

    fn trans_ldtrsw(&mut self, ir: &mut Context, a: &ArgsLdstUnpriv) -> bool {
        let address = self.gen_address_imm9(ir, a.rn, a.imm9);
        let data = self.mem(ir, address, 4, AccType::Unpriv);
        let value = self.sign_extend(ir, data, 64);
        self.set_x(ir, 64, a.rt, value);
        true
    }
}
