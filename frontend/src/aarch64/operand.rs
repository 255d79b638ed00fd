//! Operand access: register, vector-scalar and memory reads and writes
//! expressed as IR.
//!
//! Width arguments are in bits. Register reads narrower than 64 bits
//! truncate; 32-bit register writes zero the upper half. Widths a
//! handler can never legitimately produce are contract violations and
//! panic.

use a64_ir::{AccType, Context, MemOp, TempIdx, Type};

use super::cpu::{vreg_hi_offset, vreg_offset};
use super::imm::Imm;
use super::types::{Reg, VReg};
use super::A64DisasContext;

impl A64DisasContext<'_> {
    // -- General-purpose registers -------------------------

    /// Read the low `width` bits of `reg`; ZR reads as zero.
    pub fn x(&self, ir: &mut Context, width: u32, reg: Reg) -> TempIdx {
        let ty = Type::from_bits(width);
        match reg {
            Reg::Zr => ir.new_const(ty, 0),
            Reg::X(n) => self.narrow(ir, ty, self.xregs[n as usize]),
            Reg::Sp => panic!("SP is not addressable as a data register"),
        }
    }

    /// Write `val` to `reg`. A 32-bit write clears bits 63:32; writes
    /// to ZR are discarded.
    pub fn set_x(&self, ir: &mut Context, width: u32, reg: Reg, val: TempIdx) {
        assert!(
            width == 32 || width == 64,
            "register writes must be 32 or 64 bits, got {width}"
        );
        assert_eq!(
            ir.type_of(val).size_bits(),
            width,
            "value width does not match register write width"
        );
        match reg {
            Reg::Zr => {}
            Reg::X(n) => {
                let dst = self.xregs[n as usize];
                if width == 64 {
                    ir.gen_mov(Type::I64, dst, val);
                } else {
                    ir.gen_extu(Type::I64, dst, val);
                }
            }
            Reg::Sp => panic!("SP is not addressable as a data register"),
        }
    }

    /// Read the low `width` bits of the stack pointer.
    pub fn sp(&self, ir: &mut Context, width: u32) -> TempIdx {
        let ty = Type::from_bits(width);
        self.narrow(ir, ty, self.sp)
    }

    fn narrow(&self, ir: &mut Context, ty: Type, full: TempIdx) -> TempIdx {
        if ty == Type::I64 {
            full
        } else {
            let t = ir.new_temp(ty);
            ir.gen_trunc(ty, t, full)
        }
    }

    // -- SIMD&FP scalar access -----------------------------

    /// Read the low `width` bits of `v` (raw float bits).
    pub fn v_scalar(&self, ir: &mut Context, width: u32, v: VReg) -> TempIdx {
        let ty = Type::from_bits(width);
        let t = ir.new_temp(ty);
        ir.gen_ld(ty, t, self.env, vreg_offset(v.index()))
    }

    /// Write `val` to the low `width` bits of `v` and zero the rest of
    /// the 128-bit register.
    pub fn set_v_scalar(&self, ir: &mut Context, width: u32, v: VReg, val: TempIdx) {
        assert_eq!(
            ir.type_of(val).size_bits(),
            width,
            "value width does not match vector write width"
        );
        let lo = self.zero_extend(ir, val, 64);
        let zero = ir.new_const(Type::I64, 0);
        ir.gen_st(Type::I64, lo, self.env, vreg_offset(v.index()));
        ir.gen_st(Type::I64, zero, self.env, vreg_hi_offset(v.index()));
    }

    // -- Guest memory --------------------------------------

    /// Load `bytes` bytes from guest `addr` with access type `acc`.
    pub fn mem(
        &self,
        ir: &mut Context,
        addr: TempIdx,
        bytes: u32,
        acc: AccType,
    ) -> TempIdx {
        let ty = Type::from_bytes(bytes);
        let t = ir.new_temp(ty);
        ir.gen_guest_ld(ty, t, addr, MemOp::for_bytes(bytes), acc)
    }

    /// Store the `bytes`-byte value `val` to guest `addr`.
    pub fn set_mem(
        &self,
        ir: &mut Context,
        addr: TempIdx,
        bytes: u32,
        acc: AccType,
        val: TempIdx,
    ) {
        let ty = Type::from_bytes(bytes);
        ir.gen_guest_st(ty, val, addr, MemOp::for_bytes(bytes), acc);
    }

    // -- Width changes -------------------------------------

    /// Zero-extend `val` to `width` bits; a no-op at equal width.
    pub fn zero_extend(&self, ir: &mut Context, val: TempIdx, width: u32) -> TempIdx {
        let ty = Type::from_bits(width);
        if ir.type_of(val) == ty {
            return val;
        }
        let t = ir.new_temp(ty);
        ir.gen_extu(ty, t, val)
    }

    /// Sign-extend `val` to `width` bits; a no-op at equal width.
    pub fn sign_extend(&self, ir: &mut Context, val: TempIdx, width: u32) -> TempIdx {
        let ty = Type::from_bits(width);
        if ir.type_of(val) == ty {
            return val;
        }
        let t = ir.new_temp(ty);
        ir.gen_exts(ty, t, val)
    }

    // -- Addressing ----------------------------------------

    /// `base + SignExtend(imm9)` as a 64-bit address.
    ///
    /// An SP base gets a 16-byte alignment check when the config asks
    /// for one.
    pub fn gen_address_imm9(&self, ir: &mut Context, base: Reg, imm9: Imm<9>) -> TempIdx {
        let base_val = match base {
            Reg::Sp => {
                let sp = self.sp(ir, 64);
                if self.cfg.check_sp_alignment {
                    ir.gen_align_check(Type::I64, sp, 16);
                }
                sp
            }
            _ => self.x(ir, 64, base),
        };
        let offset = ir.new_const(Type::I64, imm9.sign_extend_to(64));
        let addr = ir.new_temp(Type::I64);
        ir.gen_add(Type::I64, addr, base_val, offset)
    }
}
