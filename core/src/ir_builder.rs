use crate::context::Context;
use crate::op::Op;
use crate::opcode::Opcode;
use crate::temp::TempIdx;
use crate::types::{AccType, MemOp, RoundingMode, Type};

// Constant args are encoded as TempIdx(raw_value as u32).
fn carg(val: u32) -> TempIdx {
    TempIdx(val)
}

impl Context {
    // -- Internal helpers --

    fn emit_binary(
        &mut self,
        opc: Opcode,
        ty: Type,
        dst: TempIdx,
        a: TempIdx,
        b: TempIdx,
    ) -> TempIdx {
        let idx = self.next_op_idx();
        let op = Op::with_args(idx, opc, ty, &[dst, a, b]);
        self.emit_op(op);
        dst
    }

    fn emit_unary(
        &mut self,
        opc: Opcode,
        ty: Type,
        dst: TempIdx,
        src: TempIdx,
    ) -> TempIdx {
        let idx = self.next_op_idx();
        let op = Op::with_args(idx, opc, ty, &[dst, src]);
        self.emit_op(op);
        dst
    }

    fn emit_convert(
        &mut self,
        opc: Opcode,
        ty: Type,
        dst: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            opc,
            ty,
            &[dst, src, carg(fbits), carg(rmode as u32)],
        );
        self.emit_op(op);
        dst
    }

    // -- Moves and arithmetic --

    pub fn gen_mov(&mut self, ty: Type, d: TempIdx, s: TempIdx) -> TempIdx {
        self.emit_unary(Opcode::Mov, ty, d, s)
    }

    pub fn gen_add(
        &mut self,
        ty: Type,
        d: TempIdx,
        a: TempIdx,
        b: TempIdx,
    ) -> TempIdx {
        self.emit_binary(Opcode::Add, ty, d, a, b)
    }

    // -- Width conversion (1 oarg, 1 iarg) --

    /// Zero-extend `s` to `ty`; `s` must be strictly narrower.
    pub fn gen_extu(&mut self, ty: Type, d: TempIdx, s: TempIdx) -> TempIdx {
        assert!(
            self.type_of(s).size_bits() < ty.size_bits(),
            "extu source must be narrower than {ty:?}"
        );
        self.emit_unary(Opcode::ExtU, ty, d, s)
    }

    /// Sign-extend `s` to `ty`; `s` must be strictly narrower.
    pub fn gen_exts(&mut self, ty: Type, d: TempIdx, s: TempIdx) -> TempIdx {
        assert!(
            self.type_of(s).size_bits() < ty.size_bits(),
            "exts source must be narrower than {ty:?}"
        );
        self.emit_unary(Opcode::ExtS, ty, d, s)
    }

    /// Keep the low `ty` bits of `s`; `s` must be strictly wider.
    pub fn gen_trunc(&mut self, ty: Type, d: TempIdx, s: TempIdx) -> TempIdx {
        assert!(
            self.type_of(s).size_bits() > ty.size_bits(),
            "trunc source must be wider than {ty:?}"
        );
        self.emit_unary(Opcode::Trunc, ty, d, s)
    }

    // -- CPU state Ld/St --

    /// Load: dst = *(base + offset)
    /// Ld: 1 oarg, 1 iarg, 1 carg (offset)
    pub fn gen_ld(
        &mut self,
        ty: Type,
        dst: TempIdx,
        base: TempIdx,
        offset: i64,
    ) -> TempIdx {
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            Opcode::Ld,
            ty,
            &[dst, base, carg(offset as u32)],
        );
        self.emit_op(op);
        dst
    }

    /// Store: *(base + offset) = src
    /// St: 0 oargs, 2 iargs, 1 carg (offset)
    pub fn gen_st(&mut self, ty: Type, src: TempIdx, base: TempIdx, offset: i64) {
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            Opcode::St,
            ty,
            &[src, base, carg(offset as u32)],
        );
        self.emit_op(op);
    }

    // -- Guest memory access --

    /// Guest load of `memop.size_bytes()` bytes at `addr`.
    /// GuestLd: 1 oarg, 1 iarg, 2 cargs (memop, acctype)
    pub fn gen_guest_ld(
        &mut self,
        ty: Type,
        dst: TempIdx,
        addr: TempIdx,
        memop: MemOp,
        acc: AccType,
    ) -> TempIdx {
        assert_eq!(
            ty.size_bytes(),
            memop.size_bytes(),
            "guest load result type must match the access width"
        );
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            Opcode::GuestLd,
            ty,
            &[dst, addr, carg(memop.bits() as u32), carg(acc as u32)],
        );
        self.emit_op(op);
        dst
    }

    /// Guest store of `val` at `addr`.
    /// GuestSt: 0 oargs, 2 iargs, 2 cargs (memop, acctype)
    pub fn gen_guest_st(
        &mut self,
        ty: Type,
        val: TempIdx,
        addr: TempIdx,
        memop: MemOp,
        acc: AccType,
    ) {
        assert_eq!(
            ty.size_bytes(),
            memop.size_bytes(),
            "guest store value type must match the access width"
        );
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            Opcode::GuestSt,
            ty,
            &[val, addr, carg(memop.bits() as u32), carg(acc as u32)],
        );
        self.emit_op(op);
    }

    // -- Floating-point <-> fixed-point (1 oarg, 1 iarg, 2 cargs) --
    //
    // The float operand is raw bits: I32 = single, I64 = double.

    pub fn gen_fp_to_fixed_s32(
        &mut self,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FpToFixedS, Type::I32, d, src, fbits, rmode)
    }

    pub fn gen_fp_to_fixed_s64(
        &mut self,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FpToFixedS, Type::I64, d, src, fbits, rmode)
    }

    pub fn gen_fp_to_fixed_u32(
        &mut self,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FpToFixedU, Type::I32, d, src, fbits, rmode)
    }

    pub fn gen_fp_to_fixed_u64(
        &mut self,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FpToFixedU, Type::I64, d, src, fbits, rmode)
    }

    /// Signed fixed-point `src` to a float of width `ty`.
    pub fn gen_fixed_s_to_fp(
        &mut self,
        ty: Type,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FixedToFpS, ty, d, src, fbits, rmode)
    }

    /// Unsigned fixed-point `src` to a float of width `ty`.
    pub fn gen_fixed_u_to_fp(
        &mut self,
        ty: Type,
        d: TempIdx,
        src: TempIdx,
        fbits: u32,
        rmode: RoundingMode,
    ) -> TempIdx {
        self.emit_convert(Opcode::FixedToFpU, ty, d, src, fbits, rmode)
    }

    // -- Checks --

    /// AlignCheck: 0 oargs, 1 iarg, 1 carg (alignment in bytes)
    pub fn gen_align_check(&mut self, ty: Type, val: TempIdx, align: u32) {
        assert!(align.is_power_of_two(), "alignment must be a power of two");
        let idx = self.next_op_idx();
        let op = Op::with_args(idx, Opcode::AlignCheck, ty, &[val, carg(align)]);
        self.emit_op(op);
    }

    // -- Block structure --

    /// InsnStart: 0 oargs, 0 iargs, 2 cargs (pc_lo, pc_hi)
    pub fn gen_insn_start(&mut self, pc: u64) {
        let idx = self.next_op_idx();
        let op = Op::with_args(
            idx,
            Opcode::InsnStart,
            Type::I64,
            &[carg(pc as u32), carg((pc >> 32) as u32)],
        );
        self.emit_op(op);
    }

    /// ExitTb: 0 oargs, 0 iargs, 1 carg (val)
    pub fn gen_exit_tb(&mut self, val: u64) {
        let idx = self.next_op_idx();
        let op =
            Op::with_args(idx, Opcode::ExitTb, Type::I64, &[carg(val as u32)]);
        self.emit_op(op);
    }
}
