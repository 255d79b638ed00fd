//! AArch64 frontend: A64 user-mode instruction translation.

pub mod cfg;
pub mod cpu;
pub mod decode;
pub mod imm;
mod operand;
mod trans;
pub mod types;

use a64_ir::{Context, RoundingMode, TempIdx, Type};
use log::{debug, trace};

use crate::{DisasContextBase, DisasJumpType, TranslateError, TranslatorOps};
use cfg::A64Cfg;
use cpu::{
    xreg_offset, EXIT_FETCH_FAULT, EXIT_NEXT, EXIT_UNDEFINED, NUM_XREGS, PC_OFFSET,
    SP_OFFSET,
};

const XREG_NAMES: [&str; NUM_XREGS] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11",
    "x12", "x13", "x14", "x15", "x16", "x17", "x18", "x19", "x20", "x21",
    "x22", "x23", "x24", "x25", "x26", "x27", "x28", "x29", "x30",
];

// ---------------------------------------------------------------
// Disassembly context
// ---------------------------------------------------------------

/// A64 disassembly context (extends `DisasContextBase`).
pub struct A64DisasContext<'a> {
    /// Generic base fields (pc, is_jmp, counters).
    pub base: DisasContextBase,
    pub cfg: A64Cfg,
    /// IR temp for the env pointer (fixed to `cfg.env_reg`).
    pub env: TempIdx,
    /// IR temps for X0-X30 (globals).
    pub xregs: [TempIdx; NUM_XREGS],
    /// IR temp for SP (global).
    pub sp: TempIdx,
    /// IR temp for the guest PC (global).
    pub pc: TempIdx,
    /// Rounding mode from the FPCR snapshot this block was built under.
    pub fpcr_rmode: RoundingMode,
    /// Raw instruction word being decoded.
    pub insn: u32,
    /// Why the block stopped early, if it did.
    pub error: Option<TranslateError>,
    /// Guest code bytes; `code[0]` is at `pc_first`.
    code: &'a [u8],
}

impl<'a> A64DisasContext<'a> {
    /// Create a context for translating a block starting at `pc`
    /// whose instruction bytes are `code`.
    pub fn new(pc: u64, code: &'a [u8]) -> Self {
        let cfg = A64Cfg::default();
        Self {
            base: DisasContextBase::new(pc, cfg.max_insns),
            cfg,
            env: TempIdx(0),
            xregs: [TempIdx(0); NUM_XREGS],
            sp: TempIdx(0),
            pc: TempIdx(0),
            fpcr_rmode: RoundingMode::default(),
            insn: 0,
            error: None,
            code,
        }
    }

    pub fn with_cfg(mut self, cfg: A64Cfg) -> Self {
        self.cfg = cfg;
        self.base.max_insns = cfg.max_insns;
        self
    }

    /// Take the rounding mode for `SCVTF`/`UCVTF` from `fpcr`.
    pub fn with_fpcr(mut self, fpcr: u64) -> Self {
        self.fpcr_rmode = RoundingMode::from_fpcr_rmode((fpcr >> 22) as u32);
        self
    }

    /// Register env and the guest register globals in `ir`.
    ///
    /// `ir` must not hold any temps yet.
    pub fn register_globals(&mut self, ir: &mut Context) {
        self.env = ir.new_fixed(Type::I64, self.cfg.env_reg, "env");
        for (i, name) in XREG_NAMES.iter().copied().enumerate() {
            self.xregs[i] = ir.new_global(Type::I64, self.env, xreg_offset(i), name);
        }
        self.sp = ir.new_global(Type::I64, self.env, SP_OFFSET, "sp");
        self.pc = ir.new_global(Type::I64, self.env, PC_OFFSET, "pc");
    }

    /// Little-endian instruction word at `pc`, if it lies in the code
    /// window.
    fn fetch_insn(&self, pc: u64) -> Option<u32> {
        let off = usize::try_from(pc.wrapping_sub(self.base.pc_first)).ok()?;
        let bytes = self.code.get(off..off.checked_add(4)?)?;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Decode `insn` at the current PC and emit its IR.
    ///
    /// On error nothing has been emitted for `insn`.
    pub fn translate_insn_word(
        &mut self,
        ir: &mut Context,
        insn: u32,
    ) -> Result<(), TranslateError> {
        let pc = self.base.pc_next;
        self.insn = insn;
        let Some(pattern) = decode::lookup(insn) else {
            return Err(TranslateError::NoMatch { pc, insn });
        };
        trace!("{pc:#x}: {insn:08x} {}", pattern.name);
        if decode::dispatch(self, ir, pattern.kind, insn) {
            Ok(())
        } else {
            Err(TranslateError::Unallocated { pc, insn })
        }
    }

    fn gen_set_pc(&self, ir: &mut Context, pc: u64) {
        let pc_const = ir.new_const(Type::I64, pc);
        ir.gen_mov(Type::I64, self.pc, pc_const);
    }
}

/// `exit_tb` value reported for a block that stopped on `err`.
pub fn exit_code(err: &TranslateError) -> u64 {
    match err {
        TranslateError::NoMatch { .. } | TranslateError::Unallocated { .. } => EXIT_UNDEFINED,
        TranslateError::FetchFault { .. } => EXIT_FETCH_FAULT,
    }
}

// ---------------------------------------------------------------
// TranslatorOps implementation
// ---------------------------------------------------------------

/// Marker type for the A64 translator.
pub struct A64Translator<'a>(std::marker::PhantomData<&'a ()>);

impl<'a> TranslatorOps for A64Translator<'a> {
    type DisasContext = A64DisasContext<'a>;

    fn init_disas_context(ctx: &mut A64DisasContext<'a>, ir: &mut Context) {
        ctx.register_globals(ir);
    }

    fn tb_start(ctx: &mut A64DisasContext<'a>, _ir: &mut Context) {
        debug!(
            "translating block at {:#x} (max {} insns)",
            ctx.base.pc_first, ctx.base.max_insns
        );
    }

    fn insn_start(ctx: &mut A64DisasContext<'a>, ir: &mut Context) {
        ir.gen_insn_start(ctx.base.pc_next);
        ctx.base.num_insns += 1;
    }

    fn translate_insn(ctx: &mut A64DisasContext<'a>, ir: &mut Context) {
        let pc = ctx.base.pc_next;
        let result = match ctx.fetch_insn(pc) {
            Some(insn) => ctx.translate_insn_word(ir, insn),
            None => Err(TranslateError::FetchFault { pc }),
        };

        if let Err(err) = result {
            debug!("ending block: {err}");
            ctx.gen_set_pc(ir, pc);
            ir.gen_exit_tb(exit_code(&err));
            ctx.base.is_jmp = DisasJumpType::NoReturn;
            ctx.error = Some(err);
        }

        ctx.base.pc_next = pc.wrapping_add(4);
    }

    fn tb_stop(ctx: &mut A64DisasContext<'a>, ir: &mut Context) {
        match ctx.base.is_jmp {
            DisasJumpType::NoReturn => {
                // Block already exited.
            }
            DisasJumpType::Next | DisasJumpType::TooMany => {
                ctx.gen_set_pc(ir, ctx.base.pc_next);
                ir.gen_exit_tb(EXIT_NEXT);
            }
        }
    }

    fn base<'b>(ctx: &'b A64DisasContext<'a>) -> &'b DisasContextBase {
        &ctx.base
    }

    fn base_mut<'b>(ctx: &'b mut A64DisasContext<'a>) -> &'b mut DisasContextBase {
        &mut ctx.base
    }
}

/// Translate one block of guest code starting at `pc` into a fresh
/// IR context.
pub fn translate_block<'a>(
    pc: u64,
    code: &'a [u8],
    cfg: A64Cfg,
    fpcr: u64,
) -> (Context, A64DisasContext<'a>) {
    let mut ir = Context::new();
    let mut ctx = A64DisasContext::new(pc, code).with_cfg(cfg).with_fpcr(fpcr);
    crate::translator_loop::<A64Translator<'a>>(&mut ctx, &mut ir);
    (ir, ctx)
}
