use a64_frontend::aarch64::cfg::A64Cfg;
use a64_frontend::aarch64::cpu::{EXIT_FETCH_FAULT, EXIT_NEXT, EXIT_UNDEFINED};
use a64_frontend::aarch64::{translate_block, A64DisasContext, A64Translator};
use a64_frontend::{translator_loop, DisasJumpType, TranslateError};
use a64_ir::{Context, Opcode};

use super::*;

const BASE: u64 = 0x40_0000;

fn exit_value(ir: &Context) -> u64 {
    let last = ir.ops().last().expect("block has ops");
    assert_eq!(last.opc, Opcode::ExitTb);
    u64::from(last.carg(0))
}

/// Value moved into the guest PC right before the exit.
fn final_pc(ir: &Context) -> u64 {
    let ops = ir.ops();
    let mov = &ops[ops.len() - 2];
    assert_eq!(mov.opc, Opcode::Mov);
    ir.temp(mov.iargs()[0]).val
}

#[test]
fn block_falls_through_at_end() {
    init_logger();
    let code = code_bytes(&[sttrb(1, 2, 0), ldtr_x(3, SP, 8), fcvtzs(1, 1, 32, 0, 4)]);
    let (ir, ctx) = translate_block(BASE, &code[..8], A64Cfg::default(), 0);

    // two instructions, then a fetch fault at the window end
    assert_eq!(count_ops(&ir, Opcode::InsnStart), 3);
    assert_eq!(ctx.error, Some(TranslateError::FetchFault { pc: BASE + 8 }));
    assert_eq!(exit_value(&ir), EXIT_FETCH_FAULT);
    assert_eq!(final_pc(&ir), BASE + 8);
}

#[test]
fn pc_wraps_at_top_of_address_space() {
    let top = u64::MAX - 3;
    let code = code_bytes(&[sttrb(1, 2, 0)]);
    let (ir, ctx) = translate_block(top, &code, A64Cfg::default(), 0);

    assert_eq!(count_ops(&ir, Opcode::GuestSt), 1);
    assert_eq!(ctx.base.pc_next, 4);
    assert_eq!(ctx.error, Some(TranslateError::FetchFault { pc: 0 }));
    assert_eq!(exit_value(&ir), EXIT_FETCH_FAULT);
    assert_eq!(final_pc(&ir), 0);

    let cfg = A64Cfg::default().with_max_insns(1);
    let (ir, ctx) = translate_block(top, &code, cfg, 0);
    assert_eq!(ctx.base.is_jmp, DisasJumpType::TooMany);
    assert_eq!(exit_value(&ir), EXIT_NEXT);
    assert_eq!(final_pc(&ir), 0);
}

#[test]
fn code_window_may_span_the_wrap() {
    let code = code_bytes(&[sttrb(1, 2, 0), ldtrb(3, 4, 0)]);
    let cfg = A64Cfg::default().with_max_insns(2);
    let (ir, ctx) = translate_block(u64::MAX - 3, &code, cfg, 0);

    assert_eq!(ctx.error, None);
    assert_eq!(count_ops(&ir, Opcode::GuestSt), 1);
    assert_eq!(count_ops(&ir, Opcode::GuestLd), 1);
    assert_eq!(final_pc(&ir), 4);
}

#[test]
fn block_stops_at_max_insns() {
    let code = code_bytes(&[sttrb(1, 2, 0), ldtrb(3, 4, 1), ldtrsw(5, 6, 2)]);
    let cfg = A64Cfg::default().with_max_insns(2);
    let (ir, ctx) = translate_block(BASE, &code, cfg, 0);

    assert_eq!(ctx.base.is_jmp, DisasJumpType::TooMany);
    assert_eq!(ctx.base.num_insns, 2);
    assert_eq!(ctx.error, None);
    assert_eq!(count_ops(&ir, Opcode::InsnStart), 2);
    assert_eq!(count_ops(&ir, Opcode::GuestSt), 1);
    assert_eq!(count_ops(&ir, Opcode::GuestLd), 1);
    assert_eq!(exit_value(&ir), EXIT_NEXT);
    assert_eq!(final_pc(&ir), BASE + 8);
}

#[test]
fn unallocated_insn_ends_block() {
    let bad = fcvtzs(0, 0b01, 31, 0, 1);
    let code = code_bytes(&[ldtrb(1, 2, 0), bad, sttrb(1, 2, 0)]);
    let (ir, ctx) = translate_block(BASE, &code, A64Cfg::default(), 0);

    assert_eq!(
        ctx.error,
        Some(TranslateError::Unallocated {
            pc: BASE + 4,
            insn: bad
        })
    );
    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
    assert_eq!(exit_value(&ir), EXIT_UNDEFINED);
    assert_eq!(final_pc(&ir), BASE + 4);
    // nothing from the rejected word or anything after it
    assert_eq!(count_ops(&ir, Opcode::GuestSt), 0);
    assert_eq!(count_ops(&ir, Opcode::FpToFixedS), 0);
    assert_eq!(count_ops(&ir, Opcode::InsnStart), 2);
}

#[test]
fn unmatched_insn_ends_block() {
    let code = code_bytes(&[0xd503_201f]);
    let (ir, ctx) = translate_block(BASE, &code, A64Cfg::default(), 0);
    assert_eq!(
        ctx.error,
        Some(TranslateError::NoMatch {
            pc: BASE,
            insn: 0xd503_201f
        })
    );
    assert_eq!(exit_value(&ir), EXIT_UNDEFINED);
    assert_eq!(
        dump_lines(&ir),
        [
            " ---- 0x0000000000400000",
            " insn_start $0x400000",
            " mov_i64 pc, $0x400000",
            " exit_tb $0x3",
        ]
    );
}

#[test]
fn empty_window_is_a_fetch_fault() {
    let (ir, ctx) = translate_block(BASE, &[], A64Cfg::default(), 0);
    assert_eq!(ctx.error, Some(TranslateError::FetchFault { pc: BASE }));
    assert_eq!(exit_value(&ir), EXIT_FETCH_FAULT);
}

#[test]
fn partial_word_is_a_fetch_fault() {
    let code = code_bytes(&[ldtrb(1, 2, 0)]);
    let (_, ctx) = translate_block(BASE, &code[..3], A64Cfg::default(), 0);
    assert_eq!(ctx.error, Some(TranslateError::FetchFault { pc: BASE }));
}

#[test]
fn globals_are_registered() {
    let (ir, ctx) = translate_block(BASE, &[], A64Cfg::default(), 0);
    assert_eq!(ir.nb_globals(), 34);
    assert!(ir.temp(ctx.env).is_fixed());
    assert_eq!(ir.temp(ctx.env).reg, Some(A64Cfg::USER.env_reg));
    assert_eq!(ir.temp(ctx.xregs[30]).name, Some("x30"));
    assert_eq!(ir.temp(ctx.sp).name, Some("sp"));
    assert_eq!(ir.temp(ctx.pc).name, Some("pc"));
}

#[test]
fn env_register_is_configurable() {
    let cfg = A64Cfg::default().with_env_reg(14);
    let (ir, ctx) = translate_block(BASE, &[], cfg, 0);
    let env = ir.temp(ctx.env);
    assert_eq!(env.reg, Some(14));
    assert_eq!(env.name, Some("env"));
}

#[test]
fn fpcr_rounding_reaches_scvtf() {
    let code = code_bytes(&[scvtf(1, 0b01, 60, 1, 2)]);
    let (ir, _) = translate_block(BASE, &code, A64Cfg::default(), 2 << 22);
    let op = find_op(&ir, Opcode::FixedToFpS).expect("conversion op");
    assert_eq!(op.carg(1), a64_ir::RoundingMode::TowardsMinusInfinity as u32);
}

#[test]
fn loop_drives_custom_context() {
    let code = code_bytes(&[ldtrsw(1, 2, 0)]);
    let mut ir = Context::new();
    let mut ctx = A64DisasContext::new(BASE, &code).with_cfg(A64Cfg::USER.with_max_insns(1));
    translator_loop::<A64Translator>(&mut ctx, &mut ir);
    assert_eq!(ctx.base.pc_next, BASE + 4);
    assert_eq!(ctx.insn, ldtrsw(1, 2, 0));
    assert_eq!(exit_value(&ir), EXIT_NEXT);
}

#[test]
fn translation_is_deterministic() {
    let code = code_bytes(&[
        sttrb(3, SP, -4),
        ldst_unpriv(0b01, 0b11, 6, 2, 5),
        fcvtzu(0, 0b00, 40, 5, 2),
        ldtr_x(7, 8, 0),
    ]);
    let (a, _) = translate_block(BASE, &code, A64Cfg::default(), 0);
    let (b, _) = translate_block(BASE, &code, A64Cfg::default(), 0);
    assert_eq!(a.ops(), b.ops());
    assert_eq!(dump_lines(&a), dump_lines(&b));
}
