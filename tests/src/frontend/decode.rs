use a64_frontend::aarch64::cfg::A64Cfg;
use a64_frontend::aarch64::decode::{
    decode, lookup, ArgsFixToFp, ArgsFpToFix, ArgsLdstUnpriv, ArgsLdstUnprivSigned,
    ArgsLdstUnprivSized, Decode,
};
use a64_frontend::aarch64::imm::Imm;
use a64_frontend::aarch64::types::{Reg, VReg};
use a64_frontend::TranslateError;

use super::*;

/// Records which translator ran and with what arguments.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    accept: bool,
}

impl Recorder {
    fn hit(&mut self, what: String) -> bool {
        self.calls.push(what);
        self.accept
    }
}

impl Decode<()> for Recorder {
    fn trans_fcvtzs_float_fix(&mut self, _: &mut (), a: &ArgsFpToFix) -> bool {
        self.hit(format!("fcvtzs {a:?}"))
    }
    fn trans_fcvtzu_float_fix(&mut self, _: &mut (), a: &ArgsFpToFix) -> bool {
        self.hit(format!("fcvtzu {a:?}"))
    }
    fn trans_scvtf_float_fix(&mut self, _: &mut (), a: &ArgsFixToFp) -> bool {
        self.hit(format!("scvtf {a:?}"))
    }
    fn trans_ucvtf_float_fix(&mut self, _: &mut (), a: &ArgsFixToFp) -> bool {
        self.hit(format!("ucvtf {a:?}"))
    }
    fn trans_sttrb(&mut self, _: &mut (), a: &ArgsLdstUnpriv) -> bool {
        self.hit(format!("sttrb {a:?}"))
    }
    fn trans_sttrh(&mut self, _: &mut (), a: &ArgsLdstUnpriv) -> bool {
        self.hit(format!("sttrh {a:?}"))
    }
    fn trans_sttr(&mut self, _: &mut (), a: &ArgsLdstUnprivSized) -> bool {
        self.hit(format!("sttr {a:?}"))
    }
    fn trans_ldtrb(&mut self, _: &mut (), a: &ArgsLdstUnpriv) -> bool {
        self.hit(format!("ldtrb {a:?}"))
    }
    fn trans_ldtrh(&mut self, _: &mut (), a: &ArgsLdstUnpriv) -> bool {
        self.hit(format!("ldtrh {a:?}"))
    }
    fn trans_ldtr(&mut self, _: &mut (), a: &ArgsLdstUnprivSized) -> bool {
        self.hit(format!("ldtr {a:?}"))
    }
    fn trans_ldtrsb(&mut self, _: &mut (), a: &ArgsLdstUnprivSigned) -> bool {
        self.hit(format!("ldtrsb {a:?}"))
    }
    fn trans_ldtrsh(&mut self, _: &mut (), a: &ArgsLdstUnprivSigned) -> bool {
        self.hit(format!("ldtrsh {a:?}"))
    }
    fn trans_ldtrsw(&mut self, _: &mut (), a: &ArgsLdstUnpriv) -> bool {
        self.hit(format!("ldtrsw {a:?}"))
    }
}

fn routed(insn: u32) -> Option<&'static str> {
    lookup(insn).map(|p| p.name)
}

#[test]
fn routes_each_encoding() {
    let cases = [
        (fcvtzs(1, 0b01, 32, 0, 1), "fcvtzs_float_fix"),
        (fcvtzu(0, 0b00, 40, 3, 4), "fcvtzu_float_fix"),
        (scvtf(1, 0b01, 48, 4, 3), "scvtf_float_fix"),
        (ucvtf(0, 0b00, 56, 2, 1), "ucvtf_float_fix"),
        (sttrb(3, SP, -4), "sttrb"),
        (ldtrb(1, 2, 0), "ldtrb"),
        (ldst_unpriv(0b00, 0b10, 0, 1, 2), "ldtrsb"),
        (ldst_unpriv(0b00, 0b11, 0, 1, 2), "ldtrsb"),
        (ldst_unpriv(0b01, 0b00, 0, 1, 2), "sttrh"),
        (ldtrh(1, 2, 0), "ldtrh"),
        (ldst_unpriv(0b01, 0b10, 0, 1, 2), "ldtrsh"),
        (ldst_unpriv(0b01, 0b11, 0, 1, 2), "ldtrsh"),
        (sttr_w(0, 1, 0), "sttr"),
        (ldst_unpriv(0b11, 0b00, 0, 1, 2), "sttr"),
        (ldst_unpriv(0b10, 0b01, 0, 1, 2), "ldtr"),
        (ldtr_x(0, 1, 0), "ldtr"),
        (ldtrsw(0, 1, 0), "ldtrsw"),
    ];
    for (insn, name) in cases {
        assert_eq!(routed(insn), Some(name), "insn {insn:#010x}");
    }
}

#[test]
fn known_encodings() {
    // fcvtzs x0, d0, #32
    assert_eq!(fcvtzs(1, 0b01, 32, 0, 0), 0x9e58_8000);
    assert_eq!(routed(0x9e58_8000), Some("fcvtzs_float_fix"));
    // sttrb w1, [sp, #-4]
    assert_eq!(sttrb(1, SP, -4), 0x381f_cbe1);
    assert_eq!(routed(0x381f_cbe1), Some("sttrb"));
}

#[test]
fn unallocated_combinations_match_nothing() {
    // size = 11 with opc = 1x
    assert_eq!(routed(ldst_unpriv(0b11, 0b10, 0, 1, 2)), None);
    assert_eq!(routed(ldst_unpriv(0b11, 0b11, 0, 1, 2)), None);
    // size = 10 with opc = 11
    assert_eq!(routed(ldst_unpriv(0b10, 0b11, 0, 1, 2)), None);
    // V = 1 (SIMD&FP register forms are not in this class)
    assert_eq!(routed(sttrb(1, 2, 0) | (1 << 26)), None);
    // bits 11:10 != 10 is a different addressing mode
    assert_eq!(routed(sttrb(1, 2, 0) & !(0b11 << 10)), None);
    // FP/fixed with other rmode/opcode pairs (FCVTZS integer form etc.)
    assert_eq!(routed(fp_fix(1, 0b01, 0b01, 0b000, 32, 0, 0)), None);
    assert_eq!(routed(0), None);
}

#[test]
fn fields_are_extracted() {
    let mut rec = Recorder {
        accept: true,
        ..Default::default()
    };
    assert_eq!(decode(&mut rec, &mut (), fcvtzu(0, 0b00, 40, 3, ZR)), Some(true));
    let expected = ArgsFpToFix {
        sf: false,
        ftype: Imm::new(0),
        scale: Imm::new(40),
        vn: VReg::new(3),
        rd: Reg::Zr,
    };
    assert_eq!(rec.calls, [format!("fcvtzu {expected:?}")]);

    rec.calls.clear();
    decode(&mut rec, &mut (), ldst_unpriv(0b01, 0b11, -1, SP, 7));
    let expected = ArgsLdstUnprivSigned {
        opc: Imm::new(0b11),
        imm9: Imm::new(0x1ff),
        rn: Reg::Sp,
        rt: Reg::X(7),
    };
    assert_eq!(rec.calls, [format!("ldtrsh {expected:?}")]);

    rec.calls.clear();
    decode(&mut rec, &mut (), ldtr_x(ZR, 5, 8));
    let expected = ArgsLdstUnprivSized {
        size: Imm::new(0b11),
        imm9: Imm::new(8),
        rn: Reg::X(5),
        rt: Reg::Zr,
    };
    assert_eq!(rec.calls, [format!("ldtr {expected:?}")]);
}

#[test]
fn decode_outcomes_are_distinct() {
    let mut rec = Recorder::default();
    assert_eq!(decode(&mut rec, &mut (), 0), None);
    assert!(rec.calls.is_empty());
    assert_eq!(decode(&mut rec, &mut (), sttrb(1, 2, 0)), Some(false));
    assert_eq!(rec.calls.len(), 1);
}

#[test]
fn exactly_one_translator_per_word() {
    let mut rec = Recorder {
        accept: true,
        ..Default::default()
    };
    decode(&mut rec, &mut (), ldtrsw(1, 2, 3));
    assert_eq!(rec.calls.len(), 1);
    assert!(rec.calls[0].starts_with("ldtrsw "));
}

#[test]
fn translate_word_reports_no_match() {
    let (mut ctx, mut ir) = setup(A64Cfg::default());
    let insn = 0xd503_201f; // NOP
    assert_eq!(
        ctx.translate_insn_word(&mut ir, insn),
        Err(TranslateError::NoMatch { pc: 0x1000, insn })
    );
    assert_eq!(ir.num_ops(), 0);
}

#[test]
fn error_messages() {
    let e = TranslateError::Unallocated {
        pc: 0x4000,
        insn: 0x1e18_7c01,
    };
    assert_eq!(
        e.to_string(),
        "unallocated encoding 0x1e187c01 at pc 0x4000"
    );
    assert_eq!(e.pc(), 0x4000);
    let e = TranslateError::FetchFault { pc: 0x10 };
    assert_eq!(e.to_string(), "instruction fetch failed at pc 0x10");
}
