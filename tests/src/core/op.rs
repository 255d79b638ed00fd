use a64_ir::op::*;
use a64_ir::opcode::Opcode;
use a64_ir::temp::TempIdx;
use a64_ir::types::Type;

#[test]
fn op_new_defaults() {
    let op = Op::new(OpIdx(0), Opcode::Add, Type::I64);
    assert_eq!(op.opc, Opcode::Add);
    assert_eq!(op.op_type, Type::I64);
    assert_eq!(op.nargs, 0);
}

#[test]
fn op_with_args() {
    let args = [TempIdx(1), TempIdx(2), TempIdx(3)];
    let op = Op::with_args(OpIdx(0), Opcode::Add, Type::I32, &args);
    assert_eq!(op.nargs, 3);
    assert_eq!(op.args[0], TempIdx(1));
    assert_eq!(op.args[1], TempIdx(2));
    assert_eq!(op.args[2], TempIdx(3));
}

#[test]
fn op_arg_slices() {
    // Add: 1 oarg, 2 iargs, 0 cargs
    let args = [TempIdx(10), TempIdx(20), TempIdx(30)];
    let op = Op::with_args(OpIdx(0), Opcode::Add, Type::I64, &args);

    assert_eq!(op.oargs(), &[TempIdx(10)]);
    assert_eq!(op.iargs(), &[TempIdx(20), TempIdx(30)]);
    assert!(op.cargs().is_empty());
}

#[test]
fn op_arg_slices_with_cargs() {
    // GuestSt: 0 oargs, 2 iargs, 2 cargs
    let args = [TempIdx(1), TempIdx(2), TempIdx(3), TempIdx(9)];
    let op = Op::with_args(OpIdx(0), Opcode::GuestSt, Type::I8, &args);

    assert!(op.oargs().is_empty());
    assert_eq!(op.iargs(), &[TempIdx(1), TempIdx(2)]);
    assert_eq!(op.cargs(), &[TempIdx(3), TempIdx(9)]);
    assert_eq!(op.carg(0), 3);
    assert_eq!(op.carg(1), 9);
}

#[test]
#[should_panic(expected = "wrong argument count for add")]
fn op_with_wrong_arg_count_panics() {
    let _ = Op::with_args(OpIdx(0), Opcode::Add, Type::I64, &[TempIdx(1)]);
}
