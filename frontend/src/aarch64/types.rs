//! Register names and small field-decoding tables.

use super::imm::Imm;

/// A general-purpose register operand.
///
/// Encoding 31 names either the stack pointer or the zero register,
/// depending on the operand position; the decoder resolves that when it
/// builds the argument set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    /// X0-X30.
    X(u8),
    Sp,
    Zr,
}

impl Reg {
    /// Register field where 31 means ZR (data operands).
    pub fn from_field_zr(field: u32) -> Reg {
        match field {
            0..=30 => Reg::X(field as u8),
            31 => Reg::Zr,
            _ => panic!("register field {field} out of range"),
        }
    }

    /// Register field where 31 means SP (base-address operands).
    pub fn from_field_sp(field: u32) -> Reg {
        match field {
            0..=30 => Reg::X(field as u8),
            31 => Reg::Sp,
            _ => panic!("register field {field} out of range"),
        }
    }
}

/// A SIMD&FP register operand, V0-V31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VReg(u8);

impl VReg {
    pub fn new(n: u32) -> Self {
        assert!(n < 32, "vector register {n} out of range");
        Self(n as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Width in bits of the FP type selected by a 2-bit `type` field.
///
/// `00` single, `01` double, `11` half; `10` is reserved.
pub fn fp_data_size(ftype: Imm<2>) -> Option<u32> {
    match ftype.raw() {
        0b00 => Some(32),
        0b01 => Some(64),
        0b11 => Some(16),
        _ => None,
    }
}

/// What a load/store encoding does with memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemAccess {
    Store,
    Load,
    Prefetch,
}

/// Decoded `(size, opc)` of a single-register load/store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStoreForm {
    pub access: MemAccess,
    /// Width of the destination register for loads.
    pub regsize: u32,
    /// Loads sign-extend instead of zero-extending.
    pub signed: bool,
}

/// Classify a single-register load/store by its `size` (log2 of the
/// access in bytes) and `opc` fields.
///
/// `opc<1> == 0` selects a store or a zero-extending load. Otherwise a
/// doubleword-sized form is a prefetch and smaller sizes are
/// sign-extending loads into W (`opc<0> == 1`) or X registers.
pub fn load_store_form(size: u32, opc: Imm<2>) -> LoadStoreForm {
    assert!(size <= 3, "access size field {size} out of range");
    if !opc.bit(1) {
        LoadStoreForm {
            access: if opc.bit(0) {
                MemAccess::Load
            } else {
                MemAccess::Store
            },
            regsize: if size == 3 { 64 } else { 32 },
            signed: false,
        }
    } else if size == 3 {
        LoadStoreForm {
            access: MemAccess::Prefetch,
            regsize: 64,
            signed: false,
        }
    } else {
        LoadStoreForm {
            access: MemAccess::Load,
            regsize: if opc.bit(0) { 32 } else { 64 },
            signed: true,
        }
    }
}
