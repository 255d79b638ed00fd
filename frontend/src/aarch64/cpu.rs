//! AArch64 CPU state seen by translated code.

/// General-purpose registers X0-X30 (SP is stored separately).
pub const NUM_XREGS: usize = 31;
/// SIMD&FP registers V0-V31.
pub const NUM_VREGS: usize = 32;

/// AArch64 architectural state (user-visible subset).
///
/// `#[repr(C)]` so IR globals and env loads can address fields at the
/// fixed offsets below.
#[repr(C)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct A64Cpu {
    /// X0-X30.
    pub x: [u64; NUM_XREGS],
    /// Stack pointer.
    pub sp: u64,
    /// Program counter.
    pub pc: u64,
    /// V0-V31 as `[low, high]` 64-bit halves.
    pub v: [[u64; 2]; NUM_VREGS],
    pub fpcr: u64,
    pub fpsr: u64,
}

impl A64Cpu {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Byte offset of `x[i]`.
pub const fn xreg_offset(i: usize) -> i64 {
    (i * 8) as i64
}

pub const SP_OFFSET: i64 = (NUM_XREGS * 8) as i64; // 248
pub const PC_OFFSET: i64 = SP_OFFSET + 8; // 256

/// Byte offset of the low 64 bits of `v[i]`.
pub const fn vreg_offset(i: usize) -> i64 {
    PC_OFFSET + 8 + (i * 16) as i64
}

/// Byte offset of the high 64 bits of `v[i]`.
pub const fn vreg_hi_offset(i: usize) -> i64 {
    vreg_offset(i) + 8
}

pub const FPCR_OFFSET: i64 = vreg_offset(NUM_VREGS); // 776
pub const FPSR_OFFSET: i64 = FPCR_OFFSET + 8; // 784

// Values passed to `exit_tb` when a block ends.

/// Fell through or hit the instruction limit; resume at `pc`.
pub const EXIT_NEXT: u64 = 0;
/// Undefined or unallocated instruction at `pc`.
pub const EXIT_UNDEFINED: u64 = 3;
/// Instruction fetch at `pc` failed.
pub const EXIT_FETCH_FAULT: u64 = 4;
