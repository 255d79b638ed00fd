//! Fixed-width immediate fields extracted from instruction words.

use std::fmt;

/// An `N`-bit unsigned field value, `1 <= N <= 32`.
///
/// Construction checks that the value fits; every accessor is then
/// total. Extensions produce the value widened to a requested width,
/// either by zero fill or by replicating bit `N-1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Imm<const N: u32>(u32);

impl<const N: u32> Imm<N> {
    pub const WIDTH: u32 = N;

    /// Wrap `value`; panics if it has bits set at or above `N`.
    pub fn new(value: u32) -> Self {
        assert!((1..=32).contains(&N), "immediate width {N} out of range");
        assert!(
            N == 32 || value >> N == 0,
            "value {value:#x} does not fit in {N} bits"
        );
        Self(value)
    }

    /// Extract bits `[lsb + N - 1 : lsb]` of `insn`.
    pub fn from_insn(insn: u32, lsb: u32) -> Self {
        let field = (u64::from(insn) >> lsb) & width_mask(N);
        Self::new(field as u32)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn zero_extend(self) -> u64 {
        u64::from(self.0)
    }

    /// Zero-extend to a `width`-bit value, `N <= width <= 64`.
    pub fn zero_extend_to(self, width: u32) -> u64 {
        assert!(
            (N..=64).contains(&width),
            "cannot zero-extend {N} bits to {width}"
        );
        u64::from(self.0)
    }

    pub fn sign_extend(self) -> i64 {
        let shift = 64 - N;
        ((u64::from(self.0) << shift) as i64) >> shift
    }

    /// Sign-extend to a `width`-bit value, returned as its raw bit
    /// pattern (bits above `width` clear).
    pub fn sign_extend_to(self, width: u32) -> u64 {
        assert!(
            (N..=64).contains(&width),
            "cannot sign-extend {N} bits to {width}"
        );
        self.sign_extend() as u64 & width_mask(width)
    }

    /// Bit `pos` of the field, `pos < N`.
    pub fn bit(self, pos: u32) -> bool {
        assert!(pos < N, "bit {pos} out of range for a {N}-bit immediate");
        (self.0 >> pos) & 1 != 0
    }
}

impl<const N: u32> fmt::Debug for Imm<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imm<{N}>({:#x})", self.0)
    }
}

const fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
