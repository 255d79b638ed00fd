/// IR value types.
///
/// The width of an IR operand. Guest floating-point values travel as
/// integer-typed raw bits of the same width (I32 for single, I64 for
/// double), the same way TCG carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Type {
    I8 = 0,
    I16 = 1,
    I32 = 2,
    I64 = 3,
}

pub const TYPE_COUNT: usize = 4;

impl Type {
    pub const fn size_bits(self) -> u32 {
        match self {
            Type::I8 => 8,
            Type::I16 => 16,
            Type::I32 => 32,
            Type::I64 => 64,
        }
    }

    pub const fn size_bytes(self) -> u32 {
        self.size_bits() / 8
    }

    /// Type holding exactly `bits` bits.
    ///
    /// Panics on widths other than 8/16/32/64; every caller derives the
    /// width from a decoded size field, so anything else is a translator
    /// bug.
    pub const fn from_bits(bits: u32) -> Type {
        match bits {
            8 => Type::I8,
            16 => Type::I16,
            32 => Type::I32,
            64 => Type::I64,
            _ => panic!("unsupported IR value width"),
        }
    }

    /// Type of a `bytes`-wide memory access.
    pub const fn from_bytes(bytes: u32) -> Type {
        Type::from_bits(bytes * 8)
    }

    /// All-ones mask covering this type's width.
    pub const fn mask(self) -> u64 {
        match self {
            Type::I64 => u64::MAX,
            _ => (1u64 << self.size_bits()) - 1,
        }
    }
}

/// Guest memory operation descriptor.
///
/// Bit-packed like QEMU's `MemOp`: the low two bits hold log2 of the
/// access size in bytes. Loads are always zero-filled into the result
/// type; widening to a register is an explicit extension op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemOp(u16);

impl MemOp {
    pub const SIZE_8: u16 = 0;
    pub const SIZE_16: u16 = 1;
    pub const SIZE_32: u16 = 2;
    pub const SIZE_64: u16 = 3;

    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn ub() -> Self {
        Self(Self::SIZE_8)
    }
    pub const fn uw() -> Self {
        Self(Self::SIZE_16)
    }
    pub const fn ul() -> Self {
        Self(Self::SIZE_32)
    }
    pub const fn uq() -> Self {
        Self(Self::SIZE_64)
    }

    /// Descriptor for a `bytes`-wide access (1, 2, 4 or 8).
    pub const fn for_bytes(bytes: u32) -> Self {
        match bytes {
            1 => Self::ub(),
            2 => Self::uw(),
            4 => Self::ul(),
            8 => Self::uq(),
            _ => panic!("unsupported memory access width"),
        }
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
    pub const fn size(self) -> u16 {
        self.0 & 0x3
    }
    pub const fn size_bytes(self) -> u32 {
        1 << self.size()
    }
}

/// Access classification of a guest memory operation.
///
/// Carried verbatim on every guest load/store so the memory system can
/// pick permission and ordering rules when the access executes. The
/// discriminants are part of the op encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccType {
    Normal = 0,
    Vec = 1,
    Stream = 2,
    VecStream = 3,
    Atomic = 4,
    Exclusive = 5,
    Ordered = 6,
    OrderedRw = 7,
    LimitedOrdered = 8,
    /// EL0 permission checks regardless of the current exception level.
    Unpriv = 9,
    IFetch = 10,
    Ptw = 11,
}

impl AccType {
    pub const fn from_raw(v: u32) -> Option<AccType> {
        Some(match v {
            0 => AccType::Normal,
            1 => AccType::Vec,
            2 => AccType::Stream,
            3 => AccType::VecStream,
            4 => AccType::Atomic,
            5 => AccType::Exclusive,
            6 => AccType::Ordered,
            7 => AccType::OrderedRw,
            8 => AccType::LimitedOrdered,
            9 => AccType::Unpriv,
            10 => AccType::IFetch,
            11 => AccType::Ptw,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            AccType::Normal => "normal",
            AccType::Vec => "vec",
            AccType::Stream => "stream",
            AccType::VecStream => "vecstream",
            AccType::Atomic => "atomic",
            AccType::Exclusive => "exclusive",
            AccType::Ordered => "ordered",
            AccType::OrderedRw => "orderedrw",
            AccType::LimitedOrdered => "limitedordered",
            AccType::Unpriv => "unpriv",
            AccType::IFetch => "ifetch",
            AccType::Ptw => "ptw",
        }
    }
}

/// Floating-point rounding mode, numbered as in FPCR.RMode with the
/// non-FPCR modes following.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RoundingMode {
    #[default]
    ToNearestTieEven = 0,
    TowardsPlusInfinity = 1,
    TowardsMinusInfinity = 2,
    TowardsZero = 3,
    ToNearestTieAwayFromZero = 4,
    ToOdd = 5,
}

impl RoundingMode {
    pub const fn from_raw(v: u32) -> Option<RoundingMode> {
        Some(match v {
            0 => RoundingMode::ToNearestTieEven,
            1 => RoundingMode::TowardsPlusInfinity,
            2 => RoundingMode::TowardsMinusInfinity,
            3 => RoundingMode::TowardsZero,
            4 => RoundingMode::ToNearestTieAwayFromZero,
            5 => RoundingMode::ToOdd,
            _ => return None,
        })
    }

    /// Mode selected by the two-bit FPCR.RMode field.
    pub const fn from_fpcr_rmode(rmode: u32) -> RoundingMode {
        match rmode & 3 {
            0 => RoundingMode::ToNearestTieEven,
            1 => RoundingMode::TowardsPlusInfinity,
            2 => RoundingMode::TowardsMinusInfinity,
            _ => RoundingMode::TowardsZero,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RoundingMode::ToNearestTieEven => "rn",
            RoundingMode::TowardsPlusInfinity => "rp",
            RoundingMode::TowardsMinusInfinity => "rm",
            RoundingMode::TowardsZero => "rz",
            RoundingMode::ToNearestTieAwayFromZero => "ra",
            RoundingMode::ToOdd => "ro",
        }
    }
}
