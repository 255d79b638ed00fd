use crate::types::Type;

/// IR opcodes.
///
/// Integer ops (marked with `OpFlags::INT`) are type-polymorphic; the
/// actual type is carried in `Op::op_type`. For conversions and
/// extensions `op_type` is the *result* type and the source width comes
/// from the input temp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // -- Data movement --
    Mov = 0,

    // -- Arithmetic --
    Add,

    // -- Width conversion --
    ExtU,  // zero-extend to op_type
    ExtS,  // sign-extend to op_type
    Trunc, // keep the low op_type bits

    // -- CPU state load/store (env-relative) --
    Ld,
    St,

    // -- Guest memory access --
    GuestLd,
    GuestSt,

    // -- Floating-point <-> fixed-point --
    FpToFixedS,
    FpToFixedU,
    FixedToFpS,
    FixedToFpU,

    // -- Checks --
    AlignCheck, // raise an alignment fault if the value is misaligned

    // -- Block structure --
    InsnStart, // marks guest instruction boundary
    ExitTb,    // return from the block to the execution loop

    // Sentinel, must be last
    Count,
}

/// Flags describing properties of an opcode.
///
/// Maps to QEMU's `TCG_OPF_*` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpFlags(u16);

impl OpFlags {
    pub const NONE: OpFlags = OpFlags(0);
    /// Exits the translation block.
    pub const BB_EXIT: OpFlags = OpFlags(0x01);
    /// Ends a basic block (next op starts a new BB).
    pub const BB_END: OpFlags = OpFlags(0x02);
    /// Clobbers caller-saved registers (like a function call).
    pub const CALL_CLOBBER: OpFlags = OpFlags(0x04);
    /// Has side effects, cannot be eliminated by DCE.
    pub const SIDE_EFFECTS: OpFlags = OpFlags(0x08);
    /// Operands may be any integer width (type-polymorphic).
    pub const INT: OpFlags = OpFlags(0x10);
    /// Not directly emitted to host code (lowered earlier).
    pub const NOT_PRESENT: OpFlags = OpFlags(0x20);
    /// Touches guest memory.
    pub const GUEST_MEM: OpFlags = OpFlags(0x40);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: OpFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: OpFlags) -> Self {
        Self(self.0 | other.0)
    }
}

/// Static definition of an opcode: argument counts and flags.
///
/// Maps to QEMU's `TCGOpDef`.
#[derive(Debug, Clone, Copy)]
pub struct OpDef {
    pub name: &'static str,
    pub nb_oargs: u8,
    pub nb_iargs: u8,
    pub nb_cargs: u8,
    pub flags: OpFlags,
}

impl OpDef {
    pub const fn nb_args(&self) -> u8 {
        self.nb_oargs + self.nb_iargs + self.nb_cargs
    }
}

const fn def(
    name: &'static str,
    nb_oargs: u8,
    nb_iargs: u8,
    nb_cargs: u8,
    flags: OpFlags,
) -> OpDef {
    OpDef {
        name,
        nb_oargs,
        nb_iargs,
        nb_cargs,
        flags,
    }
}

const INT: OpFlags = OpFlags::INT;
const NP: OpFlags = OpFlags::NOT_PRESENT;
const SE: OpFlags = OpFlags::SIDE_EFFECTS;
const CC: OpFlags = OpFlags::CALL_CLOBBER;
const BE: OpFlags = OpFlags::BB_END;
const BX: OpFlags = OpFlags::BB_EXIT;
const GM: OpFlags = OpFlags::GUEST_MEM;

/// Static opcode definition table, indexed by `Opcode as usize`.
pub static OPCODE_DEFS: [OpDef; Opcode::Count as usize] = [
    def("mov", 1, 1, 0, INT.union(NP)),
    def("add", 1, 2, 0, INT),
    def("extu", 1, 1, 0, INT),
    def("exts", 1, 1, 0, INT),
    def("trunc", 1, 1, 0, INT),
    // cargs: offset
    def("ld", 1, 1, 1, INT),
    def("st", 0, 2, 1, INT.union(SE)),
    // cargs: memop, acctype
    def("guest_ld", 1, 1, 2, INT.union(CC).union(SE).union(GM)),
    def("guest_st", 0, 2, 2, INT.union(CC).union(SE).union(GM)),
    // cargs: fbits, rounding mode
    def("fp_to_fixed_s", 1, 1, 2, INT),
    def("fp_to_fixed_u", 1, 1, 2, INT),
    def("fixed_to_fp_s", 1, 1, 2, INT),
    def("fixed_to_fp_u", 1, 1, 2, INT),
    // cargs: alignment in bytes
    def("align_check", 0, 1, 1, INT.union(SE)),
    // cargs: pc_lo, pc_hi
    def("insn_start", 0, 0, 2, NP),
    // cargs: exit code
    def("exit_tb", 0, 0, 1, BX.union(BE).union(NP)),
];

impl Opcode {
    /// Look up the static definition for this opcode.
    pub fn def(self) -> &'static OpDef {
        &OPCODE_DEFS[self as usize]
    }

    /// Return the fixed IR type this opcode operates on, if not type-polymorphic.
    pub fn fixed_type(self) -> Option<Type> {
        match self {
            Opcode::InsnStart | Opcode::ExitTb => Some(Type::I64),
            _ => None,
        }
    }

    /// Whether this opcode is type-polymorphic.
    pub fn is_int_polymorphic(self) -> bool {
        self.def().flags.contains(OpFlags::INT)
    }

    /// Whether this opcode accesses guest memory.
    pub fn is_guest_mem(self) -> bool {
        self.def().flags.contains(OpFlags::GUEST_MEM)
    }
}
