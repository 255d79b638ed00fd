use crate::types::Type;

/// Lifetime/scope of an IR temporary.
///
/// Maps to QEMU's `TCGTempKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TempKind {
    /// Live within a single extended basic block.
    Ebb,
    /// Global, persists across blocks, backed by a CPU state field.
    Global,
    /// Fixed to a specific host register (the env pointer).
    Fixed,
    /// Compile-time constant.
    Const,
}

/// Index into the Context's temp pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempIdx(pub u32);

/// An IR temporary: the symbolic handle an op produces or consumes.
///
/// Maps to QEMU's `TCGTemp`, minus the register allocator state which
/// belongs to the emitter.
#[derive(Debug, Clone)]
pub struct Temp {
    pub idx: TempIdx,
    pub ty: Type,
    pub kind: TempKind,

    /// For `Const` temps, the immediate value (masked to `ty`).
    pub val: u64,
    /// For `Global` temps, the base temp (env pointer) index.
    pub mem_base: Option<TempIdx>,
    /// For `Global` temps, the offset from mem_base into the CPU state.
    pub mem_offset: i64,
    /// For `Fixed` temps, the host register number.
    pub reg: Option<u8>,

    /// Debug name (e.g. "pc", "sp").
    pub name: Option<&'static str>,
}

impl Temp {
    pub fn new_ebb(idx: TempIdx, ty: Type) -> Self {
        Self {
            idx,
            ty,
            kind: TempKind::Ebb,
            val: 0,
            mem_base: None,
            mem_offset: 0,
            reg: None,
            name: None,
        }
    }

    pub fn new_const(idx: TempIdx, ty: Type, val: u64) -> Self {
        Self {
            kind: TempKind::Const,
            val,
            ..Self::new_ebb(idx, ty)
        }
    }

    pub fn new_global(
        idx: TempIdx,
        ty: Type,
        base: TempIdx,
        offset: i64,
        name: &'static str,
    ) -> Self {
        Self {
            kind: TempKind::Global,
            mem_base: Some(base),
            mem_offset: offset,
            name: Some(name),
            ..Self::new_ebb(idx, ty)
        }
    }

    pub fn new_fixed(idx: TempIdx, ty: Type, reg: u8, name: &'static str) -> Self {
        Self {
            kind: TempKind::Fixed,
            reg: Some(reg),
            name: Some(name),
            ..Self::new_ebb(idx, ty)
        }
    }

    pub fn is_const(&self) -> bool {
        self.kind == TempKind::Const
    }

    pub fn is_global(&self) -> bool {
        self.kind == TempKind::Global
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == TempKind::Fixed
    }
}
