use thiserror::Error;

/// Why a guest instruction produced no IR.
///
/// Every variant leaves the IR context untouched for that instruction;
/// the translation loop turns it into a block exit so the guest sees
/// the fault when the block runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// No decoder pattern covers the word.
    #[error("no decoder pattern matches {insn:#010x} at pc {pc:#x}")]
    NoMatch { pc: u64, insn: u32 },
    /// A pattern matched but the handler rejected the field combination.
    #[error("unallocated encoding {insn:#010x} at pc {pc:#x}")]
    Unallocated { pc: u64, insn: u32 },
    /// The instruction word could not be read from the code window.
    #[error("instruction fetch failed at pc {pc:#x}")]
    FetchFault { pc: u64 },
}

impl TranslateError {
    pub fn pc(&self) -> u64 {
        match *self {
            TranslateError::NoMatch { pc, .. }
            | TranslateError::Unallocated { pc, .. }
            | TranslateError::FetchFault { pc } => pc,
        }
    }
}
