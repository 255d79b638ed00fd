//! Per-translator configuration.
//!
//! Mirrors the const-profile style of a CPU config struct: plain data,
//! `Copy`, with named profiles and a `Default`.

use a64_ir::context::MAX_INSNS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct A64Cfg {
    /// Upper bound on guest instructions per block.
    pub max_insns: u32,
    /// Emit a 16-byte `align_check` whenever SP is used as a base
    /// register.
    pub check_sp_alignment: bool,
    /// Fixed-register number handed to the backend for the env
    /// pointer. Which host register it names is the backend's choice.
    pub env_reg: u8,
}

// ── Predefined profiles ──────────────────────────────────────────

impl A64Cfg {
    /// Plain user-mode translation, no SP alignment checks.
    pub const USER: Self = Self {
        max_insns: MAX_INSNS as u32,
        check_sp_alignment: false,
        env_reg: 5,
    };

    /// User-mode translation with SP alignment checking enabled.
    pub const USER_STRICT_SP: Self = Self {
        check_sp_alignment: true,
        ..Self::USER
    };

    /// Same profile with a different block length limit.
    pub const fn with_max_insns(self, max_insns: u32) -> Self {
        Self { max_insns, ..self }
    }

    /// Same profile with the env pointer pinned to `env_reg`.
    pub const fn with_env_reg(self, env_reg: u8) -> Self {
        Self { env_reg, ..self }
    }
}

impl Default for A64Cfg {
    fn default() -> Self {
        Self::USER
    }
}
