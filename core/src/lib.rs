//! Block-level IR for the A64 front end.
//!
//! A TCG-style, expression-based op list: each op names its output
//! temps, input temps and constant arguments. Front ends append ops to a
//! [`Context`]; consumers read them back in order.

pub mod context;
pub mod dump;
pub mod ir_builder;
pub mod op;
pub mod opcode;
pub mod temp;
pub mod types;

pub use context::Context;
pub use op::{Op, OpIdx, MAX_OP_ARGS};
pub use opcode::{OpDef, OpFlags, Opcode, OPCODE_DEFS};
pub use temp::{Temp, TempIdx, TempKind};
pub use types::{AccType, MemOp, RoundingMode, Type};
