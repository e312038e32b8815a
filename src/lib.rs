// Machine
mod alu;
pub use alu::{AluOp, AluOutput};
mod flags;
pub use flags::Flag;
mod isa;
pub use isa::{Instr, Opcode};
mod memory;
pub use memory::{Memory, MEMORY_SIZE};
mod registers;
pub use registers::{Register, RegisterFile, STACK_START};

// Running
mod runtime;
pub use runtime::{RunState, Termination};
mod loader;
pub use loader::{read_source, Image};
mod output;
pub use output::{Output, Trace};

pub mod error;
pub use error::{BoundsError, Fault, LoadError};

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 2;
