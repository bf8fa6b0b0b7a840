use thiserror::Error;

/// A condition that stops the machine.
///
/// None of these are recoverable from inside the machine; the host has to
/// `reset`, `rewind` or give up.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#05X} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at {address:#06X} (pc {pc:#05X})")]
    MemoryOutOfBounds { address: usize, pc: u16 },
}

impl Fault {
    /// Address of the instruction that caused the fault.
    pub fn pc(&self) -> u16 {
        match *self {
            Fault::UnknownOpcode { pc, .. }
            | Fault::StackOverflow { pc }
            | Fault::StackUnderflow { pc }
            | Fault::MemoryOutOfBounds { pc, .. } => pc,
        }
    }
}

/// Why a ROM could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("ROM is empty")]
    Empty,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },
}

/// Whatever a display adapter failed with.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;
