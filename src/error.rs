/// Everything that can stop a load or a cycle.
///
/// Loading errors leave memory untouched; cycle errors leave the whole machine
/// as it was before `step` was called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("font data should be {expected} bytes, received {actual}")]
    InvalidFont { expected: usize, actual: usize },

    #[error("PC ({pc:#06X}) is out of memory bounds")]
    ProgramCounterOutOfBounds { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("return with an empty call stack")]
    EmptyStack,

    #[error("unknown opcode: {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },
}
