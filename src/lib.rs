// 16 8-bit data registers named V0 to VF, VF doubling as the flag register
// I -> index register (16 bits, used as a sprite base address)
//
// Return addresses live on an unbounded stack
//
// Delay timer & Sound timer: count down once per executed instruction until 0
//
// Display res: 64 width, 32 height
//
// Opcodes are 2 bytes (big-endian)
//      NNN: address
//      NN: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod decode;
pub mod display;
pub mod error;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod timer;

pub use decode::{OpCodes, RawInstruction};
pub use display::FrameBuffer;
pub use error::Chip8Error;
pub use machine::Machine;
pub use memory::DEFAULT_FONT;
