use crate::{
    error::Chip8Error,
    registers::{IndexRegister, ProgramCounter},
};

pub type TypeAddr = u16; // in reality u12
pub type FontBytes = [u8; FONT_SIZE];

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const FONT_START: TypeAddr = 0x050;
/// 16 glyphs, 5 rows each.
pub const FONT_SIZE: usize = 5 * 16;

pub const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Debug, Clone)]
pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F (000 -> 04F is empty by convention)
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    /// Panics if `addr` is not below 0x1000.
    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[addr as usize] = val;
    }

    /// Panics if `addr` is not below 0x1000.
    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `len` bytes starting at `addr`, or the first address that falls outside memory.
    pub fn slice(&self, addr: TypeAddr, len: usize) -> Result<&[u8], Chip8Error> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(&self.bytes[start..end])
    }

    /// Big-endian word at the program counter. Does not advance it.
    pub fn next_instruction(&self) -> Result<u16, Chip8Error> {
        let pc = self.pc.0;
        if pc as usize > MEMORY_SIZE - 2 {
            return Err(Chip8Error::ProgramCounterOutOfBounds { pc });
        }
        let (l, r) = (self.bytes[pc as usize], self.bytes[pc as usize + 1]);
        Ok(((l as u16) << 8) | r as u16)
    }

    pub fn increment_pc(&mut self) {
        self.pc.increment();
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    /// Copies program bytes to 0x200 and points the PC at them.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<(), Chip8Error> {
        let start_index = PROGRAM_START as usize;
        let max_size = MEMORY_SIZE - start_index;
        if bytes.len() > max_size {
            return Err(Chip8Error::RomTooLarge {
                size: bytes.len(),
                max_size,
            });
        }
        self.bytes[start_index..start_index + bytes.len()].copy_from_slice(bytes);
        self.set_pc(PROGRAM_START);
        Ok(())
    }

    pub fn load_font(&mut self, font: &[u8]) -> Result<(), Chip8Error> {
        if font.len() != FONT_SIZE {
            return Err(Chip8Error::InvalidFont {
                expected: FONT_SIZE,
                actual: font.len(),
            });
        }
        let start_index = FONT_START as usize;
        self.bytes[start_index..start_index + FONT_SIZE].copy_from_slice(font);
        Ok(())
    }
}

/// Return addresses. Depth is not capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    addresses: Vec<TypeAddr>,
}

impl Stack {
    pub fn new() -> Self {
        Self { addresses: vec![] }
    }

    pub fn push(&mut self, addr: TypeAddr) {
        self.addresses.push(addr)
    }

    pub fn pop(&mut self) -> Option<TypeAddr> {
        self.addresses.pop()
    }

    pub fn peek(&self) -> Option<TypeAddr> {
        self.addresses.last().copied()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn as_slice(&self) -> &[TypeAddr] {
        &self.addresses
    }
}
