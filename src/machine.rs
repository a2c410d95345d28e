use std::fmt;

use crate::{
    decode::OpCodes,
    display::{FrameBuffer, HEIGHT, WIDTH},
    error::Chip8Error,
    memory::Memory,
    registers::Registers,
    timer::Timer,
};

/// The whole interpreter state plus the fetch-decode-execute cycle.
///
/// A host calls [`Machine::step`] repeatedly and checks
/// [`Machine::display_updated`] afterwards to decide whether to redraw.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    pub regs: Registers,
    pub mem: Memory,
    pub fb: FrameBuffer,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    current_opcode: u16,
    display_updated: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            fb: FrameBuffer::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            current_opcode: 0,
            display_updated: false,
        }
    }

    /// Copies an 80 byte glyph table to 0x050. Memory is untouched on error.
    pub fn load_font(&mut self, font: &[u8]) -> Result<(), Chip8Error> {
        self.mem.load_font(font)?;
        tracing::debug!("loaded {} bytes of font data", font.len());
        Ok(())
    }

    /// Copies a program image to 0x200 and resets the PC there.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.mem.load_rom(rom)?;
        tracing::debug!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    pub fn current_opcode(&self) -> u16 {
        self.current_opcode
    }

    /// Whether the last completed step touched the display.
    pub fn display_updated(&self) -> bool {
        self.display_updated
    }

    pub fn fetch_decode(&self) -> Result<(u16, OpCodes), Chip8Error> {
        let ins = self.mem.next_instruction()?;
        Ok((ins, OpCodes::decode_raw(ins)?))
    }

    /// Runs one cycle. On error nothing observable has changed.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let (ins, operation) = self.fetch_decode()?;
        tracing::trace!(
            "pc: {:#05x}, opcode: {:04x}, {:?}",
            self.mem.pc.0,
            ins,
            operation
        );

        let pc = self.mem.pc;
        self.mem.increment_pc();
        let display_updated = match self.execute_ins(operation) {
            Ok(updated) => updated,
            Err(err) => {
                self.mem.pc = pc;
                return Err(err);
            }
        };

        self.current_opcode = ins;
        self.display_updated = display_updated;
        self.sync_timers();
        Ok(())
    }

    /// Applies a decoded instruction. Returns true if the display changed.
    /// Fallible instructions check before mutating anything.
    pub fn execute_ins(&mut self, ins: OpCodes) -> Result<bool, Chip8Error> {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
                return Ok(true);
            }
            OpCodes::PopSubroutine => {
                let addr = self.mem.stack.pop().ok_or(Chip8Error::EmptyStack)?;
                self.mem.set_pc(addr);
            }
            OpCodes::Jump(addr) => {
                self.mem.set_pc(addr);
            }
            OpCodes::PushSubroutine(addr) => {
                self.mem.stack.push(self.mem.pc.0); // return to the instruction after the call
                self.mem.set_pc(addr);
            }
            OpCodes::SkipEqualConstant(vx, nn) => {
                if self.regs.get(vx) == nn {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipNotEqualConstant(vx, nn) => {
                if self.regs.get(vx) != nn {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                if self.regs.get(vx) == self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                if self.regs.get(vx) != self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SetRegister(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            OpCodes::AddToRegister(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            OpCodes::Add(vx, vy) => {
                let (z, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_register(vx, z);
                self.regs.set_flag(carry);
            }
            OpCodes::SubtractForward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, x.wrapping_sub(y));
                self.regs.set_flag(x >= y); // no borrow
            }
            OpCodes::SubtractBackward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, y.wrapping_sub(x));
                self.regs.set_flag(y >= x); // no borrow
            }
            OpCodes::RightShift(vx, _) => {
                let vx_value = self.regs.get(vx);

                let vf = vx_value & 1;
                let vx_value = vx_value >> 1;

                self.regs.set_register(vx, vx_value);
                self.regs.set_flag(vf == 1);
            }
            OpCodes::LeftShift(vx, _) => {
                let vx_value = self.regs.get(vx);

                let vf = (vx_value >> 7) & 1;
                let vx_value = vx_value << 1;

                self.regs.set_register(vx, vx_value);
                self.regs.set_flag(vf == 1);
            }
            OpCodes::SetIndexRegister(addr) => self.mem.set_index(addr),
            OpCodes::Display(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                // rows clipped at the bottom edge are never read
                let rows = (height as usize).min(HEIGHT - y as usize % HEIGHT);
                let sprite = self.mem.slice(self.mem.index.0, rows)?;
                let vf = self.fb.paint(x, y, sprite);
                self.regs.set_flag(vf);
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn sync_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PC={:04X}, IR={:04X}", self.mem.pc.0, self.mem.index.0)?;
        for (i, v) in self.regs.as_slice().iter().enumerate() {
            write!(f, "{i:02}={v:02X}, ")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Memory: ")?;
        for (a, byte) in self.mem.bytes().iter().enumerate() {
            if a % 32 == 0 {
                write!(f, "{a:04} {a:03X}: ")?;
            }
            write!(f, "{byte:02X} ")?;
            if a % 32 == 31 {
                writeln!(f)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Display:")?;
        for w in 0..WIDTH {
            write!(f, "{}", w % 10)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.fb)
    }
}
