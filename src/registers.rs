use crate::memory::TypeAddr;

/// VF doubles as the carry/borrow/collision flag.
pub const FLAG_REGISTER: u8 = 0xF;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[reg_num as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let reg = &mut self.registers[reg_num as usize];
        *reg = reg.wrapping_add(value);
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG_REGISTER, flag as u8);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[reg_num as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    // past the end of memory only shows up on the next fetch
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2);
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_to_register_wraps() {
        let mut regs = Registers::new();
        regs.set_register(1, 0xF0);
        regs.add_to_register(1, 0x23);
        assert_eq!(regs.get(1), 0x13);
        assert_eq!(regs.get(FLAG_REGISTER), 0);
    }

    #[test]
    fn set_flag_writes_vf() {
        let mut regs = Registers::new();
        regs.set_flag(true);
        assert_eq!(regs.get(0xF), 1);
        regs.set_flag(false);
        assert_eq!(regs.get(0xF), 0);
    }

    #[test]
    fn program_counter_steps_by_word() {
        let mut pc = ProgramCounter(0x200);
        pc.increment();
        assert_eq!(pc.0, 0x202);
        pc.set_addr(0x398);
        assert_eq!(pc, ProgramCounter(0x398));
    }
}
