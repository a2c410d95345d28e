use crate::{error::Chip8Error, memory::TypeAddr};

/// A fetched instruction word, split into its operand fields on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    code: u16,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction { code }
    }

    // word layout: KXYN, NN = YN, NNN = XYN

    /// High nibble, selects the instruction family.
    pub fn kind(&self) -> u8 {
        (self.code >> 12) as u8
    }

    pub fn x(&self) -> u8 {
        ((self.code >> 8) & 0xF) as u8
    }

    pub fn y(&self) -> u8 {
        ((self.code >> 4) & 0xF) as u8
    }

    pub fn n(&self) -> u8 {
        (self.code & 0xF) as u8
    }

    pub fn nn(&self) -> u8 {
        (self.code & 0xFF) as u8
    }

    pub fn nnn(&self) -> TypeAddr {
        self.code & 0x0FFF
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels off
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(u8, u8),
    // 4XNN
    SkipNotEqualConstant(u8, u8),
    // 5XY0
    SkipEqualRegister(u8, u8),
    // 9XY0
    SkipNotEqualRegister(u8, u8),

    // 6XNN
    SetRegister(u8, u8),
    // 7XNN
    // wraps, VF untouched
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    /// 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8, u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8, u8),

    // ANNN
    SetIndexRegister(TypeAddr),
    // DXYN
    // draw an N pixel tall sprite from I at (VX, VY), VF = collision
    Display(u8, u8, u8),
}

impl OpCodes {
    pub fn decode_raw(ins: u16) -> Result<Self, Chip8Error> {
        let raw = RawInstruction::new(ins);
        let (x, y) = (raw.x(), raw.y());
        let unknown = Err(Chip8Error::UnknownOpcode { opcode: ins });

        let op = match raw.kind() {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::PopSubroutine,
                _ => return unknown,
            },
            0x1 => Self::Jump(raw.nnn()),
            0x2 => Self::PushSubroutine(raw.nnn()),
            0x3 => Self::SkipEqualConstant(x, raw.nn()),
            0x4 => Self::SkipNotEqualConstant(x, raw.nn()),
            0x5 => Self::SkipEqualRegister(x, y),
            0x6 => Self::SetRegister(x, raw.nn()),
            0x7 => Self::AddToRegister(x, raw.nn()),
            0x8 => match raw.n() {
                0x0 => Self::CopyRegister(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::XOr(x, y),
                0x4 => Self::Add(x, y),
                0x5 => Self::SubtractForward(x, y),
                0x6 => Self::RightShift(x, y),
                0x7 => Self::SubtractBackward(x, y),
                0xE => Self::LeftShift(x, y),
                _ => return unknown,
            },
            0x9 => Self::SkipNotEqualRegister(x, y),
            0xA => Self::SetIndexRegister(raw.nnn()),
            0xD => Self::Display(x, y, raw.n()),
            _ => return unknown,
        };
        Ok(op)
    }
}

#[test]
fn test_operand_fields() {
    let raw = RawInstruction::new(0xD3A7);
    assert_eq!(raw.kind(), 0xD);
    assert_eq!(raw.x(), 0x3);
    assert_eq!(raw.y(), 0xA);
    assert_eq!(raw.n(), 0x7);
    assert_eq!(raw.nn(), 0xA7);
    assert_eq!(raw.nnn(), 0x3A7);
    assert!(raw == 0xD3A7);
}

#[test]
fn test_decode_families() {
    assert_eq!(OpCodes::decode_raw(0x00E0), Ok(OpCodes::ClearScreen));
    assert_eq!(OpCodes::decode_raw(0x00EE), Ok(OpCodes::PopSubroutine));
    assert_eq!(OpCodes::decode_raw(0x1ABC), Ok(OpCodes::Jump(0xABC)));
    assert_eq!(OpCodes::decode_raw(0x2398), Ok(OpCodes::PushSubroutine(0x398)));
    assert_eq!(OpCodes::decode_raw(0x3199), Ok(OpCodes::SkipEqualConstant(1, 0x99)));
    assert_eq!(OpCodes::decode_raw(0x4298), Ok(OpCodes::SkipNotEqualConstant(2, 0x98)));
    assert_eq!(OpCodes::decode_raw(0x5560), Ok(OpCodes::SkipEqualRegister(5, 6)));
    assert_eq!(OpCodes::decode_raw(0x6123), Ok(OpCodes::SetRegister(1, 0x23)));
    assert_eq!(OpCodes::decode_raw(0x7F23), Ok(OpCodes::AddToRegister(0xF, 0x23)));
    assert_eq!(OpCodes::decode_raw(0x812E), Ok(OpCodes::LeftShift(1, 2)));
    assert_eq!(OpCodes::decode_raw(0x9780), Ok(OpCodes::SkipNotEqualRegister(7, 8)));
    assert_eq!(OpCodes::decode_raw(0xA123), Ok(OpCodes::SetIndexRegister(0x123)));
    assert_eq!(OpCodes::decode_raw(0xD012), Ok(OpCodes::Display(0, 1, 2)));
}

#[test]
fn test_decode_alu_sub_opcodes() {
    let expected = [
        (0x0, OpCodes::CopyRegister(1, 2)),
        (0x1, OpCodes::Or(1, 2)),
        (0x2, OpCodes::And(1, 2)),
        (0x3, OpCodes::XOr(1, 2)),
        (0x4, OpCodes::Add(1, 2)),
        (0x5, OpCodes::SubtractForward(1, 2)),
        (0x6, OpCodes::RightShift(1, 2)),
        (0x7, OpCodes::SubtractBackward(1, 2)),
        (0xE, OpCodes::LeftShift(1, 2)),
    ];
    for (sub, op) in expected {
        assert_eq!(OpCodes::decode_raw(0x8120 | sub), Ok(op));
    }
    for sub in [0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
        let opcode = 0x8120 | sub;
        assert_eq!(
            OpCodes::decode_raw(opcode),
            Err(Chip8Error::UnknownOpcode { opcode })
        );
    }
}

#[test]
fn test_decode_unknown() {
    for opcode in [0x0000, 0x00E1, 0x0123, 0xB123, 0xC0FF, 0xE09E, 0xF055, 0xFFFF] {
        assert_eq!(
            OpCodes::decode_raw(opcode),
            Err(Chip8Error::UnknownOpcode { opcode })
        );
    }
}
