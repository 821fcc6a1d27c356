use std::fmt;

use crate::chip8::StepState;
use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instructions
/// Every opcode the Chip-8 understands, with its operands already pulled out of the opcode.
///
/// `x` and `y` name registers, `kk` is an immediate byte, `addr` a 12-bit address and `n` a
/// sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Return,
    Jump(u16),
    Call(u16),
    SkipEqualByte(u8, u8),
    SkipNotEqualByte(u8, u8),
    SkipEqualRegister(u8, u8),
    LoadByte(u8, u8),
    AddByte(u8, u8),
    Move(u8, u8),
    Or(u8, u8),
    And(u8, u8),
    Xor(u8, u8),
    AddRegister(u8, u8),
    Subtract(u8, u8),
    ShiftRight(u8),
    SubtractReverse(u8, u8),
    ShiftLeft(u8),
    SkipNotEqualRegister(u8, u8),
    LoadIndex(u16),
    JumpOffset(u16),
    Random(u8, u8),
    Draw(u8, u8, u8),
    SkipKeyPressed(u8),
    SkipKeyNotPressed(u8),
    LoadDelay(u8),
    WaitKey(u8),
    SetDelay(u8),
    SetSound(u8),
    AddIndex(u8),
    LoadSprite(u8),
    StoreBcd(u8),
    StoreRegisters(u8),
    LoadRegisters(u8),
}

impl Instruction {
    /// Selects the correct Instruction for a raw opcode
    pub fn decode(raw: u16) -> Result<Instruction, Chip8Error> {
        let op = Opcode::new(raw);
        let Opcode {
            x, y, n, nn: kk, nnn: addr, ..
        } = op;
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(addr),
            (0x2, ..) => Instruction::Call(addr),
            (0x3, ..) => Instruction::SkipEqualByte(x, kk),
            (0x4, ..) => Instruction::SkipNotEqualByte(x, kk),
            (0x5, .., 0x0) => Instruction::SkipEqualRegister(x, y),
            (0x6, ..) => Instruction::LoadByte(x, kk),
            (0x7, ..) => Instruction::AddByte(x, kk),
            (0x8, .., 0x0) => Instruction::Move(x, y),
            (0x8, .., 0x1) => Instruction::Or(x, y),
            (0x8, .., 0x2) => Instruction::And(x, y),
            (0x8, .., 0x3) => Instruction::Xor(x, y),
            (0x8, .., 0x4) => Instruction::AddRegister(x, y),
            (0x8, .., 0x5) => Instruction::Subtract(x, y),
            (0x8, .., 0x6) => Instruction::ShiftRight(x),
            (0x8, .., 0x7) => Instruction::SubtractReverse(x, y),
            (0x8, .., 0xE) => Instruction::ShiftLeft(x),
            (0x9, .., 0x0) => Instruction::SkipNotEqualRegister(x, y),
            (0xA, ..) => Instruction::LoadIndex(addr),
            (0xB, ..) => Instruction::JumpOffset(addr),
            (0xC, ..) => Instruction::Random(x, kk),
            (0xD, ..) => Instruction::Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyPressed(x),
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyNotPressed(x),
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay(x),
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey(x),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay(x),
            (0xF, _, 0x1, 0x8) => Instruction::SetSound(x),
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex(x),
            (0xF, _, 0x2, 0x9) => Instruction::LoadSprite(x),
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd(x),
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters(x),
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters(x),
            _ => return Err(Chip8Error::UndefinedOpcode { opcode: op.raw }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, including moving the program counter on.
    pub fn execute(self, state: &mut State) -> Result<StepState, Chip8Error> {
        match self {
            Instruction::ClearScreen => clear_screen(state),
            Instruction::Return => ret(state)?,
            Instruction::Jump(addr) => jump(state, addr),
            Instruction::Call(addr) => call(state, addr)?,
            Instruction::SkipEqualByte(x, kk) => skip_equal_byte(state, x, kk),
            Instruction::SkipNotEqualByte(x, kk) => skip_not_equal_byte(state, x, kk),
            Instruction::SkipEqualRegister(x, y) => skip_equal_register(state, x, y),
            Instruction::LoadByte(x, kk) => load_byte(state, x, kk),
            Instruction::AddByte(x, kk) => add_byte(state, x, kk),
            Instruction::Move(x, y) => mv(state, x, y),
            Instruction::Or(x, y) => or(state, x, y),
            Instruction::And(x, y) => and(state, x, y),
            Instruction::Xor(x, y) => xor(state, x, y),
            Instruction::AddRegister(x, y) => add_register(state, x, y),
            Instruction::Subtract(x, y) => sub(state, x, y),
            Instruction::ShiftRight(x) => shr(state, x),
            Instruction::SubtractReverse(x, y) => subn(state, x, y),
            Instruction::ShiftLeft(x) => shl(state, x),
            Instruction::SkipNotEqualRegister(x, y) => skip_not_equal_register(state, x, y),
            Instruction::LoadIndex(addr) => load_index(state, addr),
            Instruction::JumpOffset(addr) => jump_offset(state, addr),
            Instruction::Random(x, kk) => rand(state, x, kk),
            Instruction::Draw(x, y, n) => draw(state, x, y, n),
            Instruction::SkipKeyPressed(x) => skip_key_pressed(state, x),
            Instruction::SkipKeyNotPressed(x) => skip_key_not_pressed(state, x),
            Instruction::LoadDelay(x) => load_delay(state, x),
            Instruction::WaitKey(x) => return Ok(wait_key(state, x)),
            Instruction::SetDelay(x) => set_delay(state, x),
            Instruction::SetSound(x) => set_sound(state, x),
            Instruction::AddIndex(x) => add_index(state, x),
            Instruction::LoadSprite(x) => load_sprite(state, x),
            Instruction::StoreBcd(x) => bcd(state, x),
            Instruction::StoreRegisters(x) => store(state, x),
            Instruction::LoadRegisters(x) => read(state, x),
        }
        Ok(StepState::Running)
    }
}

/// Conventional Chip-8 assembler mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump(addr) => write!(f, "JP {:#05X}", addr),
            Instruction::Call(addr) => write!(f, "CALL {:#05X}", addr),
            Instruction::SkipEqualByte(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNotEqualByte(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqualRegister(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadByte(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddRegister(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Subtract(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight(x) => write!(f, "SHR V{:X}", x),
            Instruction::SubtractReverse(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            Instruction::SkipNotEqualRegister(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            Instruction::JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Random(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipKeyPressed(x) => write!(f, "SKP V{:X}", x),
            Instruction::SkipKeyNotPressed(x) => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelay(x) => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey(x) => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound(x) => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadSprite(x) => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
