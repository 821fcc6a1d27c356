use thiserror::Error;

use crate::constants::{MAX_ROM_SIZE, STACK_SIZE};

/// Faults raised while executing a program.
///
/// None of these can be recovered from at the instruction level; once one is
/// returned by `Chip8::step` the machine stays halted until it is reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("undefined opcode {opcode:#06X}")]
    UndefinedOpcode { opcode: u16 },

    #[error("stack overflow at {pc:#05X}: more than {max} nested calls", max = STACK_SIZE)]
    StackOverflow { pc: u16 },

    #[error("stack underflow at {pc:#05X}: return with an empty call stack")]
    StackUnderflow { pc: u16 },
}

/// Problems with a program image, detected before it reaches memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("ROM is {size} bytes but at most {max} fit in memory", max = MAX_ROM_SIZE)]
    TooLarge { size: usize },
}
