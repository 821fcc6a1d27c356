use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    SPRITE_SHEET_ADDRESS, STACK_SIZE,
};
use crate::error::Chip8Error;
use crate::rom::Rom;

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (registers) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (index_register) a 16-bit memory address register, usually called I
///
/// Counter
/// - (program_counter) address of the next opcode
///
/// Timers
/// - 2 8-bit timers (delay & sound), counting down at 60Hz
///
/// ## Memory
/// - 16 level stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet; 0x000..0x200 is read-only to programs
///     - 0x200.. holds the ROM
/// - 64x32 frame buffer
///
/// ## Input
/// - the key currently held down on the hexadecimal keypad, if any
#[derive(Clone)]
pub struct State {
    pub registers: [u8; 16],
    pub index_register: u16,
    pub program_counter: u16,
    pub stack_pointer: usize,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub pressed_key: Option<u8>,
}

impl State {
    /// A zeroed state with the sprite sheet installed and the program counter at the start of
    /// program memory.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let sheet = SPRITE_SHEET_ADDRESS as usize;
        memory[sheet..sheet + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            registers: [0; 16],
            index_register: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            pressed_key: None,
        }
    }

    /// A fresh state with `rom` copied to `PROGRAM_START`.
    pub fn with_rom(rom: &Rom) -> Self {
        let mut state = State::new();
        let start = PROGRAM_START as usize;
        state.memory[start..start + rom.len()].copy_from_slice(rom.bytes());
        state
    }

    /// Reads the byte at `addr`, masked into the 4K address space.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes `value` at `addr`, masked into the 4K address space.
    ///
    /// Everything below `PROGRAM_START` is reserved for the sprite sheet, which only a reset
    /// may rewrite, so writes there are dropped.
    pub fn write(&mut self, addr: u16, value: u8) {
        let addr = addr & ADDRESS_MASK;
        if addr < PROGRAM_START {
            return;
        }
        self.memory[addr as usize] = value;
    }

    /// Gets the opcode at `addr`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn opcode_at(&self, addr: u16) -> u16 {
        let left = u16::from(self.read(addr));
        let right = u16::from(self.read(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Pushes a return address, failing rather than overwriting once the stack is full.
    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.stack_pointer >= STACK_SIZE {
            return Err(Chip8Error::StackOverflow {
                pc: self.program_counter,
            });
        }
        self.stack[self.stack_pointer] = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.stack_pointer == 0 {
            return Err(Chip8Error::StackUnderflow {
                pc: self.program_counter,
            });
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    /// Counts both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Whether the pixel at `x`, `y` is lit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y][x] == 1
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
