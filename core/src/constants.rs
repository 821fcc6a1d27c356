/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;
/// Mask applied to every computed memory address
pub const ADDRESS_MASK: u16 = 0x0FFF;
/// Where ROMs are loaded into memory and where execution begins
pub const PROGRAM_START: u16 = 0x200;
/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_SIZE: usize = 16;

/// Frequency at which the delay and sound timers count down
pub const TIMER_FREQUENCY: u32 = 60;
/// Default number of instructions executed per second
pub const CLOCK_SPEED: u32 = 500;

/// Where the sprite sheet starts in memory
pub const SPRITE_SHEET_ADDRESS: u16 = 0x000;
/// Bytes per hexadecimal digit sprite
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite sheet
/// Each hexadecimal digit 0..F is drawn as a 4x5 sprite, one byte per row with
/// the leftmost pixel in the most significant bit.
///
/// ```text
/// 0xF0  ████
/// 0x90  █  █
/// 0x90  █  █
/// 0x90  █  █
/// 0xF0  ████
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
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
