pub use chip8::{Chip8, StepState};
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_ROM_SIZE, TIMER_FREQUENCY};
pub use error::{Chip8Error, RomError};
pub use instruction::Instruction;
pub use rom::Rom;
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
mod operations;
mod rom;
pub mod state;
