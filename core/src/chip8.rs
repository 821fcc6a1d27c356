use log::{info, warn};

use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::rom::Rom;
use crate::state::{FrameBuffer, State};

/// What the CPU is doing after a call to `Chip8::step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// The instruction completed and the program counter moved on.
    Running,
    /// The program is blocked on `LD Vx, K` until a key is pressed. Stepping again is safe.
    AwaitingKey,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `rom` it was started with so that it can be reset
///  - the first fatal `fault` hit while executing, if any
///
/// Supplies interfaces for:
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    rom: Rom,
    fault: Option<Chip8Error>,
}

impl Chip8 {
    /// A freshly initialised machine with `rom` loaded.
    pub fn new(rom: Rom) -> Self {
        Chip8 {
            state: State::with_rom(&rom),
            rom,
            fault: None,
        }
    }

    /// Throws away the current state and starts the ROM again from scratch.
    pub fn reset(&mut self) {
        info!("resetting with a {} byte ROM", self.rom.len());
        self.state = State::with_rom(&self.rom);
        self.fault = None;
    }

    /// Read-only view of the machine, e.g. for tracing.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The fault that halted the machine, if any.
    pub fn fault(&self) -> Option<&Chip8Error> {
        self.fault.as_ref()
    }

    /// Sets the key currently held down on the keypad, or `None` once it is released.
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key, 0x0..=0xF
    pub fn set_key(&mut self, key: Option<u8>) {
        self.state.pressed_key = key.map(|k| k & 0xF);
    }

    /// Advances the CPU by a single cycle
    /// - fails again with the same error if an earlier cycle faulted
    /// - gets, decodes and executes the next opcode
    pub fn step(&mut self) -> Result<StepState, Chip8Error> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let op = self.current_opcode();
        let result =
            Instruction::decode(op).and_then(|instruction| instruction.execute(&mut self.state));

        if let Err(fault) = &result {
            warn!("halting at {:#05X}: {}", self.state.program_counter, fault);
            self.fault = Some(fault.clone());
        }
        result
    }

    /// Counts the delay and sound timers down; should be called at 60Hz.
    pub fn tick(&mut self) {
        self.state.tick_timers();
    }

    /// Whether a beep should currently be sounding.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Gets the opcode currently pointed at by the pc.
    pub fn current_opcode(&self) -> u16 {
        self.state.opcode_at(self.state.program_counter)
    }

    /// Whether the pixel at `x`, `y` is lit; `x` must be below 64 and `y` below 32.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.state.pixel(x, y)
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Rom::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip8_with(program: &[u8]) -> Chip8 {
        Chip8::new(Rom::try_from(program).unwrap())
    }

    #[test]
    fn test_cycles_one_instruction() {
        // insert a cls opcode so we don't fault on reading from empty memory
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        assert_eq!(chip8.step(), Ok(StepState::Running));
        assert_eq!(chip8.state.program_counter, 0x202);
    }

    #[test]
    fn test_gets_current_opcode() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.current_opcode(), 0xAABB);
    }

    #[test]
    fn test_undefined_opcode_leaves_state_alone() {
        let mut chip8 = chip8_with(&[0x61, 0x22, 0xFF, 0xFF]);
        chip8.step().unwrap();
        let result = chip8.step();
        assert_eq!(result, Err(Chip8Error::UndefinedOpcode { opcode: 0xFFFF }));
        assert_eq!(chip8.state.program_counter, 0x202);
        assert_eq!(chip8.state.registers[0x1], 0x22);
    }

    #[test]
    fn test_stays_halted_after_fault() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        let fault = Chip8Error::StackUnderflow { pc: 0x200 };
        assert_eq!(chip8.step(), Err(fault.clone()));
        assert_eq!(chip8.step(), Err(fault.clone()));
        assert_eq!(chip8.fault(), Some(&fault));
    }

    #[test]
    fn test_doesnt_cycle_while_awaiting_key() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        assert_eq!(chip8.step(), Ok(StepState::AwaitingKey));
        assert_eq!(chip8.step(), Ok(StepState::AwaitingKey));
        assert_eq!(chip8.state.program_counter, 0x200);
    }

    #[test]
    fn test_resumes_once_key_pressed() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.set_key(Some(0xE));
        assert_eq!(chip8.step(), Ok(StepState::Running));
        assert_eq!(chip8.state.registers[0x1], 0xE);
        assert_eq!(chip8.state.program_counter, 0x202);
    }

    #[test]
    fn test_key_release_clears_key() {
        let mut chip8 = Chip8::default();
        chip8.set_key(Some(0x3));
        chip8.set_key(None);
        assert_eq!(chip8.state.pressed_key, None);
    }

    #[test]
    fn test_tick_counts_timers_down() {
        let mut chip8 = chip8_with(&[0x61, 0x02, 0xF1, 0x18]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert!(chip8.sound_active());
        chip8.tick();
        chip8.tick();
        assert!(!chip8.sound_active());
        chip8.tick();
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_take_frame_clears_draw_flag() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        assert!(chip8.take_frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_reset_reloads_rom_and_clears_fault() {
        let mut chip8 = chip8_with(&[0x61, 0x22, 0x00, 0x00]);
        chip8.step().unwrap();
        chip8.state.memory[0x200] = 0x00;
        assert!(chip8.step().is_err());

        chip8.reset();
        assert_eq!(chip8.fault(), None);
        assert_eq!(chip8.state.program_counter, 0x200);
        assert_eq!(chip8.state.registers[0x1], 0x0);
        assert_eq!(chip8.state.memory[0x200..0x202], [0x61, 0x22]);
        assert_eq!(chip8.step(), Ok(StepState::Running));
    }
}
