use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, Rom, StepState, TIMER_FREQUENCY};
use chip8_display::Display;

use crate::keymap::{keymap, Keypad};
use crate::trace::format_step;

/// Settings for a single emulation session
#[derive(Debug, Clone)]
pub struct Config {
    /// Window pixels per Chip-8 pixel
    pub scale: u32,
    /// Instructions executed per second
    pub clock_speed: u32,
    /// Log every instruction as it runs
    pub trace: bool,
}

impl Config {
    /// How many instructions to run between each 60Hz timer tick, at least one.
    pub fn cycles_per_frame(&self) -> u32 {
        (self.clock_speed / TIMER_FREQUENCY).max(1)
    }
}

/// Resets the machine without losing a key that is still being held down.
fn restart(chip8: &mut Chip8, keypad: &Keypad) {
    chip8.reset();
    chip8.set_key(keypad.held());
}

pub fn run(rom: Rom, config: &Config) -> Result<()> {
    let mut chip8 = Chip8::new(rom);
    let mut keypad = Keypad::default();

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("initialising SDL2")?;
    let mut display = Display::new(&sdl, config.scale)
        .map_err(|e| anyhow!(e))
        .context("opening the display")?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / TIMER_FREQUENCY;
    let cycles_per_frame = config.cycles_per_frame();
    info!(
        "running at {} instructions per frame, {} frames per second",
        cycles_per_frame, TIMER_FREQUENCY
    );

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    let mut beeping = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key(keypad.press(kc)),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Backspace, _) => restart(&mut chip8, &keypad),
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key(keypad.release(kc)),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state, yielding to the next frame while waiting on a key
        for _ in 0..cycles_per_frame {
            let pc = chip8.state().program_counter;
            let op = chip8.current_opcode();
            let step = chip8.step().context("the Chip-8 program crashed")?;
            if config.trace {
                debug!("{}", format_step(pc, op, chip8.state()));
            }
            if step == StepState::AwaitingKey {
                break;
            }
        }
        chip8.tick();

        if chip8.sound_active() != beeping {
            beeping = chip8.sound_active();
            debug!("sound {}", if beeping { "on" } else { "off" });
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(|e| anyhow!(e))?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    info!("quitting");
    Ok(())
}
