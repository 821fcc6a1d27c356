//! Runs a Chip-8 ROM in an SDL2 window.
//!
//! ```text
//! |1|2|3|C|      |1|2|3|4|
//! |4|5|6|D|  ->  |Q|W|E|R|
//! |7|8|9|E|  ->  |A|S|D|F|
//! |A|0|B|F|      |Z|X|C|V|
//! ```
//!
//! Hold Space to fast forward, Backspace resets and Escape quits.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use chip8_core::constants::PROGRAM_START;
use chip8_core::CLOCK_SPEED;

mod keymap;
mod rom;
mod run;
mod trace;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 interpreter", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Window pixels per Chip-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Log every instruction at debug level
    #[arg(short, long)]
    trace: bool,

    /// Print the ROM's disassembly and exit
    #[arg(short, long)]
    disassemble: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.trace {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("chip8", level)
        .filter_module("chip8_core", level)
        .parse_default_env()
        .init();

    let rom = rom::load(&args.rom)?;

    if args.disassemble {
        for line in trace::disassemble(PROGRAM_START, rom.bytes()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = run::Config {
        scale: args.scale,
        clock_speed: args.clock_speed,
        trace: args.trace,
    };
    run::run(rom, &config)
}
