//! Runs small hand-assembled programs through the public interface.

use chip8_core::constants::SPRITE_SHEET;
use chip8_core::{Chip8, Chip8Error, Rom, StepState, DISPLAY_HEIGHT, DISPLAY_WIDTH};

fn boot(program: &[u8]) -> Chip8 {
    Chip8::new(Rom::try_from(program).expect("program fits in memory"))
}

fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        assert_eq!(chip8.step(), Ok(StepState::Running));
    }
}

fn lit_pixels(chip8: &Chip8) -> usize {
    (0..DISPLAY_HEIGHT)
        .flat_map(|y| (0..DISPLAY_WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| chip8.pixel(x, y))
        .count()
}

#[test]
fn draws_a_font_digit() {
    let mut chip8 = boot(&[
        0x60, 0x07, // LD V0, 0x07
        0xF0, 0x29, // LD F, V0
        0x61, 0x08, // LD V1, 0x08
        0x62, 0x04, // LD V2, 0x04
        0xD1, 0x25, // DRW V1, V2, 5
    ]);
    run(&mut chip8, 5);

    // 7 is 0xF0 0x10 0x20 0x40 0x40
    assert!((8..12).all(|x| chip8.pixel(x, 4)));
    assert!(chip8.pixel(11, 5));
    assert!(chip8.pixel(10, 6));
    assert!(chip8.pixel(9, 7) && chip8.pixel(9, 8));
    assert_eq!(lit_pixels(&chip8), 8);
    assert_eq!(chip8.state().registers[0xF], 0);
}

#[test]
fn draw_twice_erases_and_reports_collision() {
    let mut chip8 = boot(&[
        0xA0, 0x00, // LD I, 0x000
        0xD0, 0x05, // DRW V0, V0, 5
        0xD0, 0x05, // DRW V0, V0, 5
    ]);
    run(&mut chip8, 2);
    assert_eq!(lit_pixels(&chip8), 14);
    run(&mut chip8, 1);
    assert_eq!(lit_pixels(&chip8), 0);
    assert_eq!(chip8.state().registers[0xF], 1);
}

#[test]
fn clear_screen_turns_everything_off() {
    let mut chip8 = boot(&[
        0xD0, 0x05, // DRW V0, V0, 5
        0x00, 0xE0, // CLS
    ]);
    run(&mut chip8, 1);
    assert!(lit_pixels(&chip8) > 0);
    run(&mut chip8, 1);
    assert_eq!(lit_pixels(&chip8), 0);
}

#[test]
fn subroutine_call_and_return() {
    let mut chip8 = boot(&[
        0x22, 0x06, // 0x200: CALL 0x206
        0x63, 0x33, // 0x202: LD V3, 0x33
        0x12, 0x0A, // 0x204: JP 0x20A
        0x64, 0x44, // 0x206: LD V4, 0x44
        0x00, 0xEE, // 0x208: RET
        0x00, 0xE0, // 0x20A: CLS
    ]);
    run(&mut chip8, 2);
    assert_eq!(chip8.state().stack_pointer, 1);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().program_counter, 0x202);
    assert_eq!(chip8.state().stack_pointer, 0);
    run(&mut chip8, 2);
    assert_eq!(chip8.state().program_counter, 0x20A);
    assert_eq!(chip8.state().registers[0x3], 0x33);
    assert_eq!(chip8.state().registers[0x4], 0x44);
}

#[test]
fn runaway_recursion_overflows_the_stack() {
    let mut chip8 = boot(&[0x22, 0x00]); // CALL 0x200
    run(&mut chip8, 16);
    assert_eq!(chip8.step(), Err(Chip8Error::StackOverflow { pc: 0x200 }));
    assert_eq!(chip8.state().stack_pointer, 16);
}

#[test]
fn counting_loop_with_skip() {
    let mut chip8 = boot(&[
        0x60, 0x00, // 0x200: LD V0, 0
        0x70, 0x01, // 0x202: ADD V0, 1
        0x30, 0x05, // 0x204: SE V0, 5
        0x12, 0x02, // 0x206: JP 0x202
        0xF0, 0x0A, // 0x208: LD V0, K
    ]);
    let mut steps = 0;
    while chip8.step() == Ok(StepState::Running) {
        steps += 1;
        assert!(steps < 100, "loop never finished");
    }
    assert_eq!(chip8.state().registers[0x0], 5);
    assert_eq!(chip8.state().program_counter, 0x208);
}

#[test]
fn bcd_round_trips_through_registers() {
    let mut chip8 = boot(&[
        0x65, 0x9D, // LD V5, 157
        0xA3, 0x00, // LD I, 0x300
        0xF5, 0x33, // LD B, V5
        0xF2, 0x65, // LD V2, [I]
    ]);
    run(&mut chip8, 4);
    assert_eq!(chip8.state().registers[0..3], [1, 5, 7]);
    assert_eq!(chip8.state().memory[0x300..0x303], [1, 5, 7]);
}

#[test]
fn stores_below_program_memory_keep_the_font() {
    let mut chip8 = boot(&[
        0x60, 0xFF, // LD V0, 0xFF
        0xA0, 0x00, // LD I, 0x000
        0xF0, 0x55, // LD [I], V0
        0x61, 0x09, // LD V1, 9
        0xF1, 0x33, // LD B, V1
        0x62, 0x00, // LD V2, 0
        0xF2, 0x29, // LD F, V2
        0xD2, 0x25, // DRW V2, V2, 5
    ]);
    run(&mut chip8, 8);
    assert_eq!(chip8.state().memory[0..80], SPRITE_SHEET[..]);
    // the 0 glyph is still a 14 pixel ring
    assert_eq!(lit_pixels(&chip8), 14);
}

#[test]
fn delay_timer_counts_down_with_ticks() {
    let mut chip8 = boot(&[
        0x60, 0x03, // LD V0, 3
        0xF0, 0x15, // LD DT, V0
        0xF1, 0x07, // LD V1, DT
    ]);
    run(&mut chip8, 2);
    chip8.tick();
    run(&mut chip8, 1);
    assert_eq!(chip8.state().registers[0x1], 2);
}

#[test]
fn wait_for_key_suspends_until_pressed() {
    let mut chip8 = boot(&[
        0xF3, 0x0A, // LD V3, K
        0xE3, 0x9E, // SKP V3
        0x00, 0xE0, // CLS
        0x00, 0xE0, // CLS
    ]);
    for _ in 0..10 {
        assert_eq!(chip8.step(), Ok(StepState::AwaitingKey));
    }
    chip8.set_key(Some(0xA));
    run(&mut chip8, 2);
    assert_eq!(chip8.state().registers[0x3], 0xA);
    assert_eq!(chip8.state().program_counter, 0x206);
}

#[test]
fn undefined_opcode_halts_until_reset() {
    let mut chip8 = boot(&[0x5A, 0xB1]);
    let fault = Chip8Error::UndefinedOpcode { opcode: 0x5AB1 };
    assert_eq!(chip8.step(), Err(fault.clone()));
    assert_eq!(chip8.step(), Err(fault));
    chip8.reset();
    assert_eq!(chip8.fault(), None);
}
