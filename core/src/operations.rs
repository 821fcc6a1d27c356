use crate::chip8::StepState;
use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_HEIGHT, SPRITE_SHEET_ADDRESS,
};
use crate::error::Chip8Error;
use crate::state::State;

const FLAG: usize = 0xF;

fn advance(state: &mut State) {
    state.program_counter = state.program_counter.wrapping_add(0x2) & ADDRESS_MASK;
}

fn skip_if(state: &mut State, condition: bool) {
    let step = if condition { 0x4 } else { 0x2 };
    state.program_counter = state.program_counter.wrapping_add(step) & ADDRESS_MASK;
}

/// clear
pub fn clear_screen(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    advance(state);
}

/// PC = STACK.pop()
pub fn ret(state: &mut State) -> Result<(), Chip8Error> {
    state.program_counter = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.program_counter = addr & ADDRESS_MASK;
}

/// STACK.push(PC + 2); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Chip8Error> {
    let return_addr = state.program_counter.wrapping_add(0x2) & ADDRESS_MASK;
    state.push(return_addr)?;
    state.program_counter = addr & ADDRESS_MASK;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn skip_equal_byte(state: &mut State, x: u8, kk: u8) {
    let condition = state.registers[x as usize] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skip_not_equal_byte(state: &mut State, x: u8, kk: u8) {
    let condition = state.registers[x as usize] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skip_equal_register(state: &mut State, x: u8, y: u8) {
    let condition = state.registers[x as usize] == state.registers[y as usize];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load_byte(state: &mut State, x: u8, kk: u8) {
    state.registers[x as usize] = kk;
    advance(state);
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add_byte(state: &mut State, x: u8, kk: u8) {
    state.registers[x as usize] = state.registers[x as usize].wrapping_add(kk);
    advance(state);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.registers[x as usize] = state.registers[y as usize];
    advance(state);
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.registers[x as usize] |= state.registers[y as usize];
    advance(state);
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.registers[x as usize] &= state.registers[y as usize];
    advance(state);
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.registers[x as usize] ^= state.registers[y as usize];
    advance(state);
}

/// Vx += Vy; VF = overflow
pub fn add_register(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.registers[x as usize].overflowing_add(state.registers[y as usize]);
    state.registers[x as usize] = res;
    state.registers[FLAG] = u8::from(over);
    advance(state);
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.registers[x as usize].overflowing_sub(state.registers[y as usize]);
    state.registers[x as usize] = res;
    state.registers[FLAG] = u8::from(!under);
    advance(state);
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &mut State, x: u8) {
    let vx = state.registers[x as usize];
    state.registers[x as usize] = vx >> 1;
    state.registers[FLAG] = vx & 0x1;
    advance(state);
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.registers[y as usize].overflowing_sub(state.registers[x as usize]);
    state.registers[x as usize] = res;
    state.registers[FLAG] = u8::from(!under);
    advance(state);
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &mut State, x: u8) {
    let vx = state.registers[x as usize];
    state.registers[x as usize] = vx << 1;
    state.registers[FLAG] = vx >> 7;
    advance(state);
}

/// if Vx != Vy then pc +=2
pub fn skip_not_equal_register(state: &mut State, x: u8, y: u8) {
    let condition = state.registers[x as usize] != state.registers[y as usize];
    skip_if(state, condition);
}

/// I = addr
pub fn load_index(state: &mut State, addr: u16) {
    state.index_register = addr;
    advance(state);
}

/// PC = V0 + addr
pub fn jump_offset(state: &mut State, addr: u16) {
    state.program_counter = (u16::from(state.registers[0x0]) + addr) & ADDRESS_MASK;
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8) {
    let rand_byte: u8 = rand::random();
    state.registers[x as usize] = rand_byte & kk;
    advance(state);
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// Pixels falling off the right or bottom edge are clipped.
/// Sets VF if any pixels are erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let origin_x = state.registers[x as usize] as usize;
    let origin_y = state.registers[y as usize] as usize;

    // Reset the flag (used for collision detection)
    state.registers[FLAG] = 0x0;

    for row in 0..n as usize {
        let y = origin_y + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_byte = state.read(state.index_register.wrapping_add(row as u16));
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            let pixel_value = (sprite_byte >> (7 - bit)) & 1;
            if pixel_value == 0 {
                continue;
            }
            if state.frame_buffer[y][x] == 1 {
                state.registers[FLAG] = 0x1;
            }
            state.frame_buffer[y][x] ^= 1;
        }
    }

    state.draw_flag = true;
    advance(state);
}

/// if Vx.pressed then pc += 2
pub fn skip_key_pressed(state: &mut State, x: u8) {
    let condition = state.pressed_key == Some(state.registers[x as usize]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skip_key_not_pressed(state: &mut State, x: u8) {
    let condition = state.pressed_key != Some(state.registers[x as usize]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn load_delay(state: &mut State, x: u8) {
    state.registers[x as usize] = state.delay_timer;
    advance(state);
}

/// await keypress for Vx
/// Leaves the program counter where it is until a key is available so the same opcode is
/// retried on the next step.
pub fn wait_key(state: &mut State, x: u8) -> StepState {
    match state.pressed_key {
        Some(key) => {
            state.registers[x as usize] = key;
            advance(state);
            StepState::Running
        }
        None => StepState::AwaitingKey,
    }
}

/// DT = Vx
pub fn set_delay(state: &mut State, x: u8) {
    state.delay_timer = state.registers[x as usize];
    advance(state);
}

/// ST = Vx
pub fn set_sound(state: &mut State, x: u8) {
    state.sound_timer = state.registers[x as usize];
    advance(state);
}

/// I += Vx
pub fn add_index(state: &mut State, x: u8) {
    state.index_register = state
        .index_register
        .wrapping_add(u16::from(state.registers[x as usize]));
    advance(state);
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn load_sprite(state: &mut State, x: u8) {
    let digit = u16::from(state.registers[x as usize] & 0xF);
    state.index_register = SPRITE_SHEET_ADDRESS + digit * SPRITE_HEIGHT;
    advance(state);
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) {
    let vx = state.registers[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write(state.index_register.wrapping_add(offset as u16), *digit);
    }
    advance(state);
}

/// mem[I..=I+x] = V0..=Vx
pub fn store(state: &mut State, x: u8) {
    for register in 0..=x as usize {
        let value = state.registers[register];
        state.write(state.index_register.wrapping_add(register as u16), value);
    }
    advance(state);
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) {
    for register in 0..=x as usize {
        state.registers[register] = state.read(state.index_register.wrapping_add(register as u16));
    }
    advance(state);
}
