use chip8_core::{Instruction, State};

/// One line describing the instruction at `pc` and the registers left behind after running it.
///
/// ```text
/// 0200 6122 LD V1, 0x22        V[00 22 00 00 00 00 00 00 00 00 00 00 00 00 00 00] I0000
/// ```
pub fn format_step(pc: u16, op: u16, state: &State) -> String {
    let mnemonic = match Instruction::decode(op) {
        Ok(instruction) => instruction.to_string(),
        Err(_) => String::from("???"),
    };
    let registers: Vec<String> = state.registers.iter().map(|v| format!("{:02X}", v)).collect();
    format!(
        "{:04X} {:04X} {:<18} V[{}] I{:04X}",
        pc,
        op,
        mnemonic,
        registers.join(" "),
        state.index_register
    )
}

/// Disassembles a ROM two bytes at a time, one line per opcode.
pub fn disassemble(start: u16, bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let addr = start + 2 * i as u16;
            let op = u16::from(pair[0]) << 8 | u16::from(*pair.get(1).unwrap_or(&0));
            match Instruction::decode(op) {
                Ok(instruction) => format!("{:03X}: {:04X}  {}", addr, op, instruction),
                Err(_) => format!("{:03X}: {:04X}  DW {:#06X}", addr, op, op),
            }
        })
        .collect()
}
