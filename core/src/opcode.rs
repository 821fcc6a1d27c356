/// # Opcode fields
///
/// A raw 16-bit opcode split into every operand field an instruction might use. Which fields
/// matter depends on the instruction; the rest are simply ignored by `Instruction::decode`.
///
/// ```text
///   c x y n
///  [F 1 3 3]  LD B, V1
///       ^^^   nnn = 0x133
///       ^^    nn  = 0x33
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The opcode as fetched from memory.
    pub raw: u16,
    /// Top nibble, the instruction class.
    pub class: u8,
    /// Second nibble, usually the register Vx or the last register of V0..=Vx.
    pub x: u8,
    /// Third nibble, usually the register Vy.
    pub y: u8,
    /// Bottom nibble, a sprite height or a sub-operation selector.
    pub n: u8,
    /// Bottom byte, an immediate value or a sub-operation selector.
    pub nn: u8,
    /// Bottom 12 bits, an address.
    pub nnn: u16,
}

impl Opcode {
    pub fn new(raw: u16) -> Self {
        Opcode {
            raw,
            class: (raw >> 12) as u8,
            x: (raw >> 8 & 0xF) as u8,
            y: (raw >> 4 & 0xF) as u8,
            n: (raw & 0xF) as u8,
            nn: (raw & 0xFF) as u8,
            nnn: raw & 0x0FFF,
        }
    }

    /// `(class, x, y, n)`, the shape instructions are matched on.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class, self.x, self.y, self.n)
    }
}

impl From<u16> for Opcode {
    fn from(raw: u16) -> Self {
        Opcode::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_every_field() {
        let op = Opcode::new(0xD12F);
        assert_eq!(op.raw, 0xD12F);
        assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0xF));
        assert_eq!(op.nn, 0x2F);
        assert_eq!(op.nnn, 0x12F);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Opcode::from(0x0000).nibbles(), (0, 0, 0, 0));
        let op = Opcode::from(0xFFFF);
        assert_eq!(op.nibbles(), (0xF, 0xF, 0xF, 0xF));
        assert_eq!((op.nn, op.nnn), (0xFF, 0xFFF));
    }
}
