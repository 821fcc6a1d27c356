use crate::constants::MAX_ROM_SIZE;
use crate::error::RomError;

/// # ROM
/// A program image that is known to fit in memory above `PROGRAM_START`.
///
/// The engine keeps its ROM around so that a reset can reload it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Wraps raw program bytes, rejecting anything larger than `MAX_ROM_SIZE`.
    pub fn new(bytes: Vec<u8>) -> Result<Self, RomError> {
        if bytes.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge { size: bytes.len() });
        }
        Ok(Rom { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl TryFrom<&[u8]> for Rom {
    type Error = RomError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Rom::new(bytes.to_vec())
    }
}
