use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use chip8_core::{Rom, RomError};

/// Reasons a ROM file could not be turned into a runnable `Rom`
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no ROM found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to read ROM {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Rom(#[from] RomError),
}

/// Reads the ROM at `path`.
pub fn load(path: &Path) -> Result<Rom, LoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let rom = Rom::new(bytes)?;
    if rom.is_empty() {
        warn!("{} is empty, nothing will run", path.display());
    }
    info!("loaded {} byte ROM from {}", rom.len(), path.display());
    Ok(rom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8_core::MAX_ROM_SIZE;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chip8-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loads_rom() {
        let path = scratch_file("ok.ch8", &[0x00, 0xE0]);
        let rom = load(&path).unwrap();
        assert_eq!(rom.bytes(), &[0x00, 0xE0]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_loads_empty_rom() {
        let path = scratch_file("empty.ch8", &[]);
        assert!(load(&path).unwrap().is_empty());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_rom() {
        let path = std::env::temp_dir().join("chip8-does-not-exist.ch8");
        assert!(matches!(load(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_unreadable_rom() {
        // a directory exists but can't be read as a file
        let path = std::env::temp_dir();
        assert!(matches!(load(&path), Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_oversized_rom() {
        let path = scratch_file("big.ch8", &vec![0; MAX_ROM_SIZE + 1]);
        assert!(matches!(
            load(&path),
            Err(LoadError::Rom(RomError::TooLarge { size: 3585 }))
        ));
        fs::remove_file(path).unwrap();
    }
}
