use std::io::Read;
use std::ops::Range;

use crate::constants::{FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::LoadError;

/// An access that reached past the end of memory.
///
/// `address` is the first address that does not exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutOfBounds {
    pub address: usize,
}

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` the sprite sheet, 16 glyphs of 5 bytes
/// - `0x200..` the program image
///
/// Every access is bounds checked; nothing wraps around the end of memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet loaded.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Largest ROM that fits between `PROGRAM_START` and the end of memory.
    pub const fn max_rom_size() -> usize {
        MEMORY_SIZE - PROGRAM_START as usize
    }

    /// Copies a ROM into memory starting at `PROGRAM_START`.
    ///
    /// Returns the number of bytes loaded. An empty ROM or one that doesn't fit
    /// is rejected and leaves memory untouched.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let max = Memory::max_rom_size();
        let mut rom = Vec::with_capacity(max);
        // read one byte past the limit so an oversized ROM is detectable
        Read::take(&mut *reader, max as u64 + 1).read_to_end(&mut rom)?;

        if rom.is_empty() {
            return Err(LoadError::Empty);
        }
        if rom.len() > max {
            // the reader was capped, so count whatever is left to report the real size
            let rest = std::io::copy(reader, &mut std::io::sink())?;
            return Err(LoadError::TooLarge {
                size: rom.len() + rest as usize,
                max,
            });
        }

        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(&rom);
        Ok(rom.len())
    }

    fn range(address: usize, len: usize) -> Result<Range<usize>, OutOfBounds> {
        if address >= MEMORY_SIZE {
            return Err(OutOfBounds { address });
        }
        if address + len > MEMORY_SIZE {
            return Err(OutOfBounds {
                address: MEMORY_SIZE,
            });
        }
        Ok(address..address + len)
    }

    pub fn read(&self, address: usize) -> Result<u8, OutOfBounds> {
        Memory::range(address, 1).map(|_| self.bytes[address])
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), OutOfBounds> {
        Memory::range(address, 1)?;
        self.bytes[address] = value;
        Ok(())
    }

    /// The big-endian word at `address` and `address + 1`.
    pub fn word(&self, address: usize) -> Result<u16, OutOfBounds> {
        let bytes = self.slice(address, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], OutOfBounds> {
        Memory::range(address, len).map(|range| &self.bytes[range])
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], OutOfBounds> {
        let range = Memory::range(address, len)?;
        Ok(&mut self.bytes[range])
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
