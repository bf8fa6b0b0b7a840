use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// - 16 8-bit registers, the address register, program counter and call stack
///   (see `Registers`)
/// - 2 8-bit timers (delay & sound), decremented by the host at 60Hz
///
/// ## Memory
/// - 4096 bytes of addressable memory, sprite sheet at 0x000, program at 0x200
/// - 64x32 frame buffer holding the next frame to be drawn
///
/// ## Input
/// - not stored; the host is asked about keys when an instruction needs them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            timers: Timers::new(),
            frame_buffer: FrameBuffer::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = State::new();
        assert_eq!(state.registers.pc, 0x200);
        assert_eq!(state.timers, Timers::new());
        assert!(!state.frame_buffer.is_dirty());
        // glyph for 0 sits at the start of memory
        assert_eq!(state.memory.slice(0, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }
}
