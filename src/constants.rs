/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded into memory and where the program counter starts.
pub const PROGRAM_START: u16 = 0x200;

/// Where the sprite sheet is loaded into memory.
pub const FONT_START: u16 = 0x000;

/// Bytes per glyph in the sprite sheet.
pub const GLYPH_SIZE: u16 = 5;

/// Return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Rate at which the host decrements the delay and sound timers.
pub const TIMER_HZ: u32 = 60;

/// Instruction throughput the host aims for when nothing else is configured.
pub const DEFAULT_CYCLES_PER_SECOND: u32 = 700;

/// How many past states are kept for rewinding.
pub const MAX_SAVED_STATES: usize = 1024;

/// # Sprite sheet
/// Glyphs for the hexadecimal digits 0..F, 5 bytes each, 4 pixels wide.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
