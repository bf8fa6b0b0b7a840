use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame buffer
/// The contents of a single 64x32 monochrome frame.
///
/// Pixels are stored row-major as 0/1 and indexed as `[y][x]`. Only sprite draws and
/// clears change them, and both mark the frame dirty until a display consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn rows(&self) -> &[[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }

    /// Whether the pixel at `(x, y)` is lit. Coordinates wrap around the screen.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] == 1
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the frame as consumed by a display.
    pub fn clean(&mut self) {
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the frame with its top left corner at `(x, y)`.
    ///
    /// Each byte is one 8 pixel row, most significant bit leftmost. Pixels that fall
    /// off the right or bottom edge wrap around to the opposite edge.
    ///
    /// Returns whether any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
        self.dirty = true;
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
