use log::info;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use emu8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8::{FrameBuffer, SinkError};

/// # Window
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in the frame buffer.
/// The window only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Window {
    canvas: WindowCanvas,
}

impl Window {
    /// Creates a new window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, SinkError> {
        let width = DISPLAY_WIDTH as u32 * scale;
        let height = DISPLAY_HEIGHT as u32 * scale;
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window("Emu-8", width, height)
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        info!("opened {}x{} window", width, height);

        Ok(Window { canvas })
    }

    /// Writes a Chip-8 FrameBuffer into an SDL2 RGB24 texture buffer.
    ///
    /// An RGB24 texture is a 1D array of bytes holding rows of RGB pixels, each row
    /// starting `pitch` bytes after the previous one. Lit pixels are white, the rest black.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `buffer` the locked texture memory
    /// * `pitch` the length of one texture row in bytes
    fn fill_rgb24(frame: &FrameBuffer, buffer: &mut [u8], pitch: usize) {
        for (y, row) in frame.rows().iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                let offset = y * pitch + x * 3;
                let color = *pixel * 255;
                buffer[offset..offset + 3].copy_from_slice(&[color, color, color]);
            }
        }
    }
}

impl emu8::Display for Window {
    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it
    /// stretched over the whole window.
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), SinkError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            Window::fill_rgb24(frame, buffer, pitch)
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
