use crate::error::SinkError;
use crate::frame_buffer::FrameBuffer;

/// # Display
/// Anything that can show a 64x32 monochrome frame.
///
/// The machine only calls `render` when the frame changed since the last render,
/// so implementations don't need to diff frames themselves.
pub trait Display {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), SinkError>;
}
