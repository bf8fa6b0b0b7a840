use std::io::Write;

use emu8::{FrameBuffer, SinkError};

/// A display that writes frames as text, one line per pixel row, `#` for lit pixels
/// and `.` for the rest.
pub struct Text<W: Write> {
    out: W,
}

impl<W: Write> Text<W> {
    pub fn new(out: W) -> Self {
        Text { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> emu8::Display for Text<W> {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), SinkError> {
        for row in frame.rows() {
            let line: String = row
                .iter()
                .map(|&pixel| if pixel == 1 { '#' } else { '.' })
                .collect();
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu8::Display;

    #[test]
    fn test_renders_rows_as_text() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(1, 0, &[0b1010_0000]);
        let mut text = Text::new(Vec::new());
        text.render(&frame).unwrap();

        let out = String::from_utf8(text.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 33);
        assert!(lines[0].starts_with(".#.#."));
        assert_eq!(lines[0].len(), 64);
        assert!(lines[1].chars().all(|c| c == '.'));
        assert_eq!(lines[32], "");
    }
}
