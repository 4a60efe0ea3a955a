/// Half-block painter: two framebuffer rows per terminal cell
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use solidview_core::{Color as Rgb, FrameBuffer, PixelBuffer};

/// Upper half block: foreground paints the top pixel, background the bottom
const UPPER_HALF: char = '\u{2580}';

fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Terminal-sized framebuffer with square-ish pixels
pub struct TerminalCanvas {
    columns: u16,
    rows: u16,
    framebuffer: FrameBuffer,
}

impl TerminalCanvas {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            framebuffer: FrameBuffer::new(columns as usize, rows as usize * 2),
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.framebuffer.resize(columns as usize, rows as usize * 2);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    /// Queue the whole canvas. Color changes are only emitted when they differ
    /// from the previous cell.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let fb = &self.framebuffer;
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row))?;
            for column in 0..self.columns as usize {
                let top = fb.get(column, row as usize * 2).unwrap_or_default();
                let bottom = fb.get(column, row as usize * 2 + 1).unwrap_or_default();

                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(term_color(top)))?;
                    writer.queue(SetBackgroundColor(term_color(bottom)))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(UPPER_HALF))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
