//! ANSI output of colour grids.
//!
//! Every cell is drawn as a single space with a 24-bit background colour.
//! A frame is assembled into one string and written in a single call.

use std::io::{self, Write};

use super::{CellColor, ColorGrid};

/// Move the cursor to the top-left corner.
pub const HOME: &str = "\x1b[0;0H";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Full terminal reset (RIS).
pub const RESET: &str = "\x1bc";

/// Terminal size used when the real size cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (24, 80);

/// Writes colour grids to a terminal (or any writer).
pub struct Presenter<W: Write> {
    out: W,
    buffer: String,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: String::new(),
        }
    }

    /// Queue a cursor-home sequence at the start of a new frame.
    pub fn clear_and_home(&mut self) {
        self.buffer.clear();
        self.buffer.push_str(HOME);
    }

    /// Queue one background-coloured cell.
    pub fn write_cell(&mut self, color: CellColor) {
        self.buffer
            .push_str(&format!("\x1b[48;2;{};{};{}m ", color.r, color.g, color.b));
    }

    /// Write the queued frame and flush.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.write_all(self.buffer.as_bytes())?;
        self.buffer.clear();
        self.out.flush()
    }

    /// Draw a whole grid, homing the cursor first.
    pub fn draw(&mut self, grid: &ColorGrid) -> io::Result<()> {
        self.clear_and_home();
        // ~20 bytes per cell
        self.buffer.reserve(grid.cells.len() * 20);
        for &cell in &grid.cells {
            self.write_cell(cell);
        }
        self.flush()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.out.write_all(HIDE_CURSOR.as_bytes())?;
        self.out.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.out.write_all(SHOW_CURSOR.as_bytes())?;
        self.out.flush()
    }

    /// Reset the terminal, home the cursor and make it visible again.
    pub fn reset(&mut self) -> io::Result<()> {
        self.buffer.clear();
        self.out.write_all(RESET.as_bytes())?;
        self.out.write_all(HOME.as_bytes())?;
        self.out.write_all(SHOW_CURSOR.as_bytes())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Current terminal size as `(rows, cols)`.
pub fn query_terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (rows, cols),
        Ok(_) => FALLBACK_SIZE,
        Err(e) => {
            log::warn!("Could not query terminal size, assuming 24x80: {}", e);
            FALLBACK_SIZE
        }
    }
}
