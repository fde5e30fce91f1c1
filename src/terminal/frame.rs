//! Colour grid types for terminal display.

/// RGB background colour for one terminal cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey cell with all three components set to `v`.
    pub fn grey(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// One frame's worth of cell colours, ready for the presenter.
///
/// Cells are stored row-major, `cols` cells per row.
#[derive(Debug, Clone, Default)]
pub struct ColorGrid {
    pub cells: Vec<CellColor>,
    pub cols: u16,
    pub rows: u16,
}

impl ColorGrid {
    /// Create a black grid with the given dimensions.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cells: vec![CellColor::default(); cols as usize * rows as usize],
            cols,
            rows,
        }
    }

    /// Resize to `cols` x `rows`, keeping the allocation where possible.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells
            .resize(cols as usize * rows as usize, CellColor::default());
    }

    /// Colour at `(col, row)`, or `None` outside the grid.
    pub fn get(&self, col: u16, row: u16) -> Option<CellColor> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }
}
