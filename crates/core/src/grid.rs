//! Grid module - the settled-tile matrix
//!
//! The grid is 17 rows by 8 columns. Row 0 is the top, row 16 the bottom.
//! Uses a flat array in row-major order, so slice iteration order is the
//! same as the scan order the resolver depends on.

use crate::error::{CoreError, Result};
use crate::types::{Color, GRID_COLS, GRID_ROWS};

/// Total number of cells on the grid
pub const GRID_SIZE: usize = (GRID_COLS as usize) * (GRID_ROWS as usize);

/// The settled tiles - 17 rows x 8 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Color; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; GRID_SIZE],
        }
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if Self::in_bounds(row, col) {
            Some((row as usize) * (GRID_COLS as usize) + (col as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    fn checked_index(row: i8, col: i8) -> Result<usize> {
        Self::index(row, col).ok_or(CoreError::OutOfBounds { row, col })
    }

    /// Whether (row, col) lies on the grid.
    #[inline(always)]
    pub fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < GRID_ROWS as i8 && col >= 0 && col < GRID_COLS as i8
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    pub fn cols(&self) -> u8 {
        GRID_COLS
    }

    /// Color at (row, col)
    pub fn get(&self, row: i8, col: i8) -> Result<Color> {
        Self::checked_index(row, col).map(|idx| self.cells[idx])
    }

    /// Whether (row, col) holds no tile
    pub fn is_empty(&self, row: i8, col: i8) -> Result<bool> {
        self.get(row, col).map(Color::is_empty)
    }

    pub fn set(&mut self, row: i8, col: i8, color: Color) -> Result<()> {
        let idx = Self::checked_index(row, col)?;
        self.cells[idx] = color;
        Ok(())
    }

    pub fn clear(&mut self, row: i8, col: i8) -> Result<()> {
        self.set(row, col, Color::Empty)
    }

    /// Visit every cell as `(row, col, color)`, row ascending then column ascending.
    pub fn for_each_cell(&self, mut visitor: impl FnMut(i8, i8, Color)) {
        let cols = GRID_COLS as usize;
        for (idx, &color) in self.cells.iter().enumerate() {
            visitor((idx / cols) as i8, (idx % cols) as i8, color);
        }
    }

    /// Empty every cell (game over).
    pub fn reset(&mut self) {
        self.cells.fill(Color::Empty);
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Write color codes into a fixed-size `u8` grid (snapshot encoding).
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_COLS as usize]; GRID_ROWS as usize]) {
        let cols = GRID_COLS as usize;
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * cols;
            for (dst, src) in out_row.iter_mut().zip(&self.cells[start..start + cols]) {
                *dst = src.code();
            }
        }
    }

    /// Raw cells in row-major order
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Build a grid from rows of text, one char per cell, for tests and benches.
    ///
    /// `.` is empty; `R G B W Y` are red, green, blue, white and gray. Missing rows
    /// at the top are empty: the last line given is row 16.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let offset = GRID_ROWS as usize - rows.len().min(GRID_ROWS as usize);
        for (i, line) in rows.iter().take(GRID_ROWS as usize).enumerate() {
            for (col, ch) in line.chars().take(GRID_COLS as usize).enumerate() {
                let color = match ch {
                    'R' => Color::Red,
                    'G' => Color::Green,
                    'B' => Color::Blue,
                    'W' => Color::White,
                    'Y' => Color::Gray,
                    _ => Color::Empty,
                };
                grid.cells[(offset + i) * GRID_COLS as usize + col] = color;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 7), Some(7));
        assert_eq!(Grid::index(1, 0), Some(8));
        assert_eq!(Grid::index(16, 7), Some(135));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 8), None);
        assert_eq!(Grid::index(17, 0), None);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut grid = Grid::new();
        assert_eq!(
            grid.set(17, 0, Color::Red),
            Err(CoreError::OutOfBounds { row: 17, col: 0 })
        );
        assert_eq!(
            grid.is_empty(0, -1),
            Err(CoreError::OutOfBounds { row: 0, col: -1 })
        );
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_for_each_cell_is_row_major() {
        let grid = Grid::new();
        let mut visited = Vec::new();
        grid.for_each_cell(|row, col, _| visited.push((row, col)));

        assert_eq!(visited.len(), GRID_SIZE);
        assert_eq!(visited[0], (0, 0));
        assert_eq!(visited[1], (0, 1));
        assert_eq!(visited[8], (1, 0));
        assert_eq!(visited[GRID_SIZE - 1], (16, 7));
    }

    #[test]
    fn test_from_rows_anchors_to_bottom() {
        let grid = Grid::from_rows(&["R.......", "..GB...Y"]);
        assert_eq!(grid.get(15, 0), Ok(Color::Red));
        assert_eq!(grid.get(16, 2), Ok(Color::Green));
        assert_eq!(grid.get(16, 3), Ok(Color::Blue));
        assert_eq!(grid.get(16, 7), Ok(Color::Gray));
        assert_eq!(grid.occupied_count(), 4);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut grid = Grid::new();
        grid.set(4, 6, Color::White).unwrap();
        let mut out = [[9u8; GRID_COLS as usize]; GRID_ROWS as usize];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[4][6], 1);
        assert_eq!(out[0][0], 0);
    }
}
