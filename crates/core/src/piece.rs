//! Piece module - the three-cell falling column
//!
//! A piece is a vertical rigid body: all three cells share a column and sit on
//! three consecutive rows, slot 0 on top. Only the colors ever change places.
//! The piece never checks bounds or collisions; the controller validates moves
//! before calling [`Piece::translate`].

use crate::rng::SimpleRng;
use crate::types::{Color, SPAWN_COL, SPAWN_ROWS};

/// One positioned cell of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCell {
    pub row: i8,
    pub col: i8,
    pub color: Color,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    cells: [PieceCell; 3],
}

impl Piece {
    /// A freshly released piece with random colors at the spawn position.
    pub fn spawn(rng: &mut SimpleRng) -> Self {
        let mut piece = Self::with_colors([Color::Red, Color::Green, Color::Blue]);
        piece.reset(rng);
        piece
    }

    /// A piece at the spawn position with the given slot colors.
    pub fn with_colors(colors: [Color; 3]) -> Self {
        let cells = std::array::from_fn(|slot| PieceCell {
            row: SPAWN_ROWS[slot],
            col: SPAWN_COL,
            color: colors[slot],
        });
        let piece = Self { cells };
        piece.debug_check();
        piece
    }

    /// Redraw colors (rejecting monochrome triples) and return to the spawn position.
    pub fn reset(&mut self, rng: &mut SimpleRng) {
        let colors = rng.next_triple();
        for (slot, cell) in self.cells.iter_mut().enumerate() {
            cell.row = SPAWN_ROWS[slot];
            cell.col = SPAWN_COL;
            cell.color = colors[slot];
        }
        self.debug_check();
    }

    /// Shift every cell by the same delta. No legality checks.
    pub fn translate(&mut self, d_col: i8, d_row: i8) {
        for cell in &mut self.cells {
            cell.col += d_col;
            cell.row += d_row;
        }
        self.debug_check();
    }

    /// Slot 0 takes slot 1's color, slot 1 takes slot 2's, slot 2 takes slot 0's.
    pub fn rotate_colors_forward(&mut self) {
        let first = self.cells[0].color;
        self.cells[0].color = self.cells[1].color;
        self.cells[1].color = self.cells[2].color;
        self.cells[2].color = first;
    }

    /// Inverse of [`Piece::rotate_colors_forward`].
    pub fn rotate_colors_backward(&mut self) {
        let last = self.cells[2].color;
        self.cells[2].color = self.cells[1].color;
        self.cells[1].color = self.cells[0].color;
        self.cells[0].color = last;
    }

    /// Cells in slot order (top to bottom).
    pub fn cells(&self) -> [PieceCell; 3] {
        self.cells
    }

    pub fn colors(&self) -> [Color; 3] {
        self.cells.map(|c| c.color)
    }

    pub fn col(&self) -> i8 {
        self.cells[0].col
    }

    /// Row of the deepest cell (slot 2).
    pub fn bottom_row(&self) -> i8 {
        self.cells[2].row
    }

    /// Rows strictly increasing by slot, one shared column, no empty color.
    pub fn is_well_formed(&self) -> bool {
        let [a, b, c] = self.cells;
        a.row < b.row
            && b.row < c.row
            && a.col == b.col
            && b.col == c.col
            && self.cells.iter().all(|cell| !cell.color.is_empty())
    }

    #[inline(always)]
    fn debug_check(&self) {
        debug_assert!(self.is_well_formed(), "malformed piece: {:?}", self.cells);
    }
}
