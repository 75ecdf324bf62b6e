//! Match resolver - one clear or one gravity step per call
//!
//! Every call performs exactly one action, in this priority order:
//!
//! 1. **Orthogonal scan**: row-major over the grid; at each occupied cell try
//!    right-3, right-4, down-3, down-4. The first hit is cleared.
//! 2. **Diagonal scan**: only when step 1 found nothing anywhere. Same outer
//!    order; try down-right, up-left, up-right, down-left (all length 3).
//! 3. **Gravity**: only when nothing matched. Rows 15 up to 0: an occupied
//!    cell above an empty cell moves down one row.
//!
//! The run-of-3 pattern is tested before the run-of-4 pattern at the same
//! anchor, so a run of four is cleared as three and its remnant is left for a
//! later call. Cascades play out one observable step per frame; callers must
//! keep calling to resolve them.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::grid::Grid;
use crate::types::{Color, LineType, GRID_COLS, GRID_ROWS};

/// Cells removed by one clear, as `(row, col)`.
pub type ClearedCells = ArrayVec<(i8, i8), 4>;

/// Result of one resolution tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A run was removed.
    Cleared {
        line_type: LineType,
        cells: ClearedCells,
    },
    /// No run; `moved` tiles fell one row.
    Fell { moved: u8 },
    /// No run and nothing left to fall.
    Settled,
}

impl Resolution {
    /// Line type of a clear, if this tick cleared something.
    pub fn line_type(&self) -> Option<LineType> {
        match self {
            Resolution::Cleared { line_type, .. } => Some(*line_type),
            _ => None,
        }
    }

    pub fn changed_grid(&self) -> bool {
        !matches!(self, Resolution::Settled)
    }
}

/// Offsets `(d_row, d_col)` from the anchor cell, anchor excluded.
struct Pattern {
    offsets: &'static [(i8, i8)],
    line_type: LineType,
}

const ORTHOGONAL: [Pattern; 4] = [
    Pattern {
        offsets: &[(0, 1), (0, 2)],
        line_type: LineType::Basic,
    },
    Pattern {
        offsets: &[(0, 1), (0, 2), (0, 3)],
        line_type: LineType::Extended,
    },
    Pattern {
        offsets: &[(1, 0), (2, 0)],
        line_type: LineType::Basic,
    },
    Pattern {
        offsets: &[(1, 0), (2, 0), (3, 0)],
        line_type: LineType::Extended,
    },
];

const DIAGONAL: [Pattern; 4] = [
    // down-right
    Pattern {
        offsets: &[(1, 1), (2, 2)],
        line_type: LineType::Diagonal,
    },
    // up-left
    Pattern {
        offsets: &[(-1, -1), (-2, -2)],
        line_type: LineType::Extended,
    },
    // up-right
    Pattern {
        offsets: &[(-1, 1), (-2, 2)],
        line_type: LineType::Extended,
    },
    // down-left
    Pattern {
        offsets: &[(1, -1), (2, -2)],
        line_type: LineType::Extended,
    },
];

/// Run one resolution tick against `grid`.
pub fn resolve_step(grid: &mut Grid) -> Resolution {
    if let Some(resolution) = clear_first_match(grid, &ORTHOGONAL) {
        return resolution;
    }
    if let Some(resolution) = clear_first_match(grid, &DIAGONAL) {
        return resolution;
    }
    match apply_gravity(grid) {
        0 => Resolution::Settled,
        moved => Resolution::Fell { moved },
    }
}

/// Find the first `(anchor, pattern)` hit in scan order, clear it and report it.
fn clear_first_match(grid: &mut Grid, patterns: &[Pattern]) -> Option<Resolution> {
    let (row, col, pattern) = find_first_match(grid, patterns)?;

    let mut cells = ClearedCells::new();
    cells.push((row, col));
    for &(dr, dc) in pattern.offsets {
        cells.push((row + dr, col + dc));
    }
    for &(r, c) in &cells {
        // Every cell of a matched run was read in bounds above.
        let _ = grid.clear(r, c);
    }

    debug!(
        row,
        col,
        len = cells.len(),
        line_type = pattern.line_type.index(),
        "cleared run"
    );
    Some(Resolution::Cleared {
        line_type: pattern.line_type,
        cells,
    })
}

fn find_first_match<'p>(grid: &Grid, patterns: &'p [Pattern]) -> Option<(i8, i8, &'p Pattern)> {
    for row in 0..GRID_ROWS as i8 {
        for col in 0..GRID_COLS as i8 {
            let color = color_at(grid, row, col);
            if color.is_empty() {
                continue;
            }
            let hit = patterns.iter().find(|p| {
                p.offsets
                    .iter()
                    .all(|&(dr, dc)| color_at(grid, row + dr, col + dc) == color)
            });
            if let Some(pattern) = hit {
                return Some((row, col, pattern));
            }
        }
    }
    None
}

/// Out-of-grid reads are `Empty`, which never equals an anchor color.
#[inline(always)]
fn color_at(grid: &Grid, row: i8, col: i8) -> Color {
    grid.get(row, col).unwrap_or(Color::Empty)
}

/// One gravity pass; returns how many tiles moved.
fn apply_gravity(grid: &mut Grid) -> u8 {
    let mut moved = 0u8;
    for row in (0..GRID_ROWS as i8 - 1).rev() {
        for col in 0..GRID_COLS as i8 {
            let color = color_at(grid, row, col);
            if !color.is_empty() && color_at(grid, row + 1, col).is_empty() {
                let _ = grid.set(row + 1, col, color);
                let _ = grid.clear(row, col);
                moved += 1;
            }
        }
    }
    if moved > 0 {
        debug!(moved, "gravity step");
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared(resolution: &Resolution) -> Vec<(i8, i8)> {
        match resolution {
            Resolution::Cleared { cells, .. } => cells.to_vec(),
            other => panic!("expected a clear, got {:?}", other),
        }
    }

    #[test]
    fn test_horizontal_three() {
        let mut grid = Grid::from_rows(&["RRR....."]);
        let r = resolve_step(&mut grid);

        assert_eq!(r.line_type(), Some(LineType::Basic));
        assert_eq!(cleared(&r), vec![(16, 0), (16, 1), (16, 2)]);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_run_of_four_clears_as_three_first() {
        let mut grid = Grid::from_rows(&["GGGG...."]);
        let r = resolve_step(&mut grid);

        assert_eq!(r.line_type(), Some(LineType::Basic));
        assert_eq!(cleared(&r), vec![(16, 0), (16, 1), (16, 2)]);
        assert_eq!(grid.get(16, 3), Ok(Color::Green));
    }

    #[test]
    fn test_vertical_three() {
        let mut grid = Grid::from_rows(&["B.......", "B.......", "B......."]);
        let r = resolve_step(&mut grid);

        assert_eq!(r.line_type(), Some(LineType::Basic));
        assert_eq!(cleared(&r), vec![(14, 0), (15, 0), (16, 0)]);
    }

    #[test]
    fn test_down_right_diagonal_scores_highest() {
        let mut grid = Grid::from_rows(&["W.......", "GW......", "BGW....."]);
        let r = resolve_step(&mut grid);

        assert_eq!(r.line_type(), Some(LineType::Diagonal));
        assert_eq!(cleared(&r), vec![(14, 0), (15, 1), (16, 2)]);
    }

    #[test]
    fn test_down_left_diagonal_is_extended() {
        // Anchor (14,2) down-left to (16,0); no down-right run exists.
        let mut grid = Grid::from_rows(&["..Y.....", ".YB.....", "YBG....."]);
        let r = resolve_step(&mut grid);

        assert_eq!(r.line_type(), Some(LineType::Extended));
        assert_eq!(cleared(&r), vec![(14, 2), (15, 1), (16, 0)]);
    }

    #[test]
    fn test_orthogonal_beats_earlier_diagonal() {
        // The diagonal anchor (14,0) comes first in scan order, but the
        // orthogonal pass runs over the whole grid before diagonals are tried.
        let mut grid = Grid::from_rows(&["R.......", ".R......", "..RBBB.."]);
        let r = resolve_step(&mut grid);

        assert_eq!(cleared(&r), vec![(16, 3), (16, 4), (16, 5)]);
        assert_eq!(grid.get(14, 0), Ok(Color::Red));
    }

    #[test]
    fn test_gravity_moves_one_row_per_call() {
        let mut grid = Grid::new();
        grid.set(10, 4, Color::Red).unwrap();
        grid.set(9, 4, Color::Blue).unwrap();

        assert_eq!(resolve_step(&mut grid), Resolution::Fell { moved: 2 });
        assert_eq!(grid.get(11, 4), Ok(Color::Red));
        assert_eq!(grid.get(10, 4), Ok(Color::Blue));
        assert_eq!(grid.get(9, 4), Ok(Color::Empty));
    }

    #[test]
    fn test_settled_grid_reports_settled() {
        let mut grid = Grid::from_rows(&["RGBWY..."]);
        let before = grid.clone();
        assert_eq!(resolve_step(&mut grid), Resolution::Settled);
        assert_eq!(grid, before);
    }
}
