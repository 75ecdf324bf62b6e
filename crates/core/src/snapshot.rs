//! Read-only copy of the controller state, handed to renderers once per frame.

use crate::piece::PieceCell;
use crate::types::{Color, ViewAngle, GRID_COLS, GRID_ROWS};

pub type GridCodes = [[u8; GRID_COLS as usize]; GRID_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled tiles as color codes (see [`Color::code`]).
    pub grid: GridCodes,
    /// Active piece cells in slot order.
    pub active: Option<[PieceCell; 3]>,
    pub score: u32,
    pub lines: u32,
    /// Values the score/line display shows; zeroed on game over.
    pub display_score: u32,
    pub display_lines: u32,
    pub speed: Option<u8>,
    pub paused: bool,
    pub game_over: bool,
    pub view: ViewAngle,
    pub piece_id: u32,
    pub episode_id: u32,
    /// Resolution ticks run so far.
    pub tick: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; GRID_COLS as usize]; GRID_ROWS as usize];
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.display_score = 0;
        self.display_lines = 0;
        self.speed = None;
        self.paused = false;
        self.game_over = false;
        self.view = ViewAngle::default();
        self.piece_id = 0;
        self.episode_id = 0;
        self.tick = 0;
    }

    /// Settled color at (row, col); out-of-range reads are empty.
    pub fn cell(&self, row: usize, col: usize) -> Color {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|&code| Color::from_code(code))
            .unwrap_or(Color::Empty)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            score: 0,
            lines: 0,
            display_score: 0,
            display_lines: 0,
            speed: None,
            paused: false,
            game_over: false,
            view: ViewAngle::default(),
            piece_id: 0,
            episode_id: 0,
            tick: 0,
        }
    }
}
