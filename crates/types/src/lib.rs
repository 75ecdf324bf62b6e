//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, scheduling, terminal rendering).
//!
//! # Grid Dimensions
//!
//! - **Columns**: 8 (indexed 0-7, left to right)
//! - **Rows**: 17 (indexed 0-16, top to bottom)
//! - **Spawn position**: column 3, rows 0/1/2
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 850 | Drop timer period |
//! | `FRAME_MS` | 16 | Resolution tick period (~60 FPS) |
//!
//! # Score Table
//!
//! | Line type | Points | Produced by |
//! |-----------|--------|-------------|
//! | `Basic` | 5 | orthogonal run of 3 |
//! | `Extended` | 7 | orthogonal run of 4, diagonal runs other than down-right |
//! | `Diagonal` | 10 | down-right diagonal run of 3 |
//!
//! # Examples
//!
//! ```
//! use tui_columns_types::{Color, GameAction, LineType, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(GRID_COLS, 8);
//! assert_eq!(GRID_ROWS, 17);
//!
//! assert!(Color::Empty.is_empty());
//! assert_eq!(Color::from_code(2), Some(Color::Red));
//! assert_eq!(LineType::Diagonal.points(), 10);
//!
//! assert_eq!(GameAction::from_str("rotateColors"), Some(GameAction::RotateColors));
//! ```

/// Grid width in cells (8 columns)
pub const GRID_COLS: u8 = 8;

/// Grid height in cells (17 rows)
pub const GRID_ROWS: u8 = 17;

/// Column every fresh piece is released into.
pub const SPAWN_COL: i8 = 3;

/// Rows of slots 0, 1 and 2 for a freshly released piece.
pub const SPAWN_ROWS: [i8; 3] = [0, 1, 2];

/// A piece that locks with its lowest cell above this row ends the game.
pub const GAME_OVER_ROW: i8 = 3;

/// Drop timer period in milliseconds.
pub const DROP_INTERVAL_MS: u32 = 850;

/// Resolution tick period in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Speed bookkeeping thresholds: `(lines strictly above, speed value)`, checked in order.
///
/// The value is recorded and displayed but never feeds the drop timer.
pub const SPEED_THRESHOLDS: [(u32, u8); 3] = [(30, 5), (20, 7), (10, 10)];

/// Cell and piece color.
///
/// `Empty` is the only value meaning "no tile". Codes match the snapshot grid encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Empty,
    White,
    Red,
    Green,
    Blue,
    Gray,
}

impl Color {
    /// The five colors a piece can be drawn from, in draw order.
    pub const PLAYABLE: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Gray,
    ];

    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    /// Numeric code used by the `u8` snapshot grid (0 = empty).
    pub fn code(self) -> u8 {
        match self {
            Color::Empty => 0,
            Color::White => 1,
            Color::Red => 2,
            Color::Green => 3,
            Color::Blue => 4,
            Color::Gray => 5,
        }
    }

    /// Inverse of [`Color::code`].
    ///
    /// ```
    /// use tui_columns_types::Color;
    ///
    /// assert_eq!(Color::from_code(0), Some(Color::Empty));
    /// assert_eq!(Color::from_code(5), Some(Color::Gray));
    /// assert_eq!(Color::from_code(6), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Color::Empty),
            1 => Some(Color::White),
            2 => Some(Color::Red),
            3 => Some(Color::Green),
            4 => Some(Color::Blue),
            5 => Some(Color::Gray),
            _ => None,
        }
    }

    /// Display color as 8-bit RGB. `Empty` maps to black.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Empty => (0, 0, 0),
            Color::White => (255, 255, 255),
            Color::Red => (255, 0, 0),
            Color::Green => (0, 255, 0),
            Color::Blue => (0, 0, 255),
            Color::Gray => (128, 128, 128),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Gray => "gray",
        }
    }
}

/// Kind of run removed by one resolver clear; selects the score awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    /// Horizontal or vertical run of three.
    Basic,
    /// Horizontal or vertical run of four, or a diagonal run that is not down-right.
    Extended,
    /// Down-right diagonal run of three.
    Diagonal,
}

impl LineType {
    pub fn points(self) -> u32 {
        match self {
            LineType::Basic => 5,
            LineType::Extended => 7,
            LineType::Diagonal => 10,
        }
    }

    /// Numeric line-type index (0, 1, 2).
    pub fn index(self) -> u8 {
        match self {
            LineType::Basic => 0,
            LineType::Extended => 1,
            LineType::Diagonal => 2,
        }
    }
}

/// Cosmetic camera preset forwarded to the renderer.
///
/// The core stores it for the snapshot and never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewAngle {
    /// Straight-on view.
    Front,
    /// Tilted backwards by 45 degrees (startup view).
    #[default]
    Tilted,
    /// Turned to the side.
    Side,
}

impl ViewAngle {
    /// `(pitch, yaw)` in degrees.
    pub fn degrees(self) -> (f32, f32) {
        match self {
            ViewAngle::Front => (0.0, 0.0),
            ViewAngle::Tilted => (-45.0, 0.0),
            ViewAngle::Side => (1.5, 67.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewAngle::Front => "front",
            ViewAngle::Tilted => "tilted",
            ViewAngle::Side => "side",
        }
    }
}

/// Commands accepted by the game controller.
///
/// These come from the input adapter (or tests); each maps to one controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Force one drop step now
    SoftDrop,
    /// Cycle piece colors forward (slot 0 takes slot 1's color)
    RotateColors,
    /// Cycle piece colors backward
    RotateColorsBack,
    /// Toggle pause state
    Pause,
    /// Change the camera preset
    View(ViewAngle),
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_columns_types::{GameAction, ViewAngle};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("viewSide"), Some(GameAction::View(ViewAngle::Side)));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecolors" => Some(GameAction::RotateColors),
            "rotatecolorsback" => Some(GameAction::RotateColorsBack),
            "pause" => Some(GameAction::Pause),
            "viewfront" => Some(GameAction::View(ViewAngle::Front)),
            "viewtilted" => Some(GameAction::View(ViewAngle::Tilted)),
            "viewside" => Some(GameAction::View(ViewAngle::Side)),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateColors => "rotateColors",
            GameAction::RotateColorsBack => "rotateColorsBack",
            GameAction::Pause => "pause",
            GameAction::View(ViewAngle::Front) => "viewFront",
            GameAction::View(ViewAngle::Tilted) => "viewTilted",
            GameAction::View(ViewAngle::Side) => "viewSide",
            GameAction::Restart => "restart",
        }
    }
}

/// Speed value recorded for a lines-cleared total, if any threshold is passed.
///
/// ```
/// use tui_columns_types::speed_for_lines;
///
/// assert_eq!(speed_for_lines(10), None);
/// assert_eq!(speed_for_lines(11), Some(10));
/// assert_eq!(speed_for_lines(31), Some(5));
/// ```
pub fn speed_for_lines(lines: u32) -> Option<u8> {
    SPEED_THRESHOLDS
        .iter()
        .find(|&&(above, _)| lines > above)
        .map(|&(_, speed)| speed)
}
