//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the three-cell column puzzle. It has no
//! dependencies on terminals, timers or threads:
//!
//! - **Deterministic**: the same seed produces the same pieces
//! - **Testable**: grid states can be built directly and stepped one tick at a time
//! - **Portable**: the scheduler and renderer live in other crates
//!
//! # Module Structure
//!
//! - [`grid`]: 17x8 settled-tile matrix with bounds-checked access
//! - [`piece`]: the falling three-cell column and its color cycling
//! - [`rng`]: LCG color draws with monochrome rejection
//! - [`resolver`]: one clear-or-gravity action per resolution tick
//! - [`scoring`]: score table, line counter, speed bookkeeping
//! - [`controller`]: the state machine tying it all together
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Example
//!
//! ```
//! use tui_columns_core::{Color, DropOutcome, GameController};
//!
//! let mut game = GameController::new(12345);
//! game.start();
//!
//! // Three reds on the floor clear on the next resolution tick.
//! for col in 0..3 {
//!     game.grid_mut().set(16, col, Color::Red).unwrap();
//! }
//! game.resolve_tick();
//! assert_eq!(game.score(), 5);
//! assert_eq!(game.lines(), 1);
//!
//! // The timer moves the piece down one row.
//! assert_eq!(game.drop_step(), DropOutcome::Moved);
//! ```
//!
//! # Timing
//!
//! The controller owns no clock. Call
//! [`GameController::drop_step`](controller::GameController::drop_step) every
//! [`DROP_INTERVAL_MS`](types::DROP_INTERVAL_MS) and
//! [`GameController::resolve_tick`](controller::GameController::resolve_tick)
//! once per frame, from a single thread or under one lock.

pub mod controller;
pub mod error;
pub mod grid;
pub mod piece;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_columns_types as types;

// Re-export commonly used types for convenience
pub use controller::{DropOutcome, GameController, Rules};
pub use error::{CoreError, Result};
pub use grid::Grid;
pub use piece::{Piece, PieceCell};
pub use resolver::{resolve_step, ClearedCells, Resolution};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, ScoreBoard, ScoreResult};
pub use snapshot::GameSnapshot;
pub use types::{Color, LineType, ViewAngle};
