//! Error types for the core crate

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by grid access.
///
/// Blocked moves are not errors: movement returns `false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A row/column pair outside the 17x8 grid
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i8, col: i8 },
}
