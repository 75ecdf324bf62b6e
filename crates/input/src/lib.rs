//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Presses are
//! forwarded one action each; there is no auto-repeat layer, the terminal's own
//! key repeat is enough for a grid this small.

pub mod map;

pub use tui_columns_types as types;

pub use map::{handle_key_event, should_quit};
