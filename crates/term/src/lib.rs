//! Terminal renderer for the column game.
//!
//! Renders a per-frame [`core::GameSnapshot`] into a framebuffer of styled
//! cells and flushes it with `crossterm`. No widget toolkit; each grid cell is
//! one or two terminal columns wide depending on the camera preset.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_columns_core as core;
pub use tui_columns_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, CellLook, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
