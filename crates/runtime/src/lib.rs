//! Runtime module - drives a [`GameController`] from tokio timers
//!
//! The controller has no clock of its own. This crate bridges it to tokio with
//! three tasks sharing one `Mutex<GameController>`:
//!
//! - **drop task**: fires every drop interval and calls `drop_step`
//! - **frame task**: fires every frame, calls `resolve_tick`, then copies a
//!   snapshot under the same lock and publishes it on a `watch` channel
//! - **command task**: applies [`GameAction`]s sent by the input side
//!
//! The lock is never held across an `.await`, so the three tasks never
//! interleave inside a controller call, and a published snapshot always
//! includes the resolution step of its frame.
//!
//! [`GameController`]: tui_columns_core::GameController
//! [`GameAction`]: tui_columns_types::GameAction

pub mod scheduler;

pub use tui_columns_core as core;
pub use tui_columns_types as types;

pub use scheduler::{CommandSender, GameLoop, SharedController, Timing};
