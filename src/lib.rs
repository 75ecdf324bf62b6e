//! Terminal column-match puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_columns::{core,input,runtime,term,types}` and owns
//! the configuration layer used by the binary.

pub mod config;

pub use tui_columns_core as core;
pub use tui_columns_input as input;
pub use tui_columns_runtime as runtime;
pub use tui_columns_term as term;
pub use tui_columns_types as types;
