//! TUI Slots (workspace facade crate).
//!
//! Re-exports the engine crates under `crates/` as
//! `tui_slots::{core,input,runtime,term,types}`.

pub use tui_slots_core as core;
pub use tui_slots_input as input;
pub use tui_slots_runtime as runtime;
pub use tui_slots_term as term;
pub use tui_slots_types as types;
