//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::SlotAction`] values that the
//! machine resolves against its current state.

pub mod map;

pub use tui_slots_types as types;

pub use map::{handle_key_event, should_quit};
