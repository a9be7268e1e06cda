//! Async runtime for the slot engine.
//!
//! Hosts a [`SlotMachine`](core::SlotMachine) on a tokio task
//! ([`session`]), reads settings from the environment ([`config`]), and sets
//! up `tracing` output ([`telemetry`]).

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use tui_slots_core as core;
pub use tui_slots_types as types;

pub use config::SessionConfig;
pub use error::{Result, RuntimeError};
pub use session::{Commander, SessionHandle};
