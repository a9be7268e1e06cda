//! Core slot machine logic - pure, deterministic, and testable
//!
//! This crate contains the whole spin engine: symbol generation, outcome
//! classification, bankroll bookkeeping, the bounded history log, and the
//! spin/autoplay state machine. It has **no dependencies** on terminals,
//! async runtimes, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Outcomes can be forced with a scripted symbol source
//! - **Portable**: Runs behind the terminal UI, the async runtime, or headless
//!
//! # Module Structure
//!
//! - [`rng`]: uniform symbol generator and the [`SymbolSource`] seam
//! - [`classify`]: win tier and payout for a reel set
//! - [`bankroll`]: balance, profit, and session counters
//! - [`history`]: newest-first log of the last 25 outcomes
//! - [`autoplay`]: cancellable autoplay countdown
//! - [`machine`]: spin lifecycle, autoplay scheduling, commands
//! - [`snapshot`]: read-only state for front ends
//!
//! # Example
//!
//! ```
//! use tui_slots_core::SlotMachine;
//! use tui_slots_types::{Command, SPIN_COST, SPIN_FRAME_COUNT, SPIN_FRAME_MS};
//!
//! let mut machine = SlotMachine::new(12345);
//! machine.apply(Command::RequestSpin);
//! assert!(machine.is_spinning());
//!
//! // Drive the animation to completion.
//! machine.tick(SPIN_FRAME_COUNT * SPIN_FRAME_MS);
//! assert!(!machine.is_spinning());
//!
//! let stats = machine.stats();
//! assert_eq!(stats.spins, 1);
//! assert_eq!(stats.profit, stats.balance - 200);
//! assert!(stats.balance >= 200 - SPIN_COST);
//! ```
//!
//! # Timing
//!
//! The machine uses a fixed timestep: call
//! [`SlotMachine::tick`](machine::SlotMachine::tick) every frame with the
//! elapsed milliseconds. A spin shows 26 rolling frames 45ms apart, then
//! settles on an independent final draw. Autoplay waits its delay
//! (300–2000ms) between spins.

pub mod autoplay;
pub mod bankroll;
pub mod classify;
pub mod history;
pub mod machine;
pub mod outcome;
pub mod rng;
pub mod snapshot;

pub use tui_slots_types as types;

// Re-export commonly used types for convenience
pub use autoplay::{Autoplay, AutoplayState};
pub use bankroll::{Bankroll, SessionStats};
pub use classify::{classify, distinct_count};
pub use history::HistoryLog;
pub use machine::{MachineConfig, SlotMachine, SpinAttempt, SpinPhase};
pub use outcome::SpinOutcome;
pub use rng::{ScriptedSymbols, SymbolGenerator, SymbolSource};
pub use snapshot::MachineSnapshot;
