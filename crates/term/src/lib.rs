//! Terminal "game renderer" module.
//!
//! This is a small rendering layer for the terminal slot machine. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is diffed and flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render purely from a `MachineSnapshot` (no access to the live machine)
//! - Skip redraws while the machine is at rest

pub mod fb;
pub mod machine_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_slots_core as core;
pub use tui_slots_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use machine_view::{MachineView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
