//! Autoplay scheduler state
//!
//! The pending spin is an explicit countdown rather than a detached timer, so
//! cancelling it is just clearing the countdown: a cancelled spin can never
//! fire late. The machine decides when to arm or cancel (see
//! `SlotMachine::reschedule_autoplay`); this type only keeps the bookkeeping.

use serde::Serialize;

use crate::types::{clamp_autoplay_delay, AUTOPLAY_DELAY_DEFAULT_MS};

/// Observable autoplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AutoplayState {
    pub enabled: bool,
    pub delay_ms: u32,
    /// Time left until the armed spin fires.
    pub next_spin_in_ms: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Autoplay {
    enabled: bool,
    delay_ms: u32,
    countdown_ms: Option<u32>,
}

impl Autoplay {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            enabled: false,
            delay_ms: clamp_autoplay_delay(delay_ms),
            countdown_ms: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_armed(&self) -> bool {
        self.countdown_ms.is_some()
    }

    /// Turn autoplay on. Refused (returns false) when the next spin is unaffordable.
    pub fn enable(&mut self, affordable: bool) -> bool {
        if !affordable {
            return false;
        }
        self.enabled = true;
        true
    }

    /// Turn autoplay off and drop any armed spin.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.countdown_ms = None;
    }

    /// Change the delay. An already armed countdown keeps its remaining time.
    pub fn set_delay(&mut self, ms: u32) -> u32 {
        self.delay_ms = clamp_autoplay_delay(ms);
        self.delay_ms
    }

    /// Arm the countdown with the current delay unless one is already running.
    pub fn arm(&mut self) {
        if self.countdown_ms.is_none() {
            self.countdown_ms = Some(self.delay_ms);
        }
    }

    pub fn cancel(&mut self) {
        self.countdown_ms = None;
    }

    /// Advance the countdown. Returns true exactly once when it expires.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.countdown_ms else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining == 0 {
            self.countdown_ms = None;
            true
        } else {
            self.countdown_ms = Some(remaining);
            false
        }
    }

    /// Back to a fresh session: disabled, nothing armed. The delay is kept.
    pub fn reset(&mut self) {
        self.disable();
    }

    pub fn state(&self) -> AutoplayState {
        AutoplayState {
            enabled: self.enabled,
            delay_ms: self.delay_ms,
            next_spin_in_ms: self.countdown_ms,
        }
    }
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new(AUTOPLAY_DELAY_DEFAULT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_requires_funds() {
        let mut a = Autoplay::default();
        assert!(!a.enable(false));
        assert!(!a.enabled());
        assert!(a.enable(true));
        assert!(a.enabled());
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut a = Autoplay::new(300);
        a.arm();
        assert!(!a.advance(299));
        assert!(a.advance(1));
        assert!(!a.is_armed());
        assert!(!a.advance(1_000));
    }

    #[test]
    fn test_delay_change_keeps_armed_countdown() {
        let mut a = Autoplay::new(1_000);
        a.arm();
        a.advance(100);
        assert_eq!(a.set_delay(300), 300);
        assert_eq!(a.state().next_spin_in_ms, Some(900));

        // Re-arming while armed is a no-op.
        a.arm();
        assert_eq!(a.state().next_spin_in_ms, Some(900));
    }

    #[test]
    fn test_disable_cancels() {
        let mut a = Autoplay::new(500);
        a.enable(true);
        a.arm();
        a.disable();
        assert!(!a.is_armed());
        assert!(!a.advance(10_000));
    }

    #[test]
    fn test_delay_clamped() {
        let mut a = Autoplay::new(10);
        assert_eq!(a.delay_ms(), 300);
        assert_eq!(a.set_delay(5_000), 2_000);
    }
}
