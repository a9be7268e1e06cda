use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::autoplay::AutoplayState;
use crate::bankroll::SessionStats;
use crate::outcome::SpinOutcome;
use crate::types::{Credits, Symbol, HISTORY_CAPACITY, INITIAL_BALANCE, LUCKY_SYMBOL, REEL_COUNT};

/// Read-only view of everything a front end may display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineSnapshot {
    pub reels: [Symbol; REEL_COUNT],
    pub spinning: bool,
    /// Animation frames still to show in the current spin.
    pub frames_left: u32,
    pub spin_cost: Credits,
    pub initial_balance: Credits,
    pub stats: SessionStats,
    pub autoplay: AutoplayState,
    /// Newest first.
    pub history: ArrayVec<SpinOutcome, HISTORY_CAPACITY>,
    pub clock_ms: u64,
}

impl MachineSnapshot {
    pub fn clear(&mut self) {
        self.reels = [LUCKY_SYMBOL; REEL_COUNT];
        self.spinning = false;
        self.frames_left = 0;
        self.spin_cost = 0;
        self.initial_balance = INITIAL_BALANCE;
        self.stats = SessionStats::new(INITIAL_BALANCE);
        self.autoplay = AutoplayState {
            enabled: false,
            delay_ms: 0,
            next_spin_in_ms: None,
        };
        self.history.clear();
        self.clock_ms = 0;
    }

    /// Most recent settled outcome.
    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.history.first()
    }

    /// Whether a new spin would be accepted right now.
    pub fn can_spin(&self) -> bool {
        !self.spinning && self.stats.balance >= self.spin_cost
    }

    /// Hash of the displayed state, ignoring clocks and countdowns.
    ///
    /// Used to skip redraws when nothing visible changed.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.reels.hash(&mut h);
        self.spinning.hash(&mut h);
        self.stats.hash(&mut h);
        self.autoplay.enabled.hash(&mut h);
        self.autoplay.delay_ms.hash(&mut h);
        self.history.len().hash(&mut h);
        self.last_outcome().map(|o| o.id).hash(&mut h);
        h.finish()
    }
}

impl Default for MachineSnapshot {
    fn default() -> Self {
        let mut s = Self {
            reels: [LUCKY_SYMBOL; REEL_COUNT],
            spinning: false,
            frames_left: 0,
            spin_cost: 0,
            initial_balance: INITIAL_BALANCE,
            stats: SessionStats::new(INITIAL_BALANCE),
            autoplay: AutoplayState {
                enabled: false,
                delay_ms: 0,
                next_spin_in_ms: None,
            },
            history: ArrayVec::new(),
            clock_ms: 0,
        };
        s.clear();
        s
    }
}
