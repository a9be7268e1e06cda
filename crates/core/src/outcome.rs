use serde::Serialize;

use crate::classify::classify;
use crate::types::{Symbol, WinTier, REEL_COUNT};

/// Immutable record of one settled spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpinOutcome {
    /// Per-session sequence number, starting at 1.
    pub id: u64,
    pub symbols: [Symbol; REEL_COUNT],
    pub tier: WinTier,
    pub payout: u32,
    /// Session clock (ms) at settlement.
    pub timestamp_ms: u64,
}

impl SpinOutcome {
    /// Classify `symbols` and build the outcome record.
    pub fn settle(id: u64, symbols: [Symbol; REEL_COUNT], timestamp_ms: u64) -> Self {
        let (tier, payout) = classify(&symbols);
        Self {
            id,
            symbols,
            tier,
            payout,
            timestamp_ms,
        }
    }

    pub fn is_win(&self) -> bool {
        self.tier.is_win()
    }
}
