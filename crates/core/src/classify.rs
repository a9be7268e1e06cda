//! Outcome classification - maps a settled reel set to a win tier and payout
//!
//! Rules are checked in a fixed order:
//! 1. All three reels equal → jackpot
//! 2. Exactly two distinct symbols → double
//! 3. All distinct, lucky seven present → single
//! 4. Anything else → loss

use crate::types::{Symbol, WinTier, LUCKY_SYMBOL, REEL_COUNT};

/// Number of distinct symbol values on the reels.
pub fn distinct_count(reels: &[Symbol; REEL_COUNT]) -> usize {
    let [a, b, c] = *reels;
    if a == b && b == c {
        1
    } else if a == b || b == c || a == c {
        2
    } else {
        3
    }
}

/// Classify a reel set. Pure: no randomness, no timers.
pub fn classify(reels: &[Symbol; REEL_COUNT]) -> (WinTier, u32) {
    let tier = match distinct_count(reels) {
        1 => WinTier::Jackpot,
        2 => WinTier::Double,
        _ if reels.contains(&LUCKY_SYMBOL) => WinTier::Single,
        _ => WinTier::Loss,
    };
    (tier, tier.payout())
}
