//! Bankroll and session statistics
//!
//! Every method is a single `&mut self` transition, so a reader holding the
//! machine never observes a half-applied spin (cost debited but counters not
//! yet updated, and so on).

use serde::Serialize;

use crate::outcome::SpinOutcome;
use crate::types::{Credits, WinTier};

/// Aggregate counters and money for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionStats {
    pub spins: u32,
    pub wins: u32,
    pub jackpots: u32,
    pub balance: Credits,
    /// Always `balance - initial_balance`.
    pub profit: Credits,
}

impl SessionStats {
    pub fn new(initial_balance: Credits) -> Self {
        Self {
            spins: 0,
            wins: 0,
            jackpots: 0,
            balance: initial_balance,
            profit: 0,
        }
    }

    /// Rounded win percentage (0 before the first spin).
    pub fn win_rate_percent(&self) -> u32 {
        if self.spins == 0 {
            return 0;
        }
        ((self.wins as f64 / self.spins as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone)]
pub struct Bankroll {
    initial_balance: Credits,
    stats: SessionStats,
}

impl Bankroll {
    pub fn new(initial_balance: Credits) -> Self {
        Self {
            initial_balance,
            stats: SessionStats::new(initial_balance),
        }
    }

    pub fn initial_balance(&self) -> Credits {
        self.initial_balance
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn balance(&self) -> Credits {
        self.stats.balance
    }

    pub fn can_afford(&self, cost: Credits) -> bool {
        self.stats.balance >= cost
    }

    /// Debit a spin's cost. Affordability is the caller's job.
    pub fn apply_spin_cost(&mut self, cost: Credits) {
        self.stats.balance -= cost;
        self.stats.profit -= cost;
    }

    /// Credit a settled outcome and bump the counters.
    pub fn apply_settlement(&mut self, outcome: &SpinOutcome) {
        let payout = Credits::from(outcome.payout);
        let stats = &mut self.stats;
        stats.balance += payout;
        stats.profit += payout;
        stats.spins += 1;
        if outcome.tier != WinTier::Loss {
            stats.wins += 1;
        }
        if outcome.tier == WinTier::Jackpot {
            stats.jackpots += 1;
        }
    }

    pub fn reset(&mut self) {
        self.stats = SessionStats::new(self.initial_balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn outcome(symbols: [Symbol; 3]) -> SpinOutcome {
        SpinOutcome::settle(1, symbols, 0)
    }

    #[test]
    fn test_cost_then_jackpot() {
        let mut bank = Bankroll::new(200);
        bank.apply_spin_cost(2);
        assert_eq!(bank.balance(), 198);
        assert_eq!(bank.stats().spins, 0);

        bank.apply_settlement(&outcome([Symbol::Bell; 3]));
        let s = bank.stats();
        assert_eq!(s.balance, 246);
        assert_eq!(s.profit, 46);
        assert_eq!((s.spins, s.wins, s.jackpots), (1, 1, 1));
    }

    #[test]
    fn test_loss_only_counts_spin() {
        let mut bank = Bankroll::new(200);
        bank.apply_spin_cost(2);
        bank.apply_settlement(&outcome([Symbol::Cherry, Symbol::Bell, Symbol::Lemon]));
        let s = bank.stats();
        assert_eq!((s.spins, s.wins, s.jackpots), (1, 0, 0));
        assert_eq!(s.profit, -2);
        assert_eq!(s.profit, s.balance - bank.initial_balance());
    }

    #[test]
    fn test_affordability_boundary() {
        let bank = Bankroll::new(2);
        assert!(bank.can_afford(2));
        let bank = Bankroll::new(1);
        assert!(!bank.can_afford(2));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut bank = Bankroll::new(200);
        bank.apply_spin_cost(2);
        bank.apply_settlement(&outcome([Symbol::Star, Symbol::Star, Symbol::Grape]));
        bank.reset();
        assert_eq!(bank.stats(), SessionStats::new(200));
    }

    #[test]
    fn test_win_rate_rounds() {
        let mut s = SessionStats::new(200);
        assert_eq!(s.win_rate_percent(), 0);
        s.spins = 3;
        s.wins = 2;
        assert_eq!(s.win_rate_percent(), 67);
    }
}
