use arrayvec::ArrayVec;

use crate::outcome::SpinOutcome;
use crate::types::HISTORY_CAPACITY;

/// Bounded log of settled spins, newest first.
///
/// Stack-only; pushing into a full log drops the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: ArrayVec<SpinOutcome, HISTORY_CAPACITY>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an outcome, evicting the oldest when full.
    pub fn push(&mut self, outcome: SpinOutcome) {
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(0, outcome);
    }

    pub fn latest(&self) -> Option<&SpinOutcome> {
        self.entries.first()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &SpinOutcome> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[SpinOutcome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn outcome(id: u64) -> SpinOutcome {
        SpinOutcome::settle(id, [Symbol::Cherry, Symbol::Bell, Symbol::Lemon], id * 10)
    }

    #[test]
    fn test_newest_first() {
        let mut log = HistoryLog::new();
        log.push(outcome(1));
        log.push(outcome(2));
        let ids: Vec<u64> = log.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(log.latest().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_caps_at_capacity() {
        let mut log = HistoryLog::new();
        for id in 1..=30 {
            log.push(outcome(id));
        }
        assert_eq!(log.len(), HISTORY_CAPACITY);
        let ids: Vec<u64> = log.iter().map(|o| o.id).collect();
        let expected: Vec<u64> = (6..=30).rev().collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_clear() {
        let mut log = HistoryLog::new();
        log.push(outcome(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
