//! Short history of recent rolls.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::DiceRollResult;

/// How many rolls the log keeps by default.
pub const DEFAULT_CAPACITY: usize = 5;

/// The most recent rolls, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollLog {
    capacity: usize,
    entries: VecDeque<DiceRollResult>,
}

impl Default for RollLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RollLog {
    /// An empty log that keeps at most `capacity` rolls (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a roll, evicting the oldest once full.
    pub fn push(&mut self, roll: DiceRollResult) {
        self.entries.push_front(roll);
        self.entries.truncate(self.capacity);
    }

    /// The newest roll.
    pub fn latest(&self) -> Option<&DiceRollResult> {
        self.entries.front()
    }

    /// Rolls from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &DiceRollResult> {
        self.entries.iter()
    }

    /// Number of rolls held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been rolled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every roll.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(total: u32) -> DiceRollResult {
        DiceRollResult::from_faces(20, vec![total], 0, format!("roll {total}"))
    }

    #[test]
    fn newest_first_and_bounded() {
        let mut log = RollLog::default();
        for n in 1..=7 {
            log.push(roll(n));
        }
        assert_eq!(log.len(), 5);
        let totals: Vec<i32> = log.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![7, 6, 5, 4, 3]);
        assert_eq!(log.latest().map(|r| r.total), Some(7));
    }

    #[test]
    fn zero_capacity_still_keeps_one() {
        let mut log = RollLog::new(0);
        log.push(roll(2));
        log.push(roll(3));
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|r| r.total), Some(3));
    }

    #[test]
    fn clear_empties() {
        let mut log = RollLog::default();
        log.push(roll(4));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
