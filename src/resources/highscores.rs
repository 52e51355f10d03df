//! In-memory high score table.
//!
//! Scores live for the lifetime of the process only.

use bevy_ecs::prelude::Resource;

use crate::constants::HIGH_SCORE_SLOTS;

#[derive(Resource, Debug, Clone, Default)]
pub struct HighScores {
    /// Sorted best first, at most [`HIGH_SCORE_SLOTS`] entries.
    scores: Vec<u64>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished race's score.
    ///
    /// Returns the zero-based rank it landed at, or `None` if it did not make
    /// the table.
    pub fn record(&mut self, score: u64) -> Option<usize> {
        let rank = self.scores.partition_point(|&s| s >= score);
        if rank >= HIGH_SCORE_SLOTS {
            return None;
        }
        self.scores.insert(rank, score);
        self.scores.truncate(HIGH_SCORE_SLOTS);
        Some(rank)
    }

    pub fn best(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.scores.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut table = HighScores::new();
        assert_eq!(table.record(100), Some(0));
        assert_eq!(table.record(300), Some(0));
        assert_eq!(table.record(200), Some(1));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![300, 200, 100]);
        assert_eq!(table.best(), Some(300));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut table = HighScores::new();
        table.record(50);
        assert_eq!(table.record(50), Some(1));
    }

    #[test]
    fn test_table_is_bounded() {
        let mut table = HighScores::new();
        for s in 1..=(HIGH_SCORE_SLOTS as u64 + 5) {
            table.record(s * 10);
        }
        assert_eq!(table.len(), HIGH_SCORE_SLOTS);
        assert_eq!(table.record(1), None);
        assert_eq!(table.best(), Some((HIGH_SCORE_SLOTS as u64 + 5) * 10));
    }

    #[test]
    fn test_empty_table() {
        let table = HighScores::new();
        assert!(table.is_empty());
        assert_eq!(table.best(), None);
    }
}
