//! High score tracking
//!
//! Kept in memory for the lifetime of the process only.

use serde::{Deserialize, Serialize};

/// Best score seen so far. Never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Create an empty high score
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Current best score
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished round's score.
    /// Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_only_raises() {
        let mut high = HighScore::new();
        assert!(high.record(30));
        assert!(!high.record(20));
        assert!(!high.record(30));
        assert_eq!(high.best(), 30);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut high = HighScore::new();
        assert!(!high.record(0));
        assert_eq!(high.best(), 0);
    }

    proptest! {
        #[test]
        fn best_is_running_max(scores in proptest::collection::vec(0u32..1000, 0..50)) {
            let mut high = HighScore::new();
            let mut previous = 0;
            for &score in &scores {
                high.record(score);
                prop_assert!(high.best() >= previous);
                previous = high.best();
            }
            prop_assert_eq!(high.best(), scores.iter().copied().max().unwrap_or(0));
        }
    }
}
