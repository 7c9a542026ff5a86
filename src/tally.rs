//! Session totals over settled balls
//!
//! Mirrors what the wallet and scoreboard see: money staked, money returned,
//! and how often each bucket was hit. Balances themselves live outside the
//! engine.

use serde::{Deserialize, Serialize};

use crate::sim::Settled;

/// Running totals for one play session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTally {
    pub balls_settled: u64,
    pub total_wagered: f64,
    pub total_paid: f64,
    /// Largest single payout seen
    pub best_payout: f64,
    /// Landings per bucket index
    pub bucket_hits: Vec<u64>,
}

impl SessionTally {
    /// Empty tally sized for `bucket_count` buckets
    pub fn new(bucket_count: usize) -> Self {
        Self {
            bucket_hits: vec![0; bucket_count],
            ..Default::default()
        }
    }

    /// Fold one settlement into the totals
    pub fn record(&mut self, settled: &Settled) {
        self.balls_settled += 1;
        self.total_wagered += settled.wager;
        self.total_paid += settled.payout;
        if settled.payout > self.best_payout {
            self.best_payout = settled.payout;
        }
        if settled.bucket_index >= self.bucket_hits.len() {
            self.bucket_hits.resize(settled.bucket_index + 1, 0);
        }
        self.bucket_hits[settled.bucket_index] += 1;
    }

    pub fn record_all<'a>(&mut self, settled: impl IntoIterator<Item = &'a Settled>) {
        for s in settled {
            self.record(s);
        }
    }

    /// Paid minus wagered (negative when the house is ahead)
    pub fn net(&self) -> f64 {
        self.total_paid - self.total_wagered
    }

    /// Fraction of wagers returned; None before anything was wagered
    pub fn return_to_player(&self) -> Option<f64> {
        if self.total_wagered > 0.0 {
            Some(self.total_paid / self.total_wagered)
        } else {
            None
        }
    }

    /// Bucket hit most often (lowest index on ties)
    pub fn hottest_bucket(&self) -> Option<usize> {
        let max = *self.bucket_hits.iter().max()?;
        if max == 0 {
            return None;
        }
        self.bucket_hits.iter().position(|&h| h == max)
    }

    pub fn is_empty(&self) -> bool {
        self.balls_settled == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallId;

    fn settled(id: u32, bucket_index: usize, wager: f64, payout: f64) -> Settled {
        Settled {
            ball_id: BallId(id),
            bucket_index,
            wager,
            payout,
        }
    }

    #[test]
    fn test_empty_tally() {
        let tally = SessionTally::new(10);
        assert!(tally.is_empty());
        assert_eq!(tally.return_to_player(), None);
        assert_eq!(tally.hottest_bucket(), None);
        assert_eq!(tally.net(), 0.0);
    }

    #[test]
    fn test_totals() {
        let mut tally = SessionTally::new(10);
        tally.record_all(&[
            settled(1, 8, 10.0, 100.0),
            settled(2, 5, 10.0, 0.0),
            settled(3, 5, 20.0, 0.0),
        ]);

        assert_eq!(tally.balls_settled, 3);
        assert_eq!(tally.total_wagered, 40.0);
        assert_eq!(tally.total_paid, 100.0);
        assert_eq!(tally.net(), 60.0);
        assert_eq!(tally.return_to_player(), Some(2.5));
        assert_eq!(tally.best_payout, 100.0);
        assert_eq!(tally.bucket_hits[5], 2);
        assert_eq!(tally.hottest_bucket(), Some(5));
    }

    #[test]
    fn test_grows_for_unknown_bucket() {
        let mut tally = SessionTally::default();
        tally.record(&settled(1, 3, 1.0, 0.4));
        assert_eq!(tally.bucket_hits, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_hottest_tie_goes_left() {
        let mut tally = SessionTally::new(4);
        tally.record(&settled(1, 3, 1.0, 1.0));
        tally.record(&settled(2, 1, 1.0, 1.0));
        assert_eq!(tally.hottest_bucket(), Some(1));
    }

    #[test]
    fn test_serializes() {
        let mut tally = SessionTally::new(2);
        tally.record(&settled(1, 0, 2.0, 2.4));
        let json = serde_json::to_string(&tally).unwrap();
        let back: SessionTally = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tally);
    }
}
