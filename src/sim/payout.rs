//! Landing resolution: which bucket, and how much it pays

use serde::{Deserialize, Serialize};

use super::buckets::BucketTable;

/// Outcome of a landed ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub bucket_index: usize,
    pub multiplier: f64,
    pub payout: f64,
}

/// Resolve the bucket under `ball_x` and the return on `wager`
pub fn resolve(ball_x: f32, wager: f64, table: &BucketTable) -> Payout {
    let bucket_index = table.resolve_bucket(ball_x);
    // resolve_bucket only returns indices of a non-empty table
    let multiplier = table.multiplier(bucket_index).unwrap_or(0.0);
    Payout {
        bucket_index,
        multiplier,
        payout: wager * multiplier,
    }
}
