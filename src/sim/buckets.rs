//! Payout buckets along the floor
//!
//! The board width is split evenly among the multipliers, left to right.
//! A landing x maps to the bucket with the nearest center.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One payout bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub index: usize,
    pub multiplier: f64,
    /// Horizontal center in board pixels
    pub center_x: f32,
}

/// Ordered, immutable bucket layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketTable {
    buckets: Vec<Bucket>,
    width: f32,
}

/// Multipliers must be non-empty, finite and non-negative
pub fn validate_multipliers(multipliers: &[f64]) -> Result<()> {
    if multipliers.is_empty() {
        return Err(EngineError::config("multiplier table is empty"));
    }
    if let Some((i, m)) = multipliers
        .iter()
        .enumerate()
        .find(|(_, m)| !m.is_finite() || **m < 0.0)
    {
        return Err(EngineError::config(format!(
            "multiplier {i} must be a non-negative number, got {m}"
        )));
    }
    Ok(())
}

impl BucketTable {
    pub fn new(multipliers: &[f64], board_width: f32) -> Result<Self> {
        validate_multipliers(multipliers)?;
        if !(board_width > 0.0) {
            return Err(EngineError::config("board dimensions must be positive"));
        }

        let slot = board_width / multipliers.len() as f32;
        let buckets = multipliers
            .iter()
            .enumerate()
            .map(|(index, &multiplier)| Bucket {
                index,
                multiplier,
                center_x: (index as f32 + 0.5) * slot,
            })
            .collect();

        Ok(Self {
            buckets,
            width: board_width,
        })
    }

    /// Index of the bucket nearest to `x`; ties go to the lower index
    pub fn resolve_bucket(&self, x: f32) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for bucket in &self.buckets {
            let dist = (x - bucket.center_x).abs();
            // Strict comparison keeps the first (leftmost) of equal distances
            if dist < best_dist {
                best_dist = dist;
                best = bucket.index;
            }
        }
        best
    }

    #[inline]
    pub fn multiplier(&self, index: usize) -> Option<f64> {
        self.buckets.get(index).map(|b| b.multiplier)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false for a constructed table
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}
