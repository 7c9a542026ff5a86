//! Ball and event types
//!
//! A ball is spawned, flies for some ticks, and settles exactly once. Settled
//! balls leave the live set and are reported as [`Settled`] events.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle for a ball, unique within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallId(pub u32);

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ball#{}", self.0)
    }
}

/// A ball in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Amount staked on this ball
    pub wager: f64,
    /// Ticks survived since spawn
    pub flight_ticks: u32,
}

impl Ball {
    /// New ball at rest vertically, with an initial lateral drift
    pub fn new(id: BallId, pos: Vec2, lateral_vel: f32, wager: f64) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(lateral_vel, 0.0),
            wager,
            flight_ticks: 0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            id: self.id,
            x: self.pos.x,
            y: self.pos.y,
        }
    }
}

/// Read-only view of a live ball for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: BallId,
    pub x: f32,
    pub y: f32,
}

/// Emitted once per ball when it lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settled {
    pub ball_id: BallId,
    pub bucket_index: usize,
    pub wager: f64,
    pub payout: f64,
}
