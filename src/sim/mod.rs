//! Deterministic simulation module
//!
//! All board physics and payout logic lives here. Given a seeded RNG the
//! simulation is fully reproducible:
//! - Fixed per-tick step, no wall clock
//! - Injected RNG only
//! - Stable iteration order (by ball id, pegs in lattice order)
//! - No rendering, wallet or platform dependencies

pub mod buckets;
pub mod collision;
pub mod engine;
pub mod payout;
pub mod pegs;
pub mod state;

pub use buckets::{Bucket, BucketTable, validate_multipliers};
pub use collision::{StepReport, apply_forces, peg_bounce, peg_collisions, step_ball, wall_collision};
pub use engine::{BoardLayout, SimulationEngine};
pub use payout::{Payout, resolve};
pub use pegs::{Peg, PegField};
pub use state::{Ball, BallId, BallSnapshot, Settled};
