//! Plinko Engine - peg-drop wager simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (peg lattice, collisions, payouts, engine)
//! - `config`: Board tunables, loadable from JSON
//! - `error`: Error kinds surfaced to callers
//! - `tally`: Running session totals over settlements

pub mod config;
pub mod error;
pub mod sim;
pub mod tally;

pub use config::BoardConfig;
pub use error::{EngineError, Result};
pub use sim::{BallId, BallSnapshot, Settled, SimulationEngine};
pub use tally::SessionTally;

/// Board defaults, taken from the classic 20 x 12 board
pub mod consts {
    /// Peg lattice dimensions
    pub const PEG_ROWS: u32 = 20;
    pub const PEG_COLS: u32 = 12;
    pub const PEG_SPACING: f32 = 40.0;
    /// Largest lattice a board may ask for
    pub const MAX_PEGS: u64 = 10_000;

    /// Board dimensions (pixels). Width leaves room for the offset rows.
    pub const BOARD_WIDTH: f32 = 480.0;
    pub const BOARD_HEIGHT: f32 = 820.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.5;
    /// Drop point as a fraction of board width (0.5 = top center)
    pub const DROP_FRACTION: f32 = 0.5;
    /// Horizontal jitter applied at spawn (± pixels)
    pub const SPAWN_JITTER: f32 = 10.0;
    /// Initial lateral speed range (± pixels/tick)
    pub const SPAWN_LATERAL_SPEED: f32 = 1.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Velocity retained per tick
    pub const FRICTION: f32 = 0.98;
    /// Horizontal speed retained on a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.7;
    /// Inset of the side walls from the board edge
    pub const WALL_INSET: f32 = 5.0;

    /// Speed retained on a peg bounce
    pub const PEG_DAMPING: f32 = 0.9;
    /// Max random deflection added to the bounce angle (radians)
    pub const PEG_PERTURBATION: f32 = 0.3;
    /// Extra reach of a peg beyond the ball radius
    pub const PEG_MARGIN: f32 = 5.0;

    /// Concurrent balls allowed on one board
    pub const MAX_LIVE_BALLS: usize = 5;
    /// Ticks after which a ball is settled where it stands
    pub const MAX_FLIGHT_TICKS: u32 = 10_000;

    /// Bucket multipliers, left to right
    pub const MULTIPLIERS: [f64; 10] = [1.2, 0.8, 0.4, 0.1, 0.05, 0.0, 0.0, 0.2, 10.0, 1.2];
}
