//! Simulation engine: ball lifecycle and the fixed-step tick
//!
//! The engine never drives its own clock. The caller invokes [`SimulationEngine::tick`]
//! once per frame while [`SimulationEngine::has_live_balls`] is true, and stops
//! requesting frames once the board is empty.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::buckets::BucketTable;
use super::collision::step_ball;
use super::payout;
use super::pegs::PegField;
use super::state::{Ball, BallId, BallSnapshot, Settled};
use crate::config::BoardConfig;
use crate::error::{EngineError, Result};

/// Immutable board geometry, shareable between engines
#[derive(Debug, Clone)]
pub struct BoardLayout {
    config: BoardConfig,
    pegs: PegField,
    buckets: BucketTable,
}

impl BoardLayout {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let pegs = PegField::generate(config.rows, config.cols, config.spacing);
        let buckets = BucketTable::new(&config.multipliers, config.board_width)?;
        Ok(Self {
            config,
            pegs,
            buckets,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn pegs(&self) -> &PegField {
        &self.pegs
    }

    pub fn buckets(&self) -> &BucketTable {
        &self.buckets
    }
}

/// One board's live balls plus the randomness that drives them
#[derive(Debug)]
pub struct SimulationEngine<R: Rng = Pcg32> {
    layout: Arc<BoardLayout>,
    /// Live balls, ordered by id (spawn order)
    balls: Vec<Ball>,
    rng: R,
    next_id: u32,
    /// Ticks that advanced at least one ball
    time_ticks: u64,
}

impl SimulationEngine<Pcg32> {
    /// Engine seeded from the thread RNG
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_rng(config, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Engine with a fixed seed, for replayable runs
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    pub fn with_rng(config: BoardConfig, rng: R) -> Result<Self> {
        let layout = BoardLayout::new(config)?;
        log::info!(
            "Board ready: {} pegs, {} buckets, {} ball cap",
            layout.pegs.len(),
            layout.buckets.len(),
            layout.config.max_live_balls
        );
        Ok(Self::with_layout(Arc::new(layout), rng))
    }

    /// Engine over an existing layout; several boards may share one
    pub fn with_layout(layout: Arc<BoardLayout>, rng: R) -> Self {
        Self {
            layout,
            balls: Vec::new(),
            rng,
            next_id: 1,
            time_ticks: 0,
        }
    }

    /// Drop a new ball carrying `wager`
    ///
    /// Rejected spawns leave the board untouched.
    pub fn spawn_ball(&mut self, wager: f64) -> Result<BallId> {
        let config = &self.layout.config;
        if self.balls.len() >= config.max_live_balls {
            log::debug!("Spawn rejected: {} balls in flight", self.balls.len());
            return Err(EngineError::Capacity {
                max: config.max_live_balls,
            });
        }
        if !(wager > 0.0) || !wager.is_finite() {
            log::debug!("Spawn rejected: wager {wager}");
            return Err(EngineError::InvalidWager(wager));
        }

        let jitter = (self.rng.random::<f32>() - 0.5) * 2.0 * config.spawn_jitter;
        let lateral = (self.rng.random::<f32>() - 0.5) * 2.0 * config.spawn_lateral_speed;
        let x = (config.drop_x() + jitter).clamp(config.left_boundary(), config.right_boundary());

        let id = BallId(self.next_id);
        self.next_id += 1;
        self.balls.push(Ball::new(id, Vec2::new(x, 0.0), lateral, wager));

        log::debug!("Spawned {id} at x={x:.1} wager={wager}");
        Ok(id)
    }

    /// Advance every live ball by one step and settle the ones that landed
    ///
    /// Returns settlements in ball-id order. Does nothing on an empty board.
    pub fn tick(&mut self) -> Vec<Settled> {
        if self.balls.is_empty() {
            return Vec::new();
        }
        self.time_ticks += 1;

        let layout = &self.layout;
        let floor = layout.config.floor();
        let max_flight = layout.config.max_flight_ticks;
        let mut settled = Vec::new();

        for ball in &mut self.balls {
            step_ball(ball, &layout.pegs, &layout.config, &mut self.rng);

            let landed = ball.pos.y >= floor;
            if !landed && ball.flight_ticks < max_flight {
                continue;
            }
            if !landed {
                log::warn!(
                    "{} still in flight after {} ticks, settling at x={:.1}",
                    ball.id,
                    ball.flight_ticks,
                    ball.pos.x
                );
            }

            let outcome = payout::resolve(ball.pos.x, ball.wager, &layout.buckets);
            log::debug!(
                "{} landed in bucket {} ({}x): {} -> {}",
                ball.id,
                outcome.bucket_index,
                outcome.multiplier,
                ball.wager,
                outcome.payout
            );
            settled.push(Settled {
                ball_id: ball.id,
                bucket_index: outcome.bucket_index,
                wager: ball.wager,
                payout: outcome.payout,
            });
        }

        // Remove after the pass so no ball is skipped or resolved twice
        if !settled.is_empty() {
            self.balls
                .retain(|b| !settled.iter().any(|s| s.ball_id == b.id));
        }

        settled
    }

    /// Tick until the board is empty or `max_ticks` have run
    pub fn run_until_idle(&mut self, max_ticks: u64) -> Vec<Settled> {
        let mut settled = Vec::new();
        for _ in 0..max_ticks {
            if !self.has_live_balls() {
                break;
            }
            settled.extend(self.tick());
        }
        settled
    }

    /// Pull a ball off the board without paying out
    pub fn cancel_ball(&mut self, id: BallId) -> Option<Ball> {
        let idx = self.balls.iter().position(|b| b.id == id)?;
        log::debug!("Cancelled {id}");
        Some(self.balls.remove(idx))
    }

    /// Remove every live ball without paying out; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.balls.len();
        self.balls.clear();
        if removed > 0 {
            log::debug!("Cleared {removed} balls");
        }
        removed
    }

    /// Positions of live balls for rendering
    pub fn live_balls(&self) -> Vec<BallSnapshot> {
        self.balls.iter().map(Ball::snapshot).collect()
    }

    #[inline]
    pub fn has_live_balls(&self) -> bool {
        !self.balls.is_empty()
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.balls.len()
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn config(&self) -> &BoardConfig {
        &self.layout.config
    }

    pub fn layout(&self) -> &Arc<BoardLayout> {
        &self.layout
    }
}
