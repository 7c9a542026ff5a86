//! Per-tick ball motion and collision response
//!
//! One call to [`step_ball`] advances a ball by a single tick:
//! gravity, friction, integration, side walls, then every peg in lattice
//! order. Nothing here removes balls or pays out; the engine does that.

use glam::Vec2;
use rand::Rng;

use super::pegs::PegField;
use super::state::Ball;
use crate::config::BoardConfig;

/// What happened to a ball during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Pegs the ball bounced off this tick
    pub peg_hits: u32,
    /// Ball was pushed back in by a side wall
    pub wall_hit: bool,
}

/// Gravity then friction, applied to velocity only
#[inline]
pub fn apply_forces(vel: Vec2, gravity: f32, friction: f32) -> Vec2 {
    Vec2::new(vel.x, vel.y + gravity) * friction
}

/// Clamp a ball inside the side walls, bouncing it back with energy loss
///
/// Returns true if a wall was hit.
pub fn wall_collision(ball: &mut Ball, left: f32, right: f32, restitution: f32) -> bool {
    if ball.pos.x < left {
        ball.pos.x = left;
        ball.vel.x = ball.vel.x.abs() * restitution;
        true
    } else if ball.pos.x > right {
        ball.pos.x = right;
        ball.vel.x = -ball.vel.x.abs() * restitution;
        true
    } else {
        false
    }
}

/// New velocity after bouncing off a peg
///
/// `offset` points from the peg to the ball. The ball leaves along that
/// direction rotated by `deflection`, keeping `damping` of its speed.
#[inline]
pub fn peg_bounce(vel: Vec2, offset: Vec2, deflection: f32, damping: f32) -> Vec2 {
    let angle = offset.y.atan2(offset.x) + deflection;
    let speed = vel.length() * damping;
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Bounce a ball off every peg it overlaps, in lattice order
///
/// Each overlap draws one deflection from `rng`, so hits stay reproducible
/// for a seeded generator. Returns the number of pegs hit.
pub fn peg_collisions<R: Rng>(
    ball: &mut Ball,
    pegs: &PegField,
    reach: f32,
    damping: f32,
    perturbation: f32,
    rng: &mut R,
) -> u32 {
    let mut hits = 0;
    for peg in pegs {
        let offset = ball.pos - peg.pos;
        if offset.length() < reach {
            // Uniform in [-perturbation, perturbation)
            let deflection = (rng.random::<f32>() - 0.5) * 2.0 * perturbation;
            ball.vel = peg_bounce(ball.vel, offset, deflection, damping);
            hits += 1;
        }
    }
    hits
}

/// Advance one ball by one tick
pub fn step_ball<R: Rng>(
    ball: &mut Ball,
    pegs: &PegField,
    config: &BoardConfig,
    rng: &mut R,
) -> StepReport {
    ball.vel = apply_forces(ball.vel, config.gravity, config.friction);
    ball.pos += ball.vel;

    let wall_hit = wall_collision(
        ball,
        config.left_boundary(),
        config.right_boundary(),
        config.wall_restitution,
    );

    let peg_hits = peg_collisions(
        ball,
        pegs,
        config.collision_distance(),
        config.peg_damping,
        config.peg_perturbation,
        rng,
    );

    ball.flight_ticks = ball.flight_ticks.saturating_add(1);

    StepReport { peg_hits, wall_hit }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::sim::state::BallId;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arb_vel() -> impl Strategy<Value = Vec2> {
        (-30.0..30.0_f32, -30.0..30.0_f32).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn friction_never_adds_speed(vel in arb_vel(), friction in 0.01..0.999_f32) {
            let after = apply_forces(vel, 0.0, friction);
            prop_assert!(after.length() <= vel.length() + 1e-4);
        }

        #[test]
        fn peg_bounce_scales_speed_by_damping(
            vel in arb_vel(),
            angle in -3.1..3.1_f32,
            deflection in -0.3..0.3_f32,
            damping in 0.0..0.99_f32,
        ) {
            let offset = Vec2::new(angle.cos(), angle.sin());
            let after = peg_bounce(vel, offset, deflection, damping);
            prop_assert!((after.length() - vel.length() * damping).abs() < 1e-3);
        }

        #[test]
        fn walls_contain_ball(
            x in -100.0..600.0_f32,
            vel in arb_vel(),
            seed in any::<u64>(),
        ) {
            let config = BoardConfig::default();
            let pegs = PegField::generate(config.rows, config.cols, config.spacing);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = Ball::new(BallId(1), Vec2::new(x, 100.0), vel.x, 1.0);
            ball.vel.y = vel.y;

            for _ in 0..50 {
                step_ball(&mut ball, &pegs, &config, &mut rng);
                prop_assert!(ball.pos.x >= config.left_boundary());
                prop_assert!(ball.pos.x <= config.right_boundary());
                prop_assert!(ball.vel.is_finite());
            }
        }
    }
}
