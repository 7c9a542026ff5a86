//! Board configuration
//!
//! All tunables for one board. Loaded from JSON; missing fields fall back to
//! the classic board in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{EngineError, Result};
use crate::sim::validate_multipliers;

/// Board tunables (pixels and per-tick units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // === Peg lattice ===
    pub rows: u32,
    pub cols: u32,
    pub spacing: f32,

    // === Board ===
    pub board_width: f32,
    pub board_height: f32,
    /// Side walls sit this far in from the board edge
    pub wall_inset: f32,

    // === Physics ===
    pub gravity: f32,
    /// Per-tick velocity retention, in (0, 1)
    pub friction: f32,
    pub wall_restitution: f32,
    pub peg_damping: f32,
    /// Max random deflection (radians) added to each peg bounce
    pub peg_perturbation: f32,
    pub peg_margin: f32,

    // === Balls ===
    pub ball_radius: f32,
    /// Drop point as a fraction of board width
    pub drop_fraction: f32,
    pub spawn_jitter: f32,
    pub spawn_lateral_speed: f32,
    pub max_live_balls: usize,
    /// Balls still airborne after this many ticks settle where they are
    pub max_flight_ticks: u32,

    // === Payouts ===
    pub multipliers: Vec<f64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: PEG_ROWS,
            cols: PEG_COLS,
            spacing: PEG_SPACING,

            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            wall_inset: WALL_INSET,

            gravity: GRAVITY,
            friction: FRICTION,
            wall_restitution: WALL_RESTITUTION,
            peg_damping: PEG_DAMPING,
            peg_perturbation: PEG_PERTURBATION,
            peg_margin: PEG_MARGIN,

            ball_radius: BALL_RADIUS,
            drop_fraction: DROP_FRACTION,
            spawn_jitter: SPAWN_JITTER,
            spawn_lateral_speed: SPAWN_LATERAL_SPEED,
            max_live_balls: MAX_LIVE_BALLS,
            max_flight_ticks: MAX_FLIGHT_TICKS,

            multipliers: MULTIPLIERS.to_vec(),
        }
    }
}

impl BoardConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::config(format!("malformed board config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded board config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::config(format!("cannot serialize board config: {e}")))
    }

    /// Reject configurations that could never settle a ball or pay out
    pub fn validate(&self) -> Result<()> {
        validate_multipliers(&self.multipliers)?;
        let peg_count = self.rows as u64 * self.cols as u64;
        if peg_count > MAX_PEGS {
            return Err(EngineError::config(format!(
                "peg lattice of {peg_count} pegs exceeds the limit of {MAX_PEGS}"
            )));
        }
        if !(self.spacing > 0.0) {
            return Err(EngineError::config("peg spacing must be positive"));
        }
        if !(self.board_width > 0.0) || !(self.board_height > 0.0) {
            return Err(EngineError::config("board dimensions must be positive"));
        }
        if !(self.ball_radius > 0.0) {
            return Err(EngineError::config("ball radius must be positive"));
        }
        if self.left_boundary() >= self.right_boundary() {
            return Err(EngineError::config("board is too narrow for the ball"));
        }
        if !(self.floor() > 0.0) {
            return Err(EngineError::config("board is too short for the ball"));
        }
        if !(self.gravity > 0.0) {
            return Err(EngineError::config("gravity must be positive"));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(EngineError::config("friction must be in (0, 1)"));
        }
        if !(0.0..1.0).contains(&self.wall_restitution) {
            return Err(EngineError::config("wall restitution must be in [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.peg_damping) {
            return Err(EngineError::config("peg damping must be in [0, 1)"));
        }
        if !(self.peg_perturbation >= 0.0) || !(self.peg_margin >= 0.0) {
            return Err(EngineError::config("peg perturbation and margin must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.drop_fraction) {
            return Err(EngineError::config("drop fraction must be in [0, 1]"));
        }
        if !(self.spawn_jitter >= 0.0) || !(self.spawn_lateral_speed >= 0.0) {
            return Err(EngineError::config("spawn jitter and lateral speed must be non-negative"));
        }
        if self.max_live_balls == 0 {
            return Err(EngineError::config("max live balls must be at least 1"));
        }
        if self.max_flight_ticks == 0 {
            return Err(EngineError::config("max flight ticks must be at least 1"));
        }
        Ok(())
    }

    /// Leftmost x a ball may occupy
    #[inline]
    pub fn left_boundary(&self) -> f32 {
        self.wall_inset
    }

    /// Rightmost x a ball may occupy
    #[inline]
    pub fn right_boundary(&self) -> f32 {
        self.board_width - self.ball_radius - self.wall_inset
    }

    /// A ball at or below this y has landed
    #[inline]
    pub fn floor(&self) -> f32 {
        self.board_height - self.ball_radius * 2.0
    }

    /// Nominal x where balls are dropped, before jitter
    #[inline]
    pub fn drop_x(&self) -> f32 {
        self.board_width * self.drop_fraction
    }

    /// Peg reach: a ball closer than this to a peg bounces off it
    #[inline]
    pub fn collision_distance(&self) -> f32 {
        self.ball_radius + self.peg_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.multipliers.len(), 10);
        assert_eq!(config.left_boundary(), 5.0);
        assert_eq!(config.right_boundary(), 480.0 - 7.5 - 5.0);
        assert_eq!(config.floor(), 820.0 - 15.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BoardConfig::from_json(r#"{ "multipliers": [2.0, 0.5, 2.0], "max_live_balls": 3 }"#)
            .unwrap();
        assert_eq!(config.multipliers, vec![2.0, 0.5, 2.0]);
        assert_eq!(config.max_live_balls, 3);
        assert_eq!(config.rows, PEG_ROWS);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_json_round_trip() {
        let config = BoardConfig::default();
        let parsed = BoardConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_json() {
        let err = BoardConfig::from_json("{ rows: ").unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_rejects_empty_multipliers() {
        let config = BoardConfig {
            multipliers: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let config = BoardConfig {
            multipliers: vec![1.0, -0.5],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for config in [
            BoardConfig { spacing: 0.0, ..Default::default() },
            BoardConfig { board_width: -1.0, ..Default::default() },
            BoardConfig { board_height: 0.0, ..Default::default() },
            BoardConfig { board_width: 10.0, ..Default::default() },
        ] {
            assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));
        }
    }

    #[test]
    fn test_rejects_energy_gain() {
        for config in [
            BoardConfig { friction: 1.0, ..Default::default() },
            BoardConfig { friction: 0.0, ..Default::default() },
            BoardConfig { wall_restitution: 1.2, ..Default::default() },
            BoardConfig { peg_damping: 1.0, ..Default::default() },
            BoardConfig { gravity: 0.0, ..Default::default() },
        ] {
            assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));
        }
    }

    #[test]
    fn test_rejects_oversized_lattice() {
        // 70 000 x 70 000 overflows a u32 product
        let config = BoardConfig {
            rows: 70_000,
            cols: 70_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));

        let err = BoardConfig::from_json(r#"{ "rows": 4294967295, "cols": 4294967295 }"#).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));

        let at_limit = BoardConfig {
            rows: 100,
            cols: 100,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = BoardConfig {
            max_live_balls: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = BoardConfig::load("/nonexistent/board.json").unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}
