//! Peg lattice
//!
//! Pegs sit on a staggered grid: even rows are shifted right by half a
//! spacing. Generated once per board and shared read-only by every ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A fixed peg position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
}

/// Immutable peg lattice, stored in lattice order (row-major)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PegField {
    pegs: Vec<Peg>,
    spacing: f32,
}

impl PegField {
    /// Build the lattice for `rows` x `cols` pegs
    pub fn generate(rows: u32, cols: u32, spacing: f32) -> Self {
        let mut pegs = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            let offset = if row % 2 == 0 { spacing / 2.0 } else { 0.0 };
            for col in 0..cols {
                pegs.push(Peg {
                    pos: Vec2::new(col as f32 * spacing + offset, row as f32 * spacing),
                });
            }
        }
        Self { pegs, spacing }
    }

    #[inline]
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peg> {
        self.pegs.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Bottom-right corner of the lattice's bounding box
    pub fn extent(&self) -> Vec2 {
        self.pegs
            .iter()
            .fold(Vec2::ZERO, |acc, peg| acc.max(peg.pos))
    }
}

impl<'a> IntoIterator for &'a PegField {
    type Item = &'a Peg;
    type IntoIter = std::slice::Iter<'a, Peg>;

    fn into_iter(self) -> Self::IntoIter {
        self.pegs.iter()
    }
}
