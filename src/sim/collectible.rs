//! Time-decaying collectible
//!
//! A collectible's score value decays every tick it sits uncollected, so
//! dawdling is penalized. Collecting one resets the decay clock on all the
//! others (handled by the collision pass).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COLLECTIBLE_SIZE;
use crate::tile_center;

/// Full value of a fresh collectible
pub const COLLECTIBLE_MAX_VALUE: u32 = 1000;
/// Value lost per tick while uncollected
pub const COLLECTIBLE_DECAY_RATE: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: f32,
    value: u32,
    collected: bool,
}

impl Collectible {
    /// Create a collectible centered in tile (row, col) at full value
    pub fn at_tile(row: usize, col: usize) -> Self {
        Self {
            pos: tile_center(row, col, COLLECTIBLE_SIZE),
            size: COLLECTIBLE_SIZE,
            value: COLLECTIBLE_MAX_VALUE,
            collected: false,
        }
    }

    /// Decay one tick's worth of value, floored at zero
    pub fn update_value(&mut self) {
        if !self.collected {
            self.value = self.value.saturating_sub(COLLECTIBLE_DECAY_RATE);
        }
    }

    /// One-way transition to collected; returns the score award
    pub fn collect(&mut self) -> u32 {
        self.collected = true;
        self.value
    }

    /// Restore full value (collecting any collectible restarts the clock on
    /// the rest)
    pub fn reset_value(&mut self) {
        self.value = COLLECTIBLE_MAX_VALUE;
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
