//! Player danger proximity sensor
//!
//! Pure UI feedback: a boolean the HUD reads, with no effect on control flow.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::zombie::Zombie;
use crate::consts::TILE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DangerDetector {
    distance_px: f32,
    in_danger: bool,
}

impl DangerDetector {
    pub fn new(distance_tiles: f32) -> Self {
        Self {
            distance_px: distance_tiles * TILE_SIZE as f32,
            in_danger: false,
        }
    }

    /// Recompute after a tick: in danger when any zombie's center is within
    /// the configured radius of the player's center
    pub fn update(&mut self, player: &Player, zombies: &[Zombie]) {
        self.in_danger = zombies
            .iter()
            .any(|z| z.center().distance(player.center()) < self.distance_px);
    }

    pub fn in_danger(&self) -> bool {
        self.in_danger
    }
}
