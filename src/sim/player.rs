//! Player controller
//!
//! The player moves in pixel space and is smaller than a tile, allowing
//! smooth cornering and wall sliding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::movement;
use crate::consts::{FLASH_TICKS, INVINCIBILITY_TICKS, PLAYER_SIZE};
use crate::{pixel_to_tile, tile_center};

/// Directional movement flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_zero(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub lives: u32,
    pub score: u32,
    /// Facing angle in radians; persists while standing still
    pub facing: f32,
    invincibility_ticks: u32,
    flash_ticks: u32,
}

impl Player {
    /// Create a player centered in tile (row, col)
    pub fn at_tile(row: usize, col: usize, speed: f32, lives: u32) -> Self {
        Self {
            pos: tile_center(row, col, PLAYER_SIZE),
            size: PLAYER_SIZE,
            speed,
            lives,
            score: 0,
            facing: 0.0,
            invincibility_ticks: 0,
            flash_ticks: 0,
        }
    }

    /// Move according to directional flags, with diagonal speed normalized
    /// to axial speed, then resolve against the maze per axis.
    pub fn apply_intent(&mut self, maze: &Maze, intent: MoveIntent) {
        let mut delta = Vec2::ZERO;
        if intent.left {
            delta.x -= self.speed;
        }
        if intent.right {
            delta.x += self.speed;
        }
        if intent.up {
            delta.y -= self.speed;
        }
        if intent.down {
            delta.y += self.speed;
        }

        if delta.x != 0.0 && delta.y != 0.0 {
            delta *= crate::consts::DIAGONAL_FACTOR;
        }

        if delta != Vec2::ZERO {
            self.facing = delta.y.atan2(delta.x);
        }

        self.pos = movement::resolve_move(maze, self.pos, self.size, delta).pos;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Start the post-hit damage immunity window
    pub fn trigger_invincibility(&mut self) {
        self.invincibility_ticks = INVINCIBILITY_TICKS;
    }

    /// Start the post-hit flash (visual only, expires on its own)
    pub fn trigger_flash(&mut self) {
        self.flash_ticks = FLASH_TICKS;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Advance the invincibility and flash countdowns one tick
    pub fn tick_timers(&mut self) {
        self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }

    /// Tile under the player's center
    pub fn center_tile(&self) -> (i32, i32) {
        (
            pixel_to_tile(self.pos.y + self.size / 2.0),
            pixel_to_tile(self.pos.x + self.size / 2.0),
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn maze() -> Maze {
        Maze::fallback()
    }

    fn player() -> Player {
        Player::at_tile(1, 1, 3.0, 3)
    }

    #[test]
    fn test_diagonal_speed_matches_axial() {
        let maze = Maze::parse("#####\n#...#\n#...#\n#...#\n#####");
        let mut axial = Player::at_tile(1, 1, 3.0, 3);
        let mut diagonal = Player::at_tile(1, 1, 3.0, 3);

        let start = axial.pos;
        axial.apply_intent(
            &maze,
            MoveIntent {
                right: true,
                ..Default::default()
            },
        );
        diagonal.apply_intent(
            &maze,
            MoveIntent {
                right: true,
                down: true,
                ..Default::default()
            },
        );

        let axial_dist = axial.pos.distance(start);
        let diagonal_dist = diagonal.pos.distance(start);
        assert!((axial_dist - diagonal_dist).abs() < 0.001);
    }

    #[test]
    fn test_facing_persists_when_idle() {
        let maze = maze();
        let mut p = player();
        p.apply_intent(
            &maze,
            MoveIntent {
                down: true,
                ..Default::default()
            },
        );
        let facing = p.facing;
        assert!(facing > 0.0);

        p.apply_intent(&maze, MoveIntent::default());
        assert_eq!(p.facing, facing);
    }

    #[test]
    fn test_lose_life_and_death() {
        let mut p = player();
        assert!(!p.is_dead());
        p.lose_life();
        p.lose_life();
        p.lose_life();
        assert!(p.is_dead());
        // No underflow below zero
        p.lose_life();
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_invincibility_and_flash_expire_independently() {
        let mut p = player();
        p.trigger_invincibility();
        p.trigger_flash();

        for _ in 0..FLASH_TICKS {
            p.tick_timers();
        }
        assert!(!p.is_flashing());
        assert!(p.is_invincible());

        for _ in 0..(INVINCIBILITY_TICKS - FLASH_TICKS) {
            p.tick_timers();
        }
        assert!(!p.is_invincible());
    }

    #[test]
    fn test_score_is_additive() {
        let mut p = player();
        p.add_score(100);
        p.add_score(250);
        assert_eq!(p.score, 350);
    }

    proptest! {
        /// Collision invariant: under any intent sequence, no bounding-box
        /// corner ever settles on a non-walkable tile.
        #[test]
        fn prop_corners_stay_walkable(intents in prop::collection::vec(0u8..16, 1..300)) {
            let maze = maze();
            let mut p = player();
            for bits in intents {
                let intent = MoveIntent {
                    up: bits & 1 != 0,
                    down: bits & 2 != 0,
                    left: bits & 4 != 0,
                    right: bits & 8 != 0,
                };
                p.apply_intent(&maze, intent);
                prop_assert!(!movement::blocked(&maze, p.pos, p.size));
            }
        }
    }
}
