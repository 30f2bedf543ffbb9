//! Constrained-random placement of the player, zombies and collectibles
//!
//! Placement is rejection sampling: pick a uniformly random walkable tile and
//! discard it while any spacing constraint fails. The attempt budget is
//! explicit so a cramped maze surfaces a typed error instead of looping
//! forever.

use rand::Rng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::collectible::Collectible;
use super::maze::Maze;
use super::player::Player;
use super::zombie::Zombie;
use crate::config::{SpawnConfig, Tuning};
use crate::pixel_to_tile;

/// Tile the player lands on when the layout has no spawn marker
const PLAYER_FALLBACK_TILE: (usize, usize) = (1, 1);

/// Placement failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Rejection sampling exhausted its attempt budget
    #[error("placement attempt budget ({attempts}) exhausted")]
    Exhausted { attempts: u32 },
    /// A requested spawn tile is not walkable
    #[error("spawn tile ({row}, {col}) is not walkable")]
    BlockedSpawn { row: usize, col: usize },
}

/// Places entities for one level against a fixed maze
pub struct Spawner<'a> {
    maze: &'a Maze,
    cfg: SpawnConfig,
}

impl<'a> Spawner<'a> {
    pub fn new(maze: &'a Maze, cfg: SpawnConfig) -> Self {
        Self { maze, cfg }
    }

    /// Player at the layout's recorded spawn marker, or the fixed fallback
    /// tile when the layout has none. A non-walkable tile is an error either
    /// way.
    pub fn spawn_player(&self, speed: f32, lives: u32) -> Result<Player, SpawnError> {
        let (row, col) = self.maze.player_spawn().unwrap_or(PLAYER_FALLBACK_TILE);
        if !self.maze.walkable(row as i32, col as i32) {
            return Err(SpawnError::BlockedSpawn { row, col });
        }
        Ok(Player::at_tile(row, col, speed, lives))
    }

    /// Place `count` zombies.
    ///
    /// A layout with explicit zombie markers is honored exactly (a marker on
    /// a non-walkable tile is an error). Otherwise placement is rejection
    /// sampling: walkable, far enough from the player, spaced out from
    /// already-placed zombies, optionally split between maze halves.
    pub fn spawn_zombies(
        &self,
        player: &Player,
        count: usize,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) -> Result<Vec<Zombie>, SpawnError> {
        let markers = self.maze.zombie_spawns();
        if !markers.is_empty() {
            let mut zombies = Vec::with_capacity(markers.len());
            for &(row, col) in markers {
                let mut z = Zombie::at_tile(row, col, self.maze, tuning.zombie_speed)?;
                z.choose_direction(self.maze, rng, tuning.redirect_policy);
                zombies.push(z);
            }
            return Ok(zombies);
        }

        let (pr, pc) = player.center_tile();
        let rows = self.maze.rows();
        let top_count = count.div_ceil(2);

        let mut zombies = Vec::with_capacity(count);
        let mut attempts = 0;
        while zombies.len() < count {
            attempts += 1;
            if attempts > self.cfg.max_attempts {
                return Err(SpawnError::Exhausted {
                    attempts: self.cfg.max_attempts,
                });
            }

            let row = if self.cfg.half_split_zombies {
                if zombies.len() < top_count {
                    rng.random_range(0..(rows / 2).max(1))
                } else {
                    rng.random_range(rows / 2..rows)
                }
            } else {
                rng.random_range(0..rows)
            };
            let col = rng.random_range(0..self.maze.cols());

            if !self.maze.walkable(row as i32, col as i32) {
                continue;
            }
            if manhattan(row as i32, col as i32, pr, pc) < self.cfg.min_player_distance {
                continue;
            }
            let too_close = zombies.iter().any(|z: &Zombie| {
                let (zr, zc) = (pixel_to_tile(z.pos.y), pixel_to_tile(z.pos.x));
                manhattan(row as i32, col as i32, zr, zc) < self.cfg.min_zombie_spacing
            });
            if too_close {
                continue;
            }

            let mut z = Zombie::at_tile(row, col, self.maze, tuning.zombie_speed)?;
            z.choose_direction(self.maze, rng, tuning.redirect_policy);
            zombies.push(z);
        }

        Ok(zombies)
    }

    /// Place `count` collectibles on walkable tiles, spaced out from each
    /// other and from every zombie.
    pub fn spawn_collectibles(
        &self,
        zombies: &[Zombie],
        count: usize,
        rng: &mut Pcg32,
    ) -> Result<Vec<Collectible>, SpawnError> {
        let mut collectibles: Vec<Collectible> = Vec::with_capacity(count);
        let mut attempts = 0;
        while collectibles.len() < count {
            attempts += 1;
            if attempts > self.cfg.max_attempts {
                return Err(SpawnError::Exhausted {
                    attempts: self.cfg.max_attempts,
                });
            }

            let row = rng.random_range(0..self.maze.rows());
            let col = rng.random_range(0..self.maze.cols());

            if !self.maze.walkable(row as i32, col as i32) {
                continue;
            }
            let near_collectible = collectibles.iter().any(|c| {
                let (cr, cc) = (pixel_to_tile(c.pos.y), pixel_to_tile(c.pos.x));
                manhattan(row as i32, col as i32, cr, cc) < self.cfg.min_collectible_spacing
            });
            if near_collectible {
                continue;
            }
            let near_zombie = zombies.iter().any(|z| {
                let (zr, zc) = (pixel_to_tile(z.pos.y), pixel_to_tile(z.pos.x));
                manhattan(row as i32, col as i32, zr, zc)
                    < self.cfg.min_collectible_zombie_distance
            });
            if near_zombie {
                continue;
            }

            collectibles.push(Collectible::at_tile(row, col));
        }

        Ok(collectibles)
    }
}

fn manhattan(r1: i32, c1: i32, r2: i32, c2: i32) -> i32 {
    (r1 - r2).abs() + (c1 - c2).abs()
}
