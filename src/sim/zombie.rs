//! Zombie controller
//!
//! Zombies wander in straight lines until a wall blocks them, then pick a
//! new direction. A periodic upward bias keeps them from pooling in the
//! bottom half of the maze.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::movement;
use super::spawn::SpawnError;
use crate::config::{RedirectPolicy, Tuning};
use crate::consts::{CONTACT_COOLDOWN_TICKS, WANDER_BIAS_PERIOD_TICKS, ZOMBIE_SIZE};
use crate::{pixel_to_tile, tile_center};

/// Bounded attempts before a redirect gives up and stands still for the tick
const REDIRECT_ATTEMPTS: u32 = 10;

/// A wandering enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Current movement direction in pixels per tick
    pub dir: Vec2,
    cooldown_ticks: u32,
    wander_timer: u32,
}

impl Zombie {
    /// Create a zombie centered in tile (row, col).
    ///
    /// A non-walkable tile is a construction error, never a silent placement
    /// inside a wall.
    pub fn at_tile(row: usize, col: usize, maze: &Maze, speed: f32) -> Result<Self, SpawnError> {
        let pos = tile_center(row, col, ZOMBIE_SIZE);
        if movement::blocked(maze, pos, ZOMBIE_SIZE) {
            return Err(SpawnError::BlockedSpawn { row, col });
        }
        Ok(Self {
            pos,
            size: ZOMBIE_SIZE,
            speed,
            dir: Vec2::ZERO,
            cooldown_ticks: 0,
            wander_timer: 0,
        })
    }

    pub fn in_cooldown(&self) -> bool {
        self.cooldown_ticks > 0
    }

    /// Start the contact cooldown so one touch cannot damage every frame
    pub fn trigger_cooldown(&mut self) {
        self.cooldown_ticks = CONTACT_COOLDOWN_TICKS;
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
    }

    /// Advance one tick: cooldown, wander bias, then straight-line movement
    /// with wall-triggered redirection.
    pub fn update(&mut self, maze: &Maze, rng: &mut Pcg32, tuning: &Tuning) {
        self.tick_cooldown();

        // Occasional upward nudge when in the bottom half
        self.wander_timer += 1;
        if self.wander_timer > WANDER_BIAS_PERIOD_TICKS {
            let row = pixel_to_tile(self.pos.y);
            let mid = (maze.rows() / 2) as i32;
            if row > mid && rng.random_bool(tuning.wander_bias_chance) {
                self.dir = Vec2::new(0.0, -self.speed);
            }
            self.wander_timer = 0;
        }

        let result = movement::resolve_move(maze, self.pos, self.size, self.dir);
        if result.blocked() {
            self.choose_direction(maze, rng, tuning.redirect_policy);
            return;
        }
        self.pos = result.pos;
    }

    /// Pick a new cardinal direction per the configured policy, testing each
    /// candidate against the maze. Exhausting the attempt budget leaves the
    /// zombie stationary; the next blocked tick re-rolls.
    pub fn choose_direction(&mut self, maze: &Maze, rng: &mut Pcg32, policy: RedirectPolicy) {
        let moving_horiz = self.dir.x != 0.0;
        let moving_vert = self.dir.y != 0.0;

        for _ in 0..REDIRECT_ATTEMPTS {
            let candidate = match policy {
                RedirectPolicy::FreeReroll => self.cardinal(rng.random_range(0..4)),
                RedirectPolicy::PerpendicularBias => {
                    if moving_vert {
                        Vec2::new(if rng.random_bool(0.5) { self.speed } else { -self.speed }, 0.0)
                    } else if moving_horiz {
                        Vec2::new(0.0, if rng.random_bool(0.5) { self.speed } else { -self.speed })
                    } else {
                        self.cardinal(rng.random_range(0..4))
                    }
                }
            };

            if !movement::blocked(maze, self.pos + candidate, self.size) {
                self.dir = candidate;
                return;
            }
        }

        self.dir = Vec2::ZERO;
    }

    fn cardinal(&self, index: u32) -> Vec2 {
        match index {
            0 => Vec2::new(self.speed, 0.0),
            1 => Vec2::new(-self.speed, 0.0),
            2 => Vec2::new(0.0, self.speed),
            _ => Vec2::new(0.0, -self.speed),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Push overlapping zombies apart along the inter-center vector by half the
/// overlap. A push only commits when the resulting position is walkable, and
/// the trailing zombie re-selects its direction.
pub fn separate_zombies(
    zombies: &mut [Zombie],
    maze: &Maze,
    rng: &mut Pcg32,
    policy: RedirectPolicy,
) {
    for i in 0..zombies.len() {
        for j in (i + 1)..zombies.len() {
            let (head, tail) = zombies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let delta = b.center() - a.center();
            let dist = delta.length();
            let min_dist = (a.size + b.size) / 2.0;
            if dist >= min_dist {
                continue;
            }

            if dist > 0.0 {
                let push = delta / dist * ((min_dist - dist) / 2.0);
                let a_new = a.pos - push;
                let b_new = b.pos + push;
                if !movement::blocked(maze, a_new, a.size) {
                    a.pos = a_new;
                }
                if !movement::blocked(maze, b_new, b.size) {
                    b.pos = b_new;
                }
            }
            b.choose_direction(maze, rng, policy);
        }
    }
}
