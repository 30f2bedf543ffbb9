//! Maze Shamble - a tile-maze survival arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `config`: Data-driven game balance (level table, spacing, tuning)
//! - `scores`: Leaderboard persistence
//!
//! The crate is a library consumed by a host loop. The host feeds a
//! [`sim::TickInput`] at a fixed rate, reads state back for rendering, and
//! drains [`sim::GameEvent`]s for side effects (camera shake, power-up
//! borders, the high-score name prompt). Rendering, input collection and
//! window management all live in the host.

pub mod config;
pub mod scores;
pub mod sim;

pub use config::{LevelConfig, RedirectPolicy, SpawnConfig, Tuning};
pub use scores::{ScoreBoard, ScoreEntry};
pub use sim::{GameEvent, GameMode, GameState, TickInput, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate all tick counters are denominated in
    pub const TICK_HZ: u32 = 60;

    /// Size of each maze tile in pixels
    pub const TILE_SIZE: i32 = 32;
    /// Player bounding-box edge in pixels (smaller than a tile so the player
    /// can corner and slide)
    pub const PLAYER_SIZE: f32 = 18.0;
    /// Zombie bounding-box edge in pixels
    pub const ZOMBIE_SIZE: f32 = 24.0;
    /// Collectible edge in pixels
    pub const COLLECTIBLE_SIZE: f32 = 16.0;

    /// Diagonal intent scale so diagonal speed equals axial speed
    pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

    /// Post-hit damage immunity (1.5 s)
    pub const INVINCIBILITY_TICKS: u32 = 90;
    /// Post-hit flash, expires independently of invincibility
    pub const FLASH_TICKS: u32 = 30;
    /// Zombie contact cooldown after touching the player
    pub const CONTACT_COOLDOWN_TICKS: u32 = 20;
    /// Period of the zombie upward wander bias
    pub const WANDER_BIAS_PERIOD_TICKS: u32 = 180;

    /// Enemy freeze power-up duration (3 s)
    pub const FREEZE_TICKS: u32 = 180;
    /// Double-points power-up duration (5 s)
    pub const DOUBLE_POINTS_TICKS: u32 = 300;
    /// Between-level transition countdown (3 s)
    pub const TRANSITION_TICKS: u32 = 180;
    /// Delay between a terminal fade completing and the name prompt (0.5 s)
    pub const PROMPT_SETTLE_TICKS: u32 = 30;

    /// Camera shake parameters surfaced to the host on player hits
    pub const CAMERA_SHAKE_FRAMES: u32 = 8;
    pub const CAMERA_SHAKE_STRENGTH: i32 = 3;
}

/// Pixel position that centers a square of `size` within tile (row, col)
#[inline]
pub fn tile_center(row: usize, col: usize, size: f32) -> Vec2 {
    let tile = consts::TILE_SIZE as f32;
    Vec2::new(
        col as f32 * tile + (tile - size) / 2.0,
        row as f32 * tile + (tile - size) / 2.0,
    )
}

/// Tile index containing a pixel coordinate.
///
/// Truncating division: a coordinate exactly on a tile boundary belongs to
/// the lower-index tile.
#[inline]
pub fn pixel_to_tile(p: f32) -> i32 {
    p as i32 / consts::TILE_SIZE
}
