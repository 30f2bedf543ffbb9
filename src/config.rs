//! Data-driven game balance
//!
//! Level table, placement spacing and tuning knobs, all plain data so a host
//! can override anything per session. Defaults reproduce the shipped game.

use serde::{Deserialize, Serialize};

/// Zombie direction re-selection policy.
///
/// Both variants exist in the game's history and play noticeably differently,
/// so the choice is configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RedirectPolicy {
    /// Uniform re-roll among the four cardinals, bounded attempts, falling
    /// back to standing still for the tick
    FreeReroll,
    /// A vertically-moving zombie only considers horizontal alternatives (and
    /// vice versa); the full 4-way roll happens only from a standstill. This
    /// produces corridor-following movement.
    #[default]
    PerpendicularBias,
}

/// Minimum spacing constraints for rejection-sampled placement.
///
/// Distances are Manhattan, in tile units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Minimum zombie distance from the player spawn
    pub min_player_distance: i32,
    /// Minimum spacing between zombies
    pub min_zombie_spacing: i32,
    /// Minimum spacing between collectibles
    pub min_collectible_spacing: i32,
    /// Minimum collectible distance from any zombie
    pub min_collectible_zombie_distance: i32,
    /// Split the zombie count evenly between the top and bottom halves of
    /// the maze to avoid clustering
    pub half_split_zombies: bool,
    /// Attempt budget for one placement call before giving up
    pub max_attempts: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_player_distance: 4,
            min_zombie_spacing: 2,
            min_collectible_spacing: 2,
            min_collectible_zombie_distance: 2,
            half_split_zombies: false,
            max_attempts: 500,
        }
    }
}

impl SpawnConfig {
    /// Constraint-relaxed copy used as a fallback when placement exhausts
    /// its attempt budget on a cramped maze
    pub fn relaxed(&self) -> Self {
        Self {
            min_player_distance: self.min_player_distance / 2,
            min_zombie_spacing: self.min_zombie_spacing / 2,
            min_collectible_spacing: self.min_collectible_spacing / 2,
            min_collectible_zombie_distance: self.min_collectible_zombie_distance / 2,
            ..self.clone()
        }
    }
}

/// One entry of the level table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Maze layout text; `None` uses the built-in layout
    pub layout: Option<String>,
    /// Zombies to place
    pub zombie_count: usize,
    /// Collectibles to place
    pub collectible_count: usize,
}

/// Game balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Player speed in pixels per tick
    pub player_speed: f32,
    /// Zombie speed in pixels per tick
    pub zombie_speed: f32,
    /// Starting lives
    pub starting_lives: u32,
    /// Chance of a forced upward nudge when the wander-bias timer fires
    pub wander_bias_chance: f64,
    /// Chance a collected pickup freezes the zombies
    pub freeze_chance: f64,
    /// Chance a collected pickup doubles points
    pub double_points_chance: f64,
    /// Danger-sensor radius in tiles
    pub danger_distance_tiles: f32,
    /// Zombie direction re-selection policy
    pub redirect_policy: RedirectPolicy,
    /// Push overlapping zombies apart
    pub zombie_separation: bool,
    /// Placement spacing constraints
    pub spawn: SpawnConfig,
    /// Level table; the last entry is the final level
    pub levels: Vec<LevelConfig>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            zombie_speed: 2.5,
            starting_lives: 3,
            wander_bias_chance: 0.35,
            freeze_chance: 0.15,
            double_points_chance: 0.15,
            danger_distance_tiles: 3.0,
            redirect_policy: RedirectPolicy::default(),
            zombie_separation: false,
            spawn: SpawnConfig::default(),
            levels: vec![
                LevelConfig {
                    layout: None,
                    zombie_count: 3,
                    collectible_count: 5,
                },
                LevelConfig {
                    layout: None,
                    zombie_count: 4,
                    collectible_count: 5,
                },
                LevelConfig {
                    layout: None,
                    zombie_count: 5,
                    collectible_count: 6,
                },
            ],
        }
    }
}

impl Tuning {
    /// Level table entry, clamped to the final level
    pub fn level(&self, index: usize) -> &LevelConfig {
        let last = self.levels.len().saturating_sub(1);
        &self.levels[index.min(last)]
    }

    /// True if `index` is the last entry of the level table
    pub fn is_final_level(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }
}
