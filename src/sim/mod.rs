//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session
//! - No rendering or platform dependencies

pub mod collectible;
pub mod collision;
pub mod danger;
pub mod maze;
pub mod movement;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zombie;

pub use collectible::{COLLECTIBLE_DECAY_RATE, COLLECTIBLE_MAX_VALUE, Collectible};
pub use collision::overlap;
pub use danger::DangerDetector;
pub use maze::{DEFAULT_LAYOUT, Maze, TileKind};
pub use movement::{MoveResult, blocked, resolve_move};
pub use player::{MoveIntent, Player};
pub use spawn::{SpawnError, Spawner};
pub use state::{Fades, GameEvent, GameMode, GameState, Hud, RoundOutcome};
pub use tick::{TickInput, tick};
pub use zombie::{Zombie, separate_zombies};
