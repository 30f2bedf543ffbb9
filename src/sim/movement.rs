//! Axis-separated movement resolution against the maze grid
//!
//! The one collision primitive shared by the player and zombies: attempt a
//! move one axis at a time and reject only the blocked axis, which is what
//! lets entities slide along walls when moving diagonally into them.

use glam::Vec2;

use super::maze::Maze;
use crate::consts::TILE_SIZE;

/// Result of a resolved move attempt
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    /// Position after applying whichever axes were clear
    pub pos: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

impl MoveResult {
    /// True if either axis was rejected
    pub fn blocked(&self) -> bool {
        self.blocked_x || self.blocked_y
    }
}

/// True if a square of `size` at `pos` overlaps any non-walkable tile.
///
/// Samples the four bounding-box corners; a coordinate exactly on a tile
/// boundary tests as the lower-index tile (truncating division).
pub fn blocked(maze: &Maze, pos: Vec2, size: f32) -> bool {
    let left = pos.x as i32 / TILE_SIZE;
    let right = (pos.x + size) as i32 / TILE_SIZE;
    let top = pos.y as i32 / TILE_SIZE;
    let bottom = (pos.y + size) as i32 / TILE_SIZE;

    !maze.walkable(top, left)
        || !maze.walkable(top, right)
        || !maze.walkable(bottom, left)
        || !maze.walkable(bottom, right)
}

/// Resolve a candidate `delta` for a square of `size` at `pos`.
///
/// X is attempted first, then Y against the possibly-updated X, each axis
/// keeping its prior coordinate when any corner lands on a non-walkable tile.
pub fn resolve_move(maze: &Maze, pos: Vec2, size: f32, delta: Vec2) -> MoveResult {
    let mut out = pos;

    let blocked_x = blocked(maze, Vec2::new(pos.x + delta.x, out.y), size);
    if !blocked_x {
        out.x = pos.x + delta.x;
    }

    let blocked_y = blocked(maze, Vec2::new(out.x, pos.y + delta.y), size);
    if !blocked_y {
        out.y = pos.y + delta.y;
    }

    MoveResult {
        pos: out,
        blocked_x,
        blocked_y,
    }
}
