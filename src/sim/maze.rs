//! Maze grid and layout parsing
//!
//! The maze is built once per level load and never mutated afterward, so it
//! is shared read-only by every entity and the spawner.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of a single maze tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Exit,
}

impl TileKind {
    /// True if an entity's bounding box may occupy this tile
    pub fn walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn is_exit(self) -> bool {
        matches!(self, TileKind::Exit)
    }
}

/// Layout lines starting with this character are comments
const COMMENT_CHAR: char = ';';

/// Built-in layout used whenever a level has none or loading fails.
///
/// `#` wall, `.` floor, `E` exit, `P` player spawn, `Z` zombie spawn.
pub const DEFAULT_LAYOUT: &str = "\
; 15x15 fallback maze
###############
#P..#.........#
#.#.#.###.###.#
#.#.....#...#.#
#.####.####.#.#
#....#....#...#
####.####.###.#
#.............#
#.###.###.###.#
#...#.....#...#
###.###.###.###
#.#...........#
#.###.###.###.#
#............E#
###############
";

/// Immutable per-level tile grid with recorded spawn tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    tiles: Vec<TileKind>,
    rows: usize,
    cols: usize,
    player_spawn: Option<(usize, usize)>,
    zombie_spawns: Vec<(usize, usize)>,
    used_fallback: bool,
}

impl Maze {
    /// Parse a plain-text layout.
    ///
    /// One line per row; comment and blank lines are ignored; short rows are
    /// padded with walls; unrecognized characters are floor. Spawn markers
    /// resolve to floor plus a recorded coordinate and are case-insensitive.
    /// A layout with no usable rows falls back to [`DEFAULT_LAYOUT`] with a
    /// warning, never an error.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with(COMMENT_CHAR))
            .collect();

        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if lines.is_empty() || cols == 0 {
            log::warn!("empty maze layout, using built-in fallback");
            let mut maze = Self::parse(DEFAULT_LAYOUT);
            maze.used_fallback = true;
            return maze;
        }

        let rows = lines.len();
        let mut tiles = Vec::with_capacity(rows * cols);
        let mut player_spawn = None;
        let mut zombie_spawns = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let mut count = 0;
            for (col, ch) in line.chars().enumerate() {
                count += 1;
                tiles.push(match ch {
                    '#' => TileKind::Wall,
                    'E' => TileKind::Exit,
                    'P' | 'p' => {
                        player_spawn = Some((row, col));
                        TileKind::Floor
                    }
                    'Z' | 'z' => {
                        zombie_spawns.push((row, col));
                        TileKind::Floor
                    }
                    _ => TileKind::Floor,
                });
            }
            tiles.resize(tiles.len() + cols - count, TileKind::Wall);
        }

        Self {
            tiles,
            rows,
            cols,
            player_spawn,
            zombie_spawns,
            used_fallback: false,
        }
    }

    /// Load a layout file, falling back to the built-in layout on any read
    /// failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("loaded maze layout from {}", path.display());
                Self::parse(&text)
            }
            Err(e) => {
                log::warn!(
                    "failed to read maze layout {}: {}, using built-in fallback",
                    path.display(),
                    e
                );
                let mut maze = Self::parse(DEFAULT_LAYOUT);
                maze.used_fallback = true;
                maze
            }
        }
    }

    /// The built-in layout
    pub fn fallback() -> Self {
        Self::parse(DEFAULT_LAYOUT)
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// False out of bounds or on a wall
    pub fn walkable(&self, row: i32, col: i32) -> bool {
        self.in_bounds(row, col)
            && self
                .tile(row as usize, col as usize)
                .is_some_and(TileKind::walkable)
    }

    /// False out of bounds
    pub fn is_exit(&self, row: i32, col: i32) -> bool {
        self.in_bounds(row, col)
            && self
                .tile(row as usize, col as usize)
                .is_some_and(TileKind::is_exit)
    }

    /// Tile at (row, col), `None` out of bounds
    pub fn tile(&self, row: usize, col: usize) -> Option<TileKind> {
        (row < self.rows && col < self.cols).then(|| self.tiles[row * self.cols + col])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile recorded by a `P` marker, if the layout had one
    pub fn player_spawn(&self) -> Option<(usize, usize)> {
        self.player_spawn
    }

    /// Tiles recorded by `Z` markers
    pub fn zombie_spawns(&self) -> &[(usize, usize)] {
        &self.zombie_spawns
    }

    /// True if this maze came from the fallback layout instead of the
    /// requested source
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Walkable tiles, in row-major order (spawner candidate set)
    pub fn walkable_tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.tile(r, c).is_some_and(TileKind::walkable))
                .map(move |c| (r, c))
        })
    }
}
