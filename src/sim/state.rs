//! Game modes, overlay fades, timers and session state
//!
//! All state that must be snapshotted for the host lives here. The session
//! owns the maze, the entity lists and the seeded RNG; everything mutates
//! synchronously inside one tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectible::Collectible;
use super::danger::DangerDetector;
use super::maze::Maze;
use super::player::Player;
use super::spawn::{SpawnError, Spawner};
use super::zombie::Zombie;
use crate::config::{LevelConfig, SpawnConfig, Tuning};
use crate::consts::{PROMPT_SETTLE_TICKS, TRANSITION_TICKS};

/// Current game mode; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Title,
    Playing,
    Paused,
    /// Timed interstitial between levels
    Transition,
    Win,
    GameOver,
    /// In-game help screen, returns to wherever it was opened from
    Rules,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Loss,
}

/// Side effects the host acts on, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CameraShake { frames: u32, strength: i32 },
    PlayerHit { lives_left: u32 },
    Collected { awarded: u32 },
    FreezeStarted,
    DoublePointsStarted,
    ExitUnlocked,
    LevelAdvanced { level: usize },
    RoundEnded { outcome: RoundOutcome },
    /// Request the high-score name-entry prompt; fires at most once per
    /// round end
    HighScorePrompt,
    LeaderboardRequested,
}

/// Per-tick overlay fade rates
const TITLE_FADE_RATE: f32 = 0.02;
const PAUSE_FADE_RATE: f32 = 0.05;
const END_FADE_RATE: f32 = 0.01;
const HIGH_SCORE_FADE_RATE: f32 = 0.02;

/// Overlay fade alphas in [0, 1], purely presentational except that the
/// terminal fades gate the high-score prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fades {
    pub title: f32,
    pub pause: f32,
    pub win: f32,
    pub game_over: f32,
    pub high_score: f32,
}

impl Default for Fades {
    fn default() -> Self {
        Self {
            title: 1.0,
            pause: 0.0,
            win: 0.0,
            game_over: 0.0,
            high_score: 0.0,
        }
    }
}

impl Fades {
    fn update(&mut self, mode: GameMode, new_high_score: bool) {
        if mode != GameMode::Title && self.title > 0.0 {
            self.title = (self.title - TITLE_FADE_RATE).max(0.0);
        }

        if mode == GameMode::Paused {
            self.pause = (self.pause + PAUSE_FADE_RATE).min(1.0);
        } else {
            self.pause = 0.0;
        }

        if mode == GameMode::Win {
            self.win = (self.win + END_FADE_RATE).min(1.0);
        } else {
            self.win = 0.0;
        }

        if mode == GameMode::GameOver {
            self.game_over = (self.game_over + END_FADE_RATE).min(1.0);
        } else {
            self.game_over = 0.0;
        }

        if new_high_score {
            self.high_score = (self.high_score + HIGH_SCORE_FADE_RATE).min(1.0);
        }
    }
}

/// HUD snapshot the host reads once per frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hud {
    pub lives: u32,
    pub score: u32,
    pub level: usize,
    pub danger: bool,
    pub freeze_ticks: u32,
    pub double_points_ticks: u32,
    pub transition_ticks: u32,
    pub night_mode: bool,
    pub new_high_score: bool,
}

fn skipped_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Not serialized; call [`GameState::reseed`] after deserializing to
    /// restore a reproducible sequence
    #[serde(skip, default = "skipped_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub mode: GameMode,
    pub fades: Fades,
    pub new_high_score: bool,
    pub night_mode: bool,

    /// Current level index into the tuning level table
    pub level: usize,
    pub maze: Maze,
    pub player: Player,
    pub zombies: Vec<Zombie>,
    pub collectibles: Vec<Collectible>,
    pub exit_unlocked: bool,

    pub freeze_ticks: u32,
    pub double_points_ticks: u32,
    pub transition_ticks: u32,
    settle_ticks: u32,
    prompt_fired: bool,
    rules_return: Option<GameMode>,

    pub danger: DangerDetector,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Score carried into the current level
    pub carryover_score: u32,

    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with the given seed and load the first level
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, SpawnError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let lives = tuning.starting_lives;
        let (maze, player, zombies, collectibles) = build_level(&tuning, &mut rng, 0, 0, lives)?;

        Ok(Self {
            seed,
            rng,
            danger: DangerDetector::new(tuning.danger_distance_tiles),
            tuning,
            mode: GameMode::Title,
            fades: Fades::default(),
            new_high_score: false,
            night_mode: false,
            level: 0,
            maze,
            player,
            zombies,
            collectibles,
            exit_unlocked: false,
            freeze_ticks: 0,
            double_points_ticks: 0,
            transition_ticks: 0,
            settle_ticks: 0,
            prompt_fired: false,
            rules_return: None,
            time_ticks: 0,
            carryover_score: 0,
            events: Vec::new(),
        })
    }

    /// Restore a reproducible RNG after deserializing
    pub fn reseed(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Rebuild the given level in place, carrying score and lives
    pub(crate) fn load_level(
        &mut self,
        level: usize,
        score: u32,
        lives: u32,
    ) -> Result<(), SpawnError> {
        let (maze, player, zombies, collectibles) =
            build_level(&self.tuning, &mut self.rng, level, score, lives)?;
        self.level = level;
        self.maze = maze;
        self.player = player;
        self.zombies = zombies;
        self.collectibles = collectibles;
        self.exit_unlocked = false;
        self.freeze_ticks = 0;
        self.double_points_ticks = 0;
        log::info!("loaded level {}", level);
        Ok(())
    }

    /// Exit reached on a non-final level: carry the score forward, load the
    /// next level and enter the timed transition. An unplayable next level
    /// ends the round instead of wedging the session.
    pub(crate) fn advance_level(&mut self) {
        let score = self.player.score;
        let lives = self.player.lives;
        self.carryover_score = score;

        let next = self.level + 1;
        match self.load_level(next, score, lives) {
            Ok(()) => {
                self.mode = GameMode::Transition;
                self.transition_ticks = TRANSITION_TICKS;
                self.events.push(GameEvent::LevelAdvanced { level: next });
            }
            Err(e) => {
                log::error!("level {} unplayable ({}), ending round", next, e);
                self.end_round(RoundOutcome::Win);
            }
        }
    }

    /// Enter a terminal mode and arm the one-shot high-score prompt
    pub(crate) fn end_round(&mut self, outcome: RoundOutcome) {
        self.mode = match outcome {
            RoundOutcome::Win => GameMode::Win,
            RoundOutcome::Loss => GameMode::GameOver,
        };
        self.settle_ticks = PROMPT_SETTLE_TICKS;
        self.prompt_fired = false;
        self.events.push(GameEvent::RoundEnded { outcome });
    }

    /// Full reset back to the title screen. Night mode survives; everything
    /// else restarts from level 0.
    pub(crate) fn restart_run(&mut self) {
        let lives = self.tuning.starting_lives;
        if let Err(e) = self.load_level(0, 0, lives) {
            log::error!("failed to restart run: {}", e);
            return;
        }
        self.mode = GameMode::Title;
        self.fades = Fades::default();
        self.new_high_score = false;
        self.carryover_score = 0;
        self.transition_ticks = 0;
        self.settle_ticks = 0;
        self.prompt_fired = false;
        self.rules_return = None;
    }

    pub(crate) fn enter_rules(&mut self) {
        self.rules_return = Some(self.mode);
        self.mode = GameMode::Rules;
    }

    pub(crate) fn exit_rules(&mut self) {
        self.mode = self.rules_return.take().unwrap_or(GameMode::Title);
    }

    /// Advance every overlay fade one tick, then the settle countdown that
    /// gates the high-score prompt once a terminal fade completes
    pub(crate) fn update_fades(&mut self) {
        self.fades.update(self.mode, self.new_high_score);

        let fade_done = match self.mode {
            GameMode::Win => self.fades.win >= 1.0,
            GameMode::GameOver => self.fades.game_over >= 1.0,
            _ => false,
        };
        if fade_done && !self.prompt_fired {
            self.settle_ticks = self.settle_ticks.saturating_sub(1);
            if self.settle_ticks == 0 {
                self.prompt_fired = true;
                self.events.push(GameEvent::HighScorePrompt);
            }
        }
    }

    /// Flag a new high score (host decides, after consulting the
    /// leaderboard); restarts the banner fade
    pub fn set_new_high_score(&mut self, value: bool) {
        self.new_high_score = value;
        self.fades.high_score = 0.0;
    }

    /// HUD snapshot for the host
    pub fn hud(&self) -> Hud {
        Hud {
            lives: self.player.lives,
            score: self.player.score,
            level: self.level,
            danger: self.danger.in_danger(),
            freeze_ticks: self.freeze_ticks,
            double_points_ticks: self.double_points_ticks,
            transition_ticks: self.transition_ticks,
            night_mode: self.night_mode,
            new_high_score: self.new_high_score,
        }
    }

    /// Take this tick's events for the host to act on
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Build one level's maze and entities, relaxing spacing constraints once if
/// placement exhausts its budget on a cramped maze
fn build_level(
    tuning: &Tuning,
    rng: &mut Pcg32,
    level: usize,
    score: u32,
    lives: u32,
) -> Result<(Maze, Player, Vec<Zombie>, Vec<Collectible>), SpawnError> {
    let cfg = tuning.level(level);
    let maze = match &cfg.layout {
        Some(text) => Maze::parse(text),
        None => Maze::fallback(),
    };

    let (player, zombies, collectibles) =
        match place_entities(&maze, tuning.spawn.clone(), tuning, cfg, score, lives, rng) {
            Ok(placed) => placed,
            Err(SpawnError::Exhausted { .. }) => {
                log::warn!(
                    "placement exhausted on level {}, retrying with relaxed spacing",
                    level
                );
                place_entities(&maze, tuning.spawn.relaxed(), tuning, cfg, score, lives, rng)?
            }
            Err(e) => return Err(e),
        };

    Ok((maze, player, zombies, collectibles))
}

fn place_entities(
    maze: &Maze,
    spawn_cfg: SpawnConfig,
    tuning: &Tuning,
    level_cfg: &LevelConfig,
    score: u32,
    lives: u32,
    rng: &mut Pcg32,
) -> Result<(Player, Vec<Zombie>, Vec<Collectible>), SpawnError> {
    let spawner = Spawner::new(maze, spawn_cfg);
    let mut player = spawner.spawn_player(tuning.player_speed, lives)?;
    player.score = score;
    let zombies = spawner.spawn_zombies(&player, level_cfg.zombie_count, rng, tuning)?;
    let collectibles = spawner.spawn_collectibles(&zombies, level_cfg.collectible_count, rng)?;
    Ok((player, zombies, collectibles))
}
