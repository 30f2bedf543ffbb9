//! Per-tick collision and scoring pass
//!
//! Runs once per simulation tick, after everything has moved, in a fixed
//! order: zombie contact, collectible pickup, exit unlock, exit check. The
//! pass owns the session's entity lists for exactly one call.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, RoundOutcome};
use crate::consts::{
    CAMERA_SHAKE_FRAMES, CAMERA_SHAKE_STRENGTH, DOUBLE_POINTS_TICKS, FREEZE_TICKS,
};

/// Axis-aligned bounding-box overlap between two squares
pub fn overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.x < b_pos.x + b_size
        && a_pos.x + a_size > b_pos.x
        && a_pos.y < b_pos.y + b_size
        && a_pos.y + a_size > b_pos.y
}

impl GameState {
    /// The collision and scoring pass
    pub(crate) fn collision_pass(&mut self) {
        // Zombie contact. A touch starts that zombie's cooldown whether or
        // not the player takes damage.
        for i in 0..self.zombies.len() {
            if self.zombies[i].in_cooldown() {
                continue;
            }
            let z = &self.zombies[i];
            if !overlap(self.player.pos, self.player.size, z.pos, z.size) {
                continue;
            }
            self.zombies[i].trigger_cooldown();

            if self.player.is_invincible() {
                continue;
            }
            self.player.lose_life();
            self.player.trigger_invincibility();
            self.player.trigger_flash();
            self.events.push(GameEvent::CameraShake {
                frames: CAMERA_SHAKE_FRAMES,
                strength: CAMERA_SHAKE_STRENGTH,
            });
            self.events.push(GameEvent::PlayerHit {
                lives_left: self.player.lives,
            });

            if self.player.is_dead() {
                self.end_round(RoundOutcome::Loss);
                return;
            }
        }

        // Collectible pickup
        for i in 0..self.collectibles.len() {
            let c = &self.collectibles[i];
            if c.is_collected() || !overlap(self.player.pos, self.player.size, c.pos, c.size) {
                continue;
            }

            let mut earned = self.collectibles[i].collect();
            if self.double_points_ticks > 0 {
                earned *= 2;
            }
            self.player.add_score(earned);
            self.events.push(GameEvent::Collected { awarded: earned });

            if self.rng.random_bool(self.tuning.freeze_chance) {
                self.freeze_ticks = FREEZE_TICKS;
                self.events.push(GameEvent::FreezeStarted);
            }
            if self.rng.random_bool(self.tuning.double_points_chance) {
                self.double_points_ticks = DOUBLE_POINTS_TICKS;
                self.events.push(GameEvent::DoublePointsStarted);
            }

            // Collecting one restarts the decay clock on all the others
            for (j, other) in self.collectibles.iter_mut().enumerate() {
                if j != i && !other.is_collected() {
                    other.reset_value();
                }
            }
        }

        // Exit unlocks once everything is collected
        let all_collected = self.collectibles.iter().all(|c| c.is_collected());
        if all_collected && !self.exit_unlocked {
            self.exit_unlocked = true;
            self.events.push(GameEvent::ExitUnlocked);
        }

        // Standing on the exit: next level, or the win on the final one
        let (row, col) = self.player.center_tile();
        if self.exit_unlocked && self.maze.is_exit(row, col) {
            if self.tuning.is_final_level(self.level) {
                self.end_round(RoundOutcome::Win);
            } else {
                self.advance_level();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::sim::collectible::Collectible;
    use crate::sim::maze::Maze;
    use crate::sim::state::GameMode;
    use crate::sim::zombie::Zombie;
    use crate::tile_center;

    /// Session on a small open room with nothing spawned, for hand-placed
    /// scenarios
    fn bare_state() -> GameState {
        let tuning = Tuning {
            freeze_chance: 0.0,
            double_points_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(5, tuning).unwrap();
        state.maze = Maze::parse("#######\n#.....#\n#.....#\n#..E..#\n#######");
        state.player = crate::sim::player::Player::at_tile(1, 1, 3.0, 3);
        state.zombies.clear();
        state.collectibles.clear();
        state.exit_unlocked = false;
        state.mode = GameMode::Playing;
        state
    }

    fn zombie_on_player(state: &GameState) -> Zombie {
        let mut z = Zombie::at_tile(1, 1, &state.maze, 2.5).unwrap();
        z.pos = state.player.pos;
        z
    }

    #[test]
    fn test_overlap() {
        assert!(overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(5.0, 5.0),
            10.0
        ));
        // Touching edges do not overlap
        assert!(!overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(10.0, 0.0),
            10.0
        ));
    }

    #[test]
    fn test_zombie_contact_costs_a_life() {
        let mut state = bare_state();
        state.zombies.push(zombie_on_player(&state));

        state.collision_pass();
        assert_eq!(state.player.lives, 2);
        assert!(state.player.is_invincible());
        assert!(state.zombies[0].in_cooldown());
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::CameraShake { .. })));
    }

    #[test]
    fn test_cooldown_blocks_repeat_damage() {
        let mut state = bare_state();
        let mut z = zombie_on_player(&state);
        z.trigger_cooldown();
        state.zombies.push(z);

        state.collision_pass();
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_invincible_player_takes_no_damage() {
        let mut state = bare_state();
        state.player.trigger_invincibility();
        state.zombies.push(zombie_on_player(&state));

        state.collision_pass();
        assert_eq!(state.player.lives, 3);
        // The touch still consumes the zombie's cooldown
        assert!(state.zombies[0].in_cooldown());
    }

    #[test]
    fn test_last_life_ends_round_same_tick() {
        let mut state = bare_state();
        state.player.lives = 1;
        state.zombies.push(zombie_on_player(&state));

        state.collision_pass();
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_collect_awards_value_and_resets_others() {
        let mut state = bare_state();
        let mut on_player = Collectible::at_tile(1, 1);
        on_player.pos = state.player.pos;
        let mut far = Collectible::at_tile(2, 4);
        for _ in 0..100 {
            on_player.update_value();
            far.update_value();
        }
        state.collectibles.push(on_player);
        state.collectibles.push(far);

        state.collision_pass();
        assert_eq!(state.player.score, 800);
        assert!(state.collectibles[0].is_collected());
        // The other collectible's decay clock restarted
        assert_eq!(state.collectibles[1].value(), 1000);
        assert!(!state.exit_unlocked);
    }

    #[test]
    fn test_collected_collectible_awards_nothing_again() {
        let mut state = bare_state();
        let mut c = Collectible::at_tile(1, 1);
        c.pos = state.player.pos;
        state.collectibles.push(c);

        state.collision_pass();
        let score = state.player.score;
        assert!(score > 0);
        state.drain_events();

        // Player still overlapping; a second pass must not re-award
        state.collision_pass();
        assert_eq!(state.player.score, score);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_double_points_doubles_award() {
        let mut state = bare_state();
        state.double_points_ticks = 10;
        let mut c = Collectible::at_tile(1, 1);
        c.pos = state.player.pos;
        state.collectibles.push(c);

        state.collision_pass();
        assert_eq!(state.player.score, 2000);
    }

    #[test]
    fn test_all_collected_unlocks_exit() {
        let mut state = bare_state();
        let mut c = Collectible::at_tile(1, 1);
        c.pos = state.player.pos;
        state.collectibles.push(c);

        state.collision_pass();
        assert!(state.exit_unlocked);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ExitUnlocked)
        );
    }

    #[test]
    fn test_exit_on_final_level_wins() {
        let mut state = bare_state();
        state.level = state.tuning.levels.len() - 1;
        state.exit_unlocked = true;
        state.player.pos = tile_center(3, 3, state.player.size);

        state.collision_pass();
        assert_eq!(state.mode, GameMode::Win);
    }

    #[test]
    fn test_exit_on_nonfinal_level_transitions_with_score() {
        let mut state = bare_state();
        state.player.add_score(640);
        state.exit_unlocked = true;
        state.player.pos = tile_center(3, 3, state.player.size);

        state.collision_pass();
        assert_eq!(state.mode, GameMode::Transition);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.score, 640);
        assert_eq!(state.carryover_score, 640);
    }

    #[test]
    fn test_locked_exit_does_nothing() {
        let mut state = bare_state();
        // One uncollected collectible keeps the exit locked
        state.collectibles.push(Collectible::at_tile(2, 4));
        state.player.pos = tile_center(3, 3, state.player.size);

        state.collision_pass();
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.level, 0);
    }
}
