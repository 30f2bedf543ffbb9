//! Fixed timestep simulation tick
//!
//! One call advances the whole session by one tick: discrete input intents,
//! per-mode entity updates, the collision pass, the danger sensor, then the
//! overlay fades. Pausing freezes every gameplay timer.

use serde::{Deserialize, Serialize};

use super::player::MoveIntent;
use super::state::{GameEvent, GameMode, GameState};
use super::zombie;

/// Input intents for a single tick (already edge-detected by the host:
/// toggles are true for exactly one tick per key press)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Directional movement flags
    pub movement: MoveIntent,
    /// Start from the title screen, or restart after a round ends
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Rules screen toggle
    pub rules: bool,
    /// Night mode toggle (title screen only)
    pub night_mode: bool,
    /// Ask the host to show the leaderboard
    pub view_leaderboard: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.view_leaderboard {
        state.events.push(GameEvent::LeaderboardRequested);
    }

    // Discrete mode transitions
    match state.mode {
        GameMode::Title => {
            if input.night_mode {
                state.night_mode = !state.night_mode;
            }
            if input.rules {
                state.enter_rules();
            } else if input.start {
                state.mode = GameMode::Playing;
            }
        }
        GameMode::Playing => {
            if input.pause {
                state.mode = GameMode::Paused;
            }
        }
        GameMode::Paused => {
            if input.rules {
                state.enter_rules();
            } else if input.pause {
                state.mode = GameMode::Playing;
            }
        }
        GameMode::Rules => {
            if input.rules {
                state.exit_rules();
            }
        }
        GameMode::Win | GameMode::GameOver => {
            if input.start {
                state.restart_run();
            }
        }
        GameMode::Transition => {}
    }

    match state.mode {
        GameMode::Playing => {
            state.player.tick_timers();
            state.player.apply_intent(&state.maze, input.movement);

            if state.freeze_ticks > 0 {
                state.freeze_ticks -= 1;
                // Frozen zombies still run down their contact cooldowns
                for z in &mut state.zombies {
                    z.tick_cooldown();
                }
            } else {
                for z in &mut state.zombies {
                    z.update(&state.maze, &mut state.rng, &state.tuning);
                }
                if state.tuning.zombie_separation {
                    zombie::separate_zombies(
                        &mut state.zombies,
                        &state.maze,
                        &mut state.rng,
                        state.tuning.redirect_policy,
                    );
                }
            }

            if state.double_points_ticks > 0 {
                state.double_points_ticks -= 1;
            }

            for c in &mut state.collectibles {
                c.update_value();
            }

            state.collision_pass();

            state.danger.update(&state.player, &state.zombies);
        }
        GameMode::Transition => {
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                state.mode = GameMode::Playing;
            }
        }
        // Title, Paused, Rules, Win, GameOver: nothing simulates
        _ => {}
    }

    state.update_fades();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::consts::TRANSITION_TICKS;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default()).unwrap()
    }

    fn press(field: fn(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        field(&mut input);
        input
    }

    #[test]
    fn test_title_to_playing_on_start() {
        let mut state = state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.mode, GameMode::Title);

        tick(&mut state, &press(|i| i.start = true));
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = state();
        tick(&mut state, &press(|i| i.start = true));

        tick(&mut state, &press(|i| i.pause = true));
        assert_eq!(state.mode, GameMode::Paused);

        tick(&mut state, &press(|i| i.pause = true));
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_pause_freezes_gameplay_timers() {
        let mut state = state();
        tick(&mut state, &press(|i| i.start = true));
        tick(&mut state, &press(|i| i.pause = true));

        state.freeze_ticks = 50;
        state.double_points_ticks = 50;
        let value_before = state.collectibles[0].value();
        let positions: Vec<_> = state.zombies.iter().map(|z| z.pos).collect();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.freeze_ticks, 50);
        assert_eq!(state.double_points_ticks, 50);
        assert_eq!(state.collectibles[0].value(), value_before);
        let after: Vec<_> = state.zombies.iter().map(|z| z.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_transition_lasts_exact_duration() {
        let mut state = state();
        state.mode = GameMode::Playing;
        state.advance_level();
        assert_eq!(state.mode, GameMode::Transition);

        for i in 0..TRANSITION_TICKS {
            assert_eq!(state.mode, GameMode::Transition, "left early at tick {}", i);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_restart_only_from_terminal_modes() {
        let mut state = state();
        tick(&mut state, &press(|i| i.start = true));
        assert_eq!(state.mode, GameMode::Playing);

        // Start input does nothing mid-game
        tick(&mut state, &press(|i| i.start = true));
        assert_eq!(state.mode, GameMode::Playing);

        state.end_round(crate::sim::RoundOutcome::Loss);
        tick(&mut state, &press(|i| i.start = true));
        assert_eq!(state.mode, GameMode::Title);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_rules_from_title_and_back() {
        let mut state = state();
        tick(&mut state, &press(|i| i.rules = true));
        assert_eq!(state.mode, GameMode::Rules);

        tick(&mut state, &press(|i| i.rules = true));
        assert_eq!(state.mode, GameMode::Title);
    }

    #[test]
    fn test_night_mode_toggles_on_title() {
        let mut state = state();
        tick(&mut state, &press(|i| i.night_mode = true));
        assert!(state.night_mode);
        tick(&mut state, &press(|i| i.night_mode = true));
        assert!(!state.night_mode);
    }

    #[test]
    fn test_freeze_stops_zombies_but_cooldowns_run() {
        let mut state = state();
        tick(&mut state, &press(|i| i.start = true));

        state.freeze_ticks = 5;
        state.zombies[0].trigger_cooldown();
        let positions: Vec<_> = state.zombies.iter().map(|z| z.pos).collect();

        tick(&mut state, &TickInput::default());

        let after: Vec<_> = state.zombies.iter().map(|z| z.pos).collect();
        assert_eq!(positions, after);
        assert_eq!(state.freeze_ticks, 4);
    }

    #[test]
    fn test_leaderboard_intent_surfaces_event() {
        let mut state = state();
        tick(&mut state, &press(|i| i.view_leaderboard = true));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LeaderboardRequested)
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = state();
        let mut b = state();

        let inputs = [
            press(|i| i.start = true),
            press(|i| i.movement.right = true),
            press(|i| {
                i.movement.right = true;
                i.movement.down = true;
            }),
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.score, b.player.score);
        let pa: Vec<_> = a.zombies.iter().map(|z| z.pos).collect();
        let pb: Vec<_> = b.zombies.iter().map(|z| z.pos).collect();
        assert_eq!(pa, pb);
    }
}
