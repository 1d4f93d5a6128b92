//! Frame driver
//!
//! One call to [`tick`] advances the session by exactly one frame in a fixed
//! order: player, spawner/boss, kinematics, collisions, outcome.

use serde::{Deserialize, Serialize};

use super::collision::{self, Resolution};
use super::pool::advance_all;
use super::snapshot::{GameEvent, Snapshot};
use super::state::{GameState, SessionStatus};
use super::{boss, player, spawner};

/// Player intent for a single tick (level-triggered, held-key semantics)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Rate-limited by the ship's cooldown
    pub fire: bool,
    /// Slow, precise movement
    pub focus: bool,
    /// Pause toggle (edge: set for one tick per key press)
    pub pause: bool,
}

/// Advance the game state by one frame and return what to draw
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    // Terminal sessions stay frozen until `initialize`
    if state.status.is_terminal() {
        return state.take_snapshot();
    }

    if input.pause && state.mode.has_pause {
        toggle_pause(state);
    }
    if state.is_paused() {
        return state.take_snapshot();
    }

    state.frame_count += 1;
    let score_before = state.score;
    let graze_before = state.graze;

    player::run(state, input);
    if state.mode.has_spawner {
        spawner::run(state);
    }
    if state.mode.has_boss {
        boss::run(state);
    }

    advance_all(&mut state.player_bullets);
    advance_all(&mut state.enemy_bullets);
    advance_all(&mut state.mobs);
    advance_all(&mut state.particles);

    let resolution = collision::run(state);

    if state.graze != graze_before {
        state.push_event(GameEvent::GrazeChanged { graze: state.graze });
    }
    if state.score != score_before {
        state.push_event(GameEvent::ScoreChanged { score: state.score });
    }
    resolve_outcome(state, resolution);

    state.take_snapshot()
}

fn toggle_pause(state: &mut GameState) {
    match state.status {
        SessionStatus::Playing => {
            state.status = SessionStatus::Paused;
            state.push_event(GameEvent::Paused);
            log::info!("Paused at frame {}", state.frame_count);
        }
        SessionStatus::Paused => {
            state.status = SessionStatus::Playing;
            state.push_event(GameEvent::Resumed);
            log::info!("Resumed at frame {}", state.frame_count);
        }
        SessionStatus::Defeat | SessionStatus::Victory => {}
    }
}

/// Defeat wins over a same-tick victory
fn resolve_outcome(state: &mut GameState, resolution: Resolution) {
    if resolution.player_hit {
        state.status = SessionStatus::Defeat;
        state.push_event(GameEvent::Defeat { score: state.score });
        log::info!(
            "Defeat at frame {} with score {}",
            state.frame_count,
            state.score
        );
    } else if resolution.boss_destroyed {
        state.status = SessionStatus::Victory;
        state.push_event(GameEvent::Victory { score: state.score });
        log::info!(
            "Victory at frame {} with score {}",
            state.frame_count,
            state.score
        );
    }
}
