//! Boss controller: hover motion and phase-driven fire patterns
//!
//! The phase is never stored. [`BossPhase::from_hp`] recomputes it every tick
//! from the current hp, so the phase cannot drift out of sync with damage.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Boss, GameState};
use crate::mode::{BossTuning, PatternTuning};
use crate::{angle_to, unit_from_angle};

/// Attack phase, ordered from full health to near death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Two-armed rotating spiral
    Spiral,
    /// Fans re-aimed at the player on every burst
    Aimed,
    /// Rotating radial rings
    Finale,
}

impl BossPhase {
    /// Phase for `hp`; thresholds are evaluated in strict order
    pub fn from_hp(hp: u32, tuning: &BossTuning) -> Self {
        if hp > tuning.upper_threshold {
            BossPhase::Spiral
        } else if hp > tuning.lower_threshold {
            BossPhase::Aimed
        } else {
            BossPhase::Finale
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BossPhase::Spiral => "Spiral",
            BossPhase::Aimed => "Aimed",
            BossPhase::Finale => "Finale",
        }
    }

    /// Pattern constants for this phase
    pub fn pattern<'a>(&self, tuning: &'a BossTuning) -> &'a PatternTuning {
        match self {
            BossPhase::Spiral => &tuning.spiral,
            BossPhase::Aimed => &tuning.aimed,
            BossPhase::Finale => &tuning.finale,
        }
    }
}

/// Fire angles (radians) for `frame`; empty when the phase is not due to fire
pub fn volley_angles(phase: BossPhase, frame: u64, origin: Vec2, target: Vec2, tuning: &BossTuning) -> Vec<f32> {
    let pattern = phase.pattern(tuning);
    if pattern.period == 0 || frame % pattern.period != 0 || pattern.count == 0 {
        return Vec::new();
    }
    let count = pattern.count;

    match phase {
        BossPhase::Spiral => {
            let base = frame as f32 * pattern.angle_step;
            // With two arms they point in exactly opposite directions
            (0..count)
                .map(|i| base + i as f32 * ring_spacing(count))
                .collect()
        }
        BossPhase::Aimed => {
            let aim = angle_to(origin, target);
            let half = (count - 1) as f32 / 2.0;
            (0..count)
                .map(|i| aim + (i as f32 - half) * pattern.angle_step)
                .collect()
        }
        BossPhase::Finale => {
            let offset = frame as f32 * pattern.angle_step;
            (0..count)
                .map(|i| i as f32 * ring_spacing(count) + offset)
                .collect()
        }
    }
}

/// Velocities for the volley fired on `frame`
pub fn volley(phase: BossPhase, frame: u64, origin: Vec2, target: Vec2, tuning: &BossTuning) -> Vec<Vec2> {
    let speed = phase.pattern(tuning).bullet_speed;
    volley_angles(phase, frame, origin, target, tuning)
        .into_iter()
        .map(|theta| unit_from_angle(theta) * speed)
        .collect()
}

/// Advance hover motion by one tick.
///
/// Every `hover_interval` ticks a new target x is drawn within the side
/// margins; x then closes a fixed fraction of the gap each tick.
pub fn hover(boss: &mut Boss, tuning: &BossTuning, arena: &Arena, rng: &mut Pcg32) {
    if boss.move_timer == 0 {
        let lo = tuning.hover_margin.min(arena.width / 2.0);
        let hi = (arena.width - tuning.hover_margin).max(arena.width / 2.0);
        boss.target_x = if lo < hi {
            rng.random_range(lo..hi)
        } else {
            arena.width / 2.0
        };
        boss.move_timer = tuning.hover_interval;
        log::trace!("boss hover target x={:.1}", boss.target_x);
    }
    boss.move_timer = boss.move_timer.saturating_sub(1);
    boss.pos.x += (boss.target_x - boss.pos.x) * tuning.hover_ease;
}

/// Run the boss controller: hover, then fire the current phase's pattern
pub fn run(state: &mut GameState) {
    let frame = state.frame_count;
    let target = state.player.pos;
    let tuning = &state.mode.boss;

    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    hover(boss, tuning, &state.arena, &mut state.rng);

    let phase = BossPhase::from_hp(boss.hp, tuning);
    let origin = boss.pos;
    let color = phase.pattern(tuning).color;
    let velocities = volley(phase, frame, origin, target, tuning);

    if !velocities.is_empty() {
        log::debug!(
            "frame {}: {} volley of {} bullets",
            frame,
            phase.as_str(),
            velocities.len()
        );
    }
    for vel in velocities {
        state.spawn_enemy_bullet(origin, vel, color);
    }
}

/// Angle between neighbouring bullets in a ring of `count`
pub fn ring_spacing(count: u32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    TAU / count as f32
}
