//! Mob spawner (classic mode)
//!
//! Spawn cadence and mob speed both scale with score, giving a monotonic
//! difficulty ramp that bottoms out at `min_interval`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, GameState, MOUSE_COLOR, Mob, MobKind};
use crate::consts::OFFSCREEN_MARGIN;
use crate::hsl_to_rgb;
use crate::mode::SpawnerTuning;

/// Ticks between spawns at the given score
pub fn spawn_interval(score: u64, tuning: &SpawnerTuning) -> u64 {
    let scale = tuning.interval_score_scale.max(1);
    tuning
        .base_interval
        .saturating_sub(score / scale)
        .max(tuning.min_interval)
        .max(1)
}

/// Whether a mob spawns on `frame`
pub fn is_spawn_frame(frame: u64, score: u64, tuning: &SpawnerTuning) -> bool {
    frame % spawn_interval(score, tuning) == 0
}

/// Roll a new mob just above the top edge
pub fn roll_mob(id: u32, score: u64, tuning: &SpawnerTuning, arena: &Arena, rng: &mut Pcg32) -> Mob {
    let span = (arena.width - 2.0 * tuning.edge_margin).max(0.0);
    let x = rng.random::<f32>() * span + tuning.edge_margin.min(arena.width / 2.0);

    let kind = if rng.random::<f32>() > 0.5 {
        MobKind::Mouse
    } else {
        MobKind::Yarn
    };
    let hue = rng.random::<f32>() * 360.0;
    let color = match kind {
        MobKind::Mouse => MOUSE_COLOR,
        MobKind::Yarn => hsl_to_rgb(hue, 0.7, 0.6),
    };

    let speed = tuning.base_speed
        + score as f32 / tuning.speed_score_divisor
        + rng.random::<f32>() * tuning.speed_spread;
    let rotation_speed = (rng.random::<f32>() - 0.5) * 2.0 * tuning.max_rotation_speed;

    Mob {
        id,
        pos: Vec2::new(x, -OFFSCREEN_MARGIN),
        kind,
        color,
        speed,
        rotation: 0.0,
        rotation_speed,
        radius: tuning.mob_radius,
    }
}

/// Spawn a mob if this frame is due
pub fn run(state: &mut GameState) {
    if !is_spawn_frame(state.frame_count, state.score, &state.mode.spawner) {
        return;
    }
    let id = state.next_entity_id();
    let mob = roll_mob(
        id,
        state.score,
        &state.mode.spawner,
        &state.arena,
        &mut state.rng,
    );
    log::debug!(
        "frame {}: spawned {:?} #{} at x={:.1} speed={:.2}",
        state.frame_count,
        mob.kind,
        mob.id,
        mob.pos.x,
        mob.speed
    );
    state.mobs.push(mob);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{GameMode, ModePreset};
    use rand::SeedableRng;

    fn tuning() -> SpawnerTuning {
        GameMode::from_preset(ModePreset::Classic).spawner
    }

    #[test]
    fn test_interval_ramp() {
        let t = tuning();
        assert_eq!(spawn_interval(0, &t), 50);
        assert_eq!(spawn_interval(199, &t), 50);
        assert_eq!(spawn_interval(200, &t), 49);
        assert_eq!(spawn_interval(6000, &t), 20);
        assert_eq!(spawn_interval(7000, &t), 15);
        assert_eq!(spawn_interval(1_000_000, &t), 15);
    }

    #[test]
    fn test_interval_never_increases_with_score() {
        let t = tuning();
        let mut last = spawn_interval(0, &t);
        for score in (0..20_000).step_by(10) {
            let interval = spawn_interval(score, &t);
            assert!(interval <= last);
            last = interval;
        }
    }

    #[test]
    fn test_spawn_frames() {
        let t = tuning();
        assert!(is_spawn_frame(50, 0, &t));
        assert!(!is_spawn_frame(49, 0, &t));
        assert!(is_spawn_frame(45, 1000, &t));
    }

    #[test]
    fn test_rolled_mob_within_margins() {
        let t = tuning();
        let arena = Arena::new(600.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let mob = roll_mob(id, 3000, &t, &arena, &mut rng);
            assert!(mob.pos.x >= 30.0 && mob.pos.x <= 570.0);
            assert_eq!(mob.pos.y, -OFFSCREEN_MARGIN);
            // 2 + 3000 / 1000 + U(0, 2)
            assert!(mob.speed >= 5.0 && mob.speed <= 7.0);
            assert!(mob.rotation_speed.abs() <= 0.05);
            if mob.kind == MobKind::Mouse {
                assert_eq!(mob.color, MOUSE_COLOR);
            }
        }
    }
}
