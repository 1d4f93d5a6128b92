//! Per-tick output handed to the presentation layer
//!
//! A [`Snapshot`] holds enough to redraw a frame without any other state,
//! plus the [`GameEvent`]s raised since the previous snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::BossPhase;
use super::state::{GameState, MobKind, SessionStatus};

/// Notifications for the UI (score text, hp bar, overlays)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    GrazeChanged { graze: u64 },
    BossHpChanged { hp: u32, max_hp: u32 },
    /// Damage pushed the boss across a phase threshold
    PhaseChanged { phase: BossPhase },
    MobDestroyed { id: u32, kind: MobKind },
    Paused,
    Resumed,
    Defeat { score: u64 },
    Victory { score: u64 },
}

/// Terminal signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum Outcome {
    None,
    Defeat { final_score: u64 },
    Victory { final_score: u64 },
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub hit_radius: f32,
    pub graze_radius: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// Remaining hp in 0..=1 for the hp bar
    pub hp_fraction: f32,
    pub phase: BossPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: MobKind,
    pub rotation: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Option<u32>,
    pub grazed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: u32,
    /// Doubles as alpha
    pub life: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub outcome: Outcome,
    pub paused: bool,
    pub score: u64,
    /// `None` in modes without grazing
    pub graze: Option<u64>,
    pub player: PlayerView,
    pub boss: Option<BossView>,
    pub mobs: Vec<MobView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState, events: Vec<GameEvent>) -> Self {
        let outcome = match state.status {
            SessionStatus::Defeat => Outcome::Defeat {
                final_score: state.score,
            },
            SessionStatus::Victory => Outcome::Victory {
                final_score: state.score,
            },
            SessionStatus::Playing | SessionStatus::Paused => Outcome::None,
        };

        let boss = state.boss.as_ref().map(|b| BossView {
            pos: b.pos,
            hp: b.hp,
            max_hp: b.max_hp,
            hp_fraction: b.hp_fraction(),
            phase: BossPhase::from_hp(b.hp, &state.mode.boss),
        });

        Self {
            frame: state.frame_count,
            outcome,
            paused: state.is_paused(),
            score: state.score,
            graze: state.mode.has_graze().then_some(state.graze),
            player: PlayerView {
                pos: state.player.pos,
                hit_radius: state.player.hit_radius,
                graze_radius: state.player.graze_radius,
            },
            boss,
            mobs: state
                .mobs
                .iter()
                .map(|m| MobView {
                    id: m.id,
                    pos: m.pos,
                    kind: m.kind,
                    rotation: m.rotation,
                    color: m.color,
                })
                .collect(),
            player_bullets: state
                .player_bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius,
                    color: None,
                    grazed: false,
                })
                .collect(),
            enemy_bullets: state
                .enemy_bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius,
                    color: Some(b.color),
                    grazed: b.grazed,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    life: p.life,
                })
                .collect(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{GameMode, ModePreset};

    #[test]
    fn test_capture_boss_session() {
        let mut state = GameState::new(GameMode::from_preset(ModePreset::Boss), 1);
        if let Some(boss) = state.boss.as_mut() {
            boss.apply_damage(1250);
        }
        let snap = state.snapshot();
        assert_eq!(snap.outcome, Outcome::None);
        assert_eq!(snap.graze, Some(0));
        let boss = snap.boss.unwrap();
        assert!((boss.hp_fraction - 0.5).abs() < 0.0001);
        assert_eq!(boss.phase, BossPhase::Aimed);
    }

    #[test]
    fn test_capture_classic_session() {
        let mut state = GameState::new(GameMode::from_preset(ModePreset::Classic), 1);
        state.status = SessionStatus::Defeat;
        state.score = 120;
        let snap = state.snapshot();
        assert!(snap.boss.is_none());
        assert_eq!(snap.graze, None);
        assert_eq!(snap.outcome, Outcome::Defeat { final_score: 120 });
        assert!(snap.outcome.is_terminal());
    }

    #[test]
    fn test_take_snapshot_drains_events() {
        let mut state = GameState::new(GameMode::from_preset(ModePreset::Classic), 1);
        state.push_event(GameEvent::ScoreChanged { score: 10 });
        let snap = state.take_snapshot();
        assert_eq!(snap.events, vec![GameEvent::ScoreChanged { score: 10 }]);
        assert!(state.events.is_empty());
        assert!(state.take_snapshot().events.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(GameMode::from_preset(ModePreset::Boss), 1);
        state.push_event(GameEvent::PhaseChanged {
            phase: BossPhase::Finale,
        });
        let json = serde_json::to_string(&state.take_snapshot()).unwrap();
        assert!(json.contains("\"type\":\"PhaseChanged\""));
        assert!(json.contains("\"phase\":\"Finale\""));
        assert!(json.contains("\"result\":\"None\""));
    }
}
