//! Game modes and balance constants
//!
//! One configurable core replaces separate game variants: a [`GameMode`]
//! selects which subsystems run (mob spawner, boss, pause) and carries every
//! tunable the simulation reads. All speeds and timers are per tick.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Built-in mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModePreset {
    /// Endless mob shooter with a score-driven difficulty ramp
    #[default]
    Classic,
    /// Bullet-hell boss fight with graze scoring and pause
    Boss,
    /// Tighter boss fight: tiny hitbox, denser patterns, no pause
    BossHard,
}

impl ModePreset {
    pub const ALL: [ModePreset; 3] = [ModePreset::Classic, ModePreset::Boss, ModePreset::BossHard];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModePreset::Classic => "Classic",
            ModePreset::Boss => "Boss",
            ModePreset::BossHard => "BossHard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "mobs" => Some(ModePreset::Classic),
            "boss" => Some(ModePreset::Boss),
            "bosshard" | "boss-hard" | "hard" => Some(ModePreset::BossHard),
            _ => None,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub speed: f32,
    /// Speed while the focus modifier is held
    pub focus_speed: f32,
    /// Lethal collision radius
    pub hit_radius: f32,
    /// Graze bonus radius (`None` disables grazing)
    pub graze_radius: Option<f32>,
    /// Inset from each arena edge the ship may not cross
    pub edge_margin: f32,
    /// Ticks between shots
    pub fire_cooldown: u32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
}

/// Mob spawner tuning: `interval = max(min_interval, base_interval - score / interval_score_scale)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerTuning {
    pub base_interval: u64,
    pub min_interval: u64,
    pub interval_score_scale: u64,
    /// Mob speed = `base_speed + score / speed_score_divisor + U(0, speed_spread)`
    pub base_speed: f32,
    pub speed_score_divisor: f32,
    pub speed_spread: f32,
    pub mob_radius: f32,
    /// Horizontal spawn inset from each edge
    pub edge_margin: f32,
    /// Max absolute spin per tick (radians)
    pub max_rotation_speed: f32,
}

/// Particle burst tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleTuning {
    pub burst_count: usize,
    /// Velocity components drawn from `U(-max_speed, max_speed)`
    pub max_speed: f32,
    /// Life lost per tick
    pub decay: f32,
}

/// One boss fire pattern (speed + color of the bullets it emits)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTuning {
    /// Fire every `period` ticks
    pub period: u64,
    /// Bullets per volley (arms, fan width or ring size)
    pub count: u32,
    /// Angular parameter: spiral advance per tick, fan spacing, ring rotation per tick
    pub angle_step: f32,
    pub bullet_speed: f32,
    pub color: u32,
}

/// Boss tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossTuning {
    pub max_hp: u32,
    /// Above this hp the boss is in its spiral phase
    pub upper_threshold: u32,
    /// At or below this hp the boss is in its finale phase
    pub lower_threshold: u32,
    /// Player bullets within this distance of the boss center hit it
    pub hit_radius: f32,
    pub damage_per_hit: u32,
    /// Resting height of the boss
    pub hover_y: f32,
    /// Ticks between new hover targets
    pub hover_interval: u32,
    /// Fraction of the remaining gap closed per tick
    pub hover_ease: f32,
    /// Hover targets are kept this far from the side edges
    pub hover_margin: f32,
    pub bullet_radius: f32,
    pub spiral: PatternTuning,
    pub aimed: PatternTuning,
    pub finale: PatternTuning,
}

/// Scoring constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTuning {
    /// Awarded per player bullet hit (mob kill or boss damage)
    pub hit_bonus: u64,
    /// Awarded per newly grazed bullet
    pub graze_bonus: u64,
}

/// Complete game mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMode {
    pub preset: ModePreset,
    pub arena_width: f32,
    pub arena_height: f32,

    // === Subsystems ===
    pub has_spawner: bool,
    pub has_boss: bool,
    pub has_pause: bool,
    pub has_particles: bool,

    pub player: PlayerTuning,
    pub spawner: SpawnerTuning,
    pub particles: ParticleTuning,
    pub boss: BossTuning,
    pub scoring: ScoreTuning,
}

impl Default for GameMode {
    fn default() -> Self {
        Self::from_preset(ModePreset::default())
    }
}

impl GameMode {
    /// Build one of the built-in modes
    pub fn from_preset(preset: ModePreset) -> Self {
        match preset {
            ModePreset::Classic => Self::classic(),
            ModePreset::Boss => Self::boss(),
            ModePreset::BossHard => Self::boss_hard(),
        }
    }

    /// Override the arena size
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    /// Whether grazing is scored in this mode
    pub fn has_graze(&self) -> bool {
        self.player.graze_radius.is_some()
    }

    fn classic() -> Self {
        Self {
            preset: ModePreset::Classic,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            has_spawner: true,
            has_boss: false,
            has_pause: false,
            has_particles: true,
            player: PlayerTuning {
                speed: 7.0,
                focus_speed: 7.0,
                hit_radius: 15.0,
                graze_radius: None,
                edge_margin: 30.0,
                fire_cooldown: 10,
                bullet_speed: 10.0,
                bullet_radius: 5.0,
            },
            spawner: SpawnerTuning {
                base_interval: 50,
                min_interval: 15,
                interval_score_scale: 200,
                base_speed: 2.0,
                speed_score_divisor: 1000.0,
                speed_spread: 2.0,
                mob_radius: 18.0,
                edge_margin: 30.0,
                max_rotation_speed: 0.05,
            },
            particles: ParticleTuning {
                burst_count: 10,
                max_speed: 4.0,
                decay: 0.03,
            },
            // Unused while `has_boss` is false
            boss: Self::boss_tuning(),
            scoring: ScoreTuning {
                hit_bonus: 10,
                graze_bonus: 0,
            },
        }
    }

    fn boss() -> Self {
        Self {
            preset: ModePreset::Boss,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            has_spawner: false,
            has_boss: true,
            has_pause: true,
            has_particles: false,
            player: PlayerTuning {
                speed: 5.0,
                focus_speed: 2.0,
                hit_radius: 2.5,
                graze_radius: Some(25.0),
                edge_margin: 20.0,
                fire_cooldown: 5,
                bullet_speed: 12.0,
                bullet_radius: 4.0,
            },
            spawner: Self::classic().spawner,
            particles: ParticleTuning {
                burst_count: 0,
                max_speed: 0.0,
                decay: 1.0,
            },
            boss: Self::boss_tuning(),
            scoring: ScoreTuning {
                hit_bonus: 10,
                graze_bonus: 50,
            },
        }
    }

    fn boss_hard() -> Self {
        let mut mode = Self::boss();
        mode.preset = ModePreset::BossHard;
        mode.has_pause = false;
        mode.player.hit_radius = 2.0;
        mode.player.graze_radius = Some(20.0);

        let boss = &mut mode.boss;
        boss.max_hp = 2000;
        boss.upper_threshold = 1300;
        boss.lower_threshold = 700;
        boss.hover_interval = 100;
        boss.hover_ease = 0.04;
        boss.aimed.period = 45;
        boss.aimed.count = 7;
        boss.aimed.angle_step = 0.15;
        boss.finale.period = 12;
        boss.finale.count = 8;
        mode
    }

    fn boss_tuning() -> BossTuning {
        BossTuning {
            max_hp: 2500,
            upper_threshold: 1700,
            lower_threshold: 800,
            hit_radius: 40.0,
            damage_per_hit: 10,
            hover_y: 150.0,
            hover_interval: 120,
            hover_ease: 0.05,
            hover_margin: 100.0,
            bullet_radius: 4.0,
            spiral: PatternTuning {
                period: 3,
                count: 2,
                angle_step: 0.1,
                bullet_speed: 3.0,
                color: 0xFF66CC,
            },
            aimed: PatternTuning {
                period: 40,
                count: 5,
                angle_step: 0.2,
                bullet_speed: 4.0,
                color: 0x66CCFF,
            },
            finale: PatternTuning {
                period: 10,
                count: 10,
                angle_step: 0.02,
                bullet_speed: 2.5,
                color: 0xFFCC00,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trip_names() {
        for preset in ModePreset::ALL {
            assert_eq!(ModePreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(ModePreset::from_str("HARD"), Some(ModePreset::BossHard));
        assert_eq!(ModePreset::from_str("nope"), None);
    }

    #[test]
    fn test_boss_thresholds_are_ordered() {
        for preset in [ModePreset::Boss, ModePreset::BossHard] {
            let boss = GameMode::from_preset(preset).boss;
            assert!(boss.lower_threshold < boss.upper_threshold);
            assert!(boss.upper_threshold < boss.max_hp);
            assert!(boss.hover_ease > 0.0 && boss.hover_ease < 1.0);
            assert_eq!(boss.aimed.count % 2, 1, "fan must be symmetric");
        }
    }

    #[test]
    fn test_mode_flags() {
        let classic = GameMode::from_preset(ModePreset::Classic);
        assert!(classic.has_spawner && !classic.has_boss && !classic.has_graze());

        let boss = GameMode::from_preset(ModePreset::Boss);
        assert!(boss.has_boss && boss.has_pause && boss.has_graze());

        let hard = GameMode::from_preset(ModePreset::BossHard);
        assert!(hard.has_boss && !hard.has_pause);
        assert!(hard.player.hit_radius < boss.player.hit_radius);
    }

    #[test]
    fn test_with_arena() {
        let mode = GameMode::default().with_arena(320.0, 480.0);
        assert_eq!(mode.preset, ModePreset::Classic);
        assert_eq!(mode.arena_width, 320.0);
        assert_eq!(mode.arena_height, 480.0);
    }
}
