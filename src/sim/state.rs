//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; subsystems receive it by
//! `&mut` from the frame driver instead of reaching for globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Kinematic;
use super::snapshot::{GameEvent, Snapshot};
use crate::consts::*;
use crate::mode::{GameMode, ParticleTuning};

/// Fixed arena bounds for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True once `pos` has cleared the bounds by more than `margin`
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Simulation advances every tick
    Playing,
    /// Gate closed; ticks are no-ops until resumed
    Paused,
    /// Player was hit
    Defeat,
    /// Boss hp reached zero
    Victory,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Defeat | SessionStatus::Victory)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub focus_speed: f32,
    /// Lethal radius (intentionally tiny in boss modes)
    pub hit_radius: f32,
    pub graze_radius: Option<f32>,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
}

impl Player {
    pub fn spawn(mode: &GameMode, arena: &Arena) -> Self {
        Self {
            pos: Vec2::new(arena.width / 2.0, arena.height - PLAYER_SPAWN_INSET),
            speed: mode.player.speed,
            focus_speed: mode.player.focus_speed,
            hit_radius: mode.player.hit_radius,
            graze_radius: mode.player.graze_radius,
            cooldown: 0,
        }
    }
}

/// The boss (boss modes only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub max_hp: u32,
    /// Never increases; floors at zero
    pub hp: u32,
    /// Current hover destination
    pub target_x: f32,
    /// Ticks until a new hover target is picked
    pub move_timer: u32,
}

impl Boss {
    pub fn spawn(mode: &GameMode, arena: &Arena) -> Self {
        let x = arena.width / 2.0;
        Self {
            pos: Vec2::new(x, mode.boss.hover_y),
            max_hp: mode.boss.max_hp,
            hp: mode.boss.max_hp,
            target_x: x,
            move_timer: mode.boss.hover_interval,
        }
    }

    /// Remaining hp in 0..=1
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }

    pub fn apply_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

/// Mob variants (identity and look only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobKind {
    Mouse,
    Yarn,
}

/// Grey used for mice and their debris
pub const MOUSE_COLOR: u32 = 0x888888;

/// A falling mob (classic mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: u32,
    pub pos: Vec2,
    pub kind: MobKind,
    pub color: u32,
    /// Downward speed, fixed at spawn
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub radius: f32,
}

impl Kinematic for Mob {
    const MARGIN: f32 = OFFSCREEN_MARGIN;

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation += self.rotation_speed;
    }
}

/// A bullet fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub id: u32,
    pub pos: Vec2,
    /// Upward speed
    pub speed: f32,
    pub radius: f32,
}

impl Kinematic for PlayerBullet {
    const MARGIN: f32 = PLAYER_BULLET_MARGIN;

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn advance(&mut self) {
        self.pos.y -= self.speed;
    }
}

/// A bullet fired by the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Set the first time the bullet enters the graze radius; never cleared
    pub grazed: bool,
}

impl EnemyBullet {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: u32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            grazed: false,
        }
    }
}

impl Kinematic for EnemyBullet {
    const MARGIN: f32 = OFFSCREEN_MARGIN;

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: f32, // 0-1, decreases every tick
    pub decay: f32,
}

impl Particle {
    /// Emit a burst of debris at `pos`
    pub fn burst(pos: Vec2, color: u32, tuning: &ParticleTuning, rng: &mut Pcg32) -> Vec<Particle> {
        (0..tuning.burst_count)
            .map(|_| {
                let vx = (rng.random::<f32>() - 0.5) * 2.0 * tuning.max_speed;
                let vy = (rng.random::<f32>() - 0.5) * 2.0 * tuning.max_speed;
                Particle {
                    pos,
                    vel: Vec2::new(vx, vy),
                    color,
                    life: 1.0,
                    decay: tuning.decay,
                }
            })
            .collect()
    }
}

impl Kinematic for Particle {
    const MARGIN: f32 = OFFSCREEN_MARGIN;

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    fn expired(&self, arena: &Arena) -> bool {
        self.life <= 0.0 || arena.is_outside(self.pos, Self::MARGIN)
    }
}

/// Complete session state (deterministic for a given mode, seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub arena: Arena,
    /// Session seed; `initialize` re-seeds the RNG from it
    pub seed: u64,
    pub rng: Pcg32,
    pub status: SessionStatus,
    /// Never decreases within a session
    pub score: u64,
    /// Bullets grazed (boss modes)
    pub graze: u64,
    /// Simulated ticks since `initialize`
    pub frame_count: u64,
    pub player: Player,
    pub boss: Option<Boss>,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub mobs: Vec<Mob>,
    pub particles: Vec<Particle>,
    /// Notifications raised since the last snapshot
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session
    pub fn new(mode: GameMode, seed: u64) -> Self {
        let arena = Arena::new(mode.arena_width, mode.arena_height);
        let player = Player::spawn(&mode, &arena);
        let mut state = Self {
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: SessionStatus::Playing,
            score: 0,
            graze: 0,
            frame_count: 0,
            player,
            boss: None,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            mobs: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            mode,
        };
        state.initialize();
        state
    }

    /// Reset everything to a fresh session; nothing survives a restart
    pub fn initialize(&mut self) {
        self.arena = Arena::new(self.mode.arena_width, self.mode.arena_height);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.status = SessionStatus::Playing;
        self.score = 0;
        self.graze = 0;
        self.frame_count = 0;
        self.player = Player::spawn(&self.mode, &self.arena);
        self.boss = self
            .mode
            .has_boss
            .then(|| Boss::spawn(&self.mode, &self.arena));
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.mobs.clear();
        self.particles.clear();
        self.events.clear();
        self.next_id = 1;

        log::info!(
            "{} session initialized with seed {} ({}x{})",
            self.mode.preset.as_str(),
            self.seed,
            self.arena.width,
            self.arena.height
        );
    }

    /// Change the seed and restart
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.initialize();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulation still running (playing or paused)
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Spawn a player bullet at `pos`
    pub fn spawn_player_bullet(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.player_bullets.push(PlayerBullet {
            id,
            pos,
            speed: self.mode.player.bullet_speed,
            radius: self.mode.player.bullet_radius,
        });
    }

    /// Spawn an enemy bullet at `pos` moving with `vel`
    pub fn spawn_enemy_bullet(&mut self, pos: Vec2, vel: Vec2, color: u32) {
        let id = self.next_entity_id();
        let radius = self.mode.boss.bullet_radius;
        self.enemy_bullets
            .push(EnemyBullet::new(id, pos, vel, radius, color));
    }

    /// Current view without draining pending events
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self, Vec::new())
    }

    /// Current view, handing pending events to the caller
    pub fn take_snapshot(&mut self) -> Snapshot {
        let events = std::mem::take(&mut self.events);
        Snapshot::capture(self, events)
    }
}
