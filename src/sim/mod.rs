//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (pools keep insertion order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod player;
pub mod pool;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use boss::{BossPhase, volley, volley_angles};
pub use collision::{Resolution, circles_overlap};
pub use pool::{Kinematic, RemovalMask};
pub use snapshot::{
    BossView, BulletView, GameEvent, MobView, Outcome, ParticleView, PlayerView, Snapshot,
};
pub use state::{
    Arena, Boss, EnemyBullet, GameState, MOUSE_COLOR, Mob, MobKind, Particle, Player,
    PlayerBullet, SessionStatus,
};
pub use tick::{TickInput, tick};
