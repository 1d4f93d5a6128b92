//! Yarn Shooter - simulation core for a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, boss patterns, collisions, tick)
//! - `mode`: Data-driven game modes (classic mob shooter, boss fights)
//!
//! Rendering, input polling and UI live outside this crate. The simulation
//! consumes a per-tick intent and produces a [`sim::Snapshot`].

pub mod mode;
pub mod sim;

pub use mode::{GameMode, ModePreset};

use glam::Vec2;

/// Shared constants
pub mod consts {
    /// Display-synchronised tick rate the per-tick constants are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Distance past the arena edge before mobs and enemy bullets are purged
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    /// Player bullets are purged sooner (they only travel upward)
    pub const PLAYER_BULLET_MARGIN: f32 = 20.0;

    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_INSET: f32 = 100.0;
    /// Player bullets spawn this far above the ship
    pub const MUZZLE_OFFSET: f32 = 20.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `theta`
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to packed 0xRRGGBB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> u32 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}
