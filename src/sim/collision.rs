//! Collision detection and scoring
//!
//! Runs once per tick after every pool has advanced. All removals are
//! collected into [`RemovalMask`]s first and applied afterwards, so a target
//! destroyed early in a pass can never be hit again in the same pass.

use glam::Vec2;

use super::boss::BossPhase;
use super::pool::{RemovalMask, prune_expired};
use super::snapshot::GameEvent;
use super::state::{GameState, Particle};

/// What the engine found this tick; the frame driver turns it into an outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// A lethal overlap with the player happened
    pub player_hit: bool,
    /// Boss hp is at zero
    pub boss_destroyed: bool,
}

/// Strict circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Resolve every interaction for this tick
pub fn run(state: &mut GameState) -> Resolution {
    // Bullets past the top margin are gone before they can hit anything
    let arena = state.arena;
    prune_expired(&mut state.player_bullets, &arena);

    player_bullets_vs_mobs(state);
    player_bullets_vs_boss(state);

    let mut resolution = Resolution::default();
    resolution.player_hit |= enemy_bullets_vs_player(state);
    resolution.player_hit |= mobs_vs_player(state);
    resolution.boss_destroyed = state.boss.as_ref().is_some_and(|b| b.hp == 0);

    prune(state);
    resolution
}

/// Every unspent bullet touching a mob is consumed and scores; the mob dies once
fn player_bullets_vs_mobs(state: &mut GameState) {
    if state.mobs.is_empty() || state.player_bullets.is_empty() {
        return;
    }

    let mut spent = RemovalMask::new(state.player_bullets.len());
    let mut destroyed = RemovalMask::new(state.mobs.len());

    for (mi, mob) in state.mobs.iter().enumerate() {
        for (bi, bullet) in state.player_bullets.iter().enumerate() {
            if !spent.contains(bi) && circles_overlap(mob.pos, mob.radius, bullet.pos, bullet.radius) {
                spent.mark(bi);
                destroyed.mark(mi);
            }
        }
    }

    if destroyed.is_empty() {
        return;
    }

    for (mi, mob) in state.mobs.iter().enumerate() {
        if !destroyed.contains(mi) {
            continue;
        }
        state.events.push(GameEvent::MobDestroyed {
            id: mob.id,
            kind: mob.kind,
        });
        if state.mode.has_particles {
            state.particles.extend(Particle::burst(
                mob.pos,
                mob.color,
                &state.mode.particles,
                &mut state.rng,
            ));
        }
    }
    state.score += state.mode.scoring.hit_bonus * spent.count() as u64;
    log::debug!(
        "{} mob(s) destroyed by {} bullet(s), score {}",
        destroyed.count(),
        spent.count(),
        state.score
    );

    spent.apply(&mut state.player_bullets);
    destroyed.apply(&mut state.mobs);
}

/// Every bullet inside the boss hit radius deals damage independently
fn player_bullets_vs_boss(state: &mut GameState) {
    let tuning = &state.mode.boss;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let mut spent = RemovalMask::new(state.player_bullets.len());
    for (bi, bullet) in state.player_bullets.iter().enumerate() {
        if circles_overlap(boss.pos, tuning.hit_radius, bullet.pos, 0.0) {
            spent.mark(bi);
        }
    }
    if spent.is_empty() {
        return;
    }

    let phase_before = BossPhase::from_hp(boss.hp, tuning);
    let hits = spent.count() as u32;
    boss.apply_damage(tuning.damage_per_hit.saturating_mul(hits));
    state.score += state.mode.scoring.hit_bonus * u64::from(hits);

    let (hp, max_hp) = (boss.hp, boss.max_hp);
    let phase_after = BossPhase::from_hp(hp, tuning);

    state.events.push(GameEvent::BossHpChanged { hp, max_hp });
    if phase_after != phase_before {
        log::info!(
            "Boss phase {} -> {} at hp {}",
            phase_before.as_str(),
            phase_after.as_str(),
            hp
        );
        state.events.push(GameEvent::PhaseChanged { phase: phase_after });
    }

    spent.apply(&mut state.player_bullets);
}

/// Graze bookkeeping and lethal test in a single pass.
///
/// A bullet can both graze and kill in the same tick; the graze bonus is
/// still awarded.
fn enemy_bullets_vs_player(state: &mut GameState) -> bool {
    let player_pos = state.player.pos;
    let hit_radius = state.player.hit_radius;
    let graze_radius = state.player.graze_radius;
    let graze_bonus = state.mode.scoring.graze_bonus;
    // Without a boss, a bullet that hits the player is used up
    let consume_on_hit = !state.mode.has_boss;

    let mut player_hit = false;
    let mut absorbed = RemovalMask::new(state.enemy_bullets.len());

    for (i, bullet) in state.enemy_bullets.iter_mut().enumerate() {
        if let Some(graze_radius) = graze_radius {
            if !bullet.grazed && circles_overlap(player_pos, graze_radius, bullet.pos, bullet.radius) {
                bullet.grazed = true;
                state.graze += 1;
                state.score += graze_bonus;
            }
        }
        if circles_overlap(player_pos, hit_radius, bullet.pos, bullet.radius) {
            player_hit = true;
            if consume_on_hit {
                absorbed.mark(i);
            }
        }
    }

    absorbed.apply(&mut state.enemy_bullets);
    player_hit
}

fn mobs_vs_player(state: &GameState) -> bool {
    let player = &state.player;
    state
        .mobs
        .iter()
        .any(|m| circles_overlap(player.pos, player.hit_radius, m.pos, m.radius))
}

/// Drop everything that left the arena or ran out of life
fn prune(state: &mut GameState) {
    let arena = state.arena;
    let removed = prune_expired(&mut state.player_bullets, &arena)
        + prune_expired(&mut state.enemy_bullets, &arena)
        + prune_expired(&mut state.mobs, &arena)
        + prune_expired(&mut state.particles, &arena);
    if removed > 0 {
        log::trace!("pruned {} expired entities", removed);
    }
}
