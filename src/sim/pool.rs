//! Entity pools
//!
//! Pools are plain `Vec`s. Removal is always two-pass: collision code marks
//! indices in a [`RemovalMask`] while iterating, then compacts the pool once,
//! so no index shifts while a pool is being walked.

use glam::Vec2;

use super::state::Arena;

/// An entity that moves itself each tick and can expire
pub trait Kinematic {
    /// Distance past the arena edge before the entity is purged
    const MARGIN: f32;

    fn position(&self) -> Vec2;

    /// Advance one tick of motion
    fn advance(&mut self);

    fn expired(&self, arena: &Arena) -> bool {
        arena.is_outside(self.position(), Self::MARGIN)
    }
}

/// Advance every entity in a pool by one tick
pub fn advance_all<T: Kinematic>(pool: &mut [T]) {
    for entity in pool.iter_mut() {
        entity.advance();
    }
}

/// Drop expired entities, returning how many were removed
pub fn prune_expired<T: Kinematic>(pool: &mut Vec<T>, arena: &Arena) -> usize {
    let before = pool.len();
    pool.retain(|e| !e.expired(arena));
    before - pool.len()
}

/// Indices marked for removal from a pool during one pass
#[derive(Debug, Clone, Default)]
pub struct RemovalMask {
    marked: Vec<bool>,
    count: usize,
}

impl RemovalMask {
    pub fn new(len: usize) -> Self {
        Self {
            marked: vec![false; len],
            count: 0,
        }
    }

    /// Mark index `i`; returns false if it was already marked
    pub fn mark(&mut self, i: usize) -> bool {
        match self.marked.get_mut(i) {
            Some(slot) if !*slot => {
                *slot = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, i: usize) -> bool {
        self.marked.get(i).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove every marked entity in one compaction, preserving order
    pub fn apply<T>(&self, pool: &mut Vec<T>) {
        if self.is_empty() {
            return;
        }
        let mut i = 0;
        pool.retain(|_| {
            let keep = !self.contains(i);
            i += 1;
            keep
        });
    }
}
