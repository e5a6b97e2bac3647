//! Entity lifecycle: the single choke point for death and deferred teardown.
//!
//! ```text
//!   Alive ──mark_dead──▶ Dead { at } ──(grace delay)──▶ unregistered + PendingDespawn ──▶ despawned
//! ```
//!
//! - `mark_dead` is one-way and idempotent. Callers never re-check "am I already dead?"
//!   themselves; they call `mark_dead` and act only if it returns `true`.
//! - Teardown is a deterministic, tick-driven queue ordered by (due time, schedule order).
//!   It does not use wall-clock timers.
//! - Teardown tolerates the entity having vanished in the meantime: if it is no longer
//!   registered in the [`CombatDirectory`] the action silently aborts.
//! - Between death and teardown a dead entity may still be rendered (death animation),
//!   but gameplay systems skip it because `Life::is_alive` is false.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::clock::SimClock;

use super::directory::CombatDirectory;

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum Life {
    #[default]
    Alive,
    /// Terminal. `at` is the simulation time of death.
    Dead { at: f64 },
}

impl Life {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, Life::Alive)
    }

    /// Flip to `Dead`. Returns `true` only for the call that performed the transition.
    #[inline]
    pub fn mark_dead(&mut self, now: f64) -> bool {
        match self {
            Life::Alive => {
                *self = Life::Dead { at: now };
                true
            }
            Life::Dead { .. } => false,
        }
    }
}

/// Marker: entity should be removed from the world.
///
/// Teardown never despawns inline; it marks and a `PostUpdate` system despawns, so
/// no other system in the same tick observes a half-removed entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// `markDead` with logging for absorbed duplicates.
pub fn mark_dead(entity: Entity, life: &mut Life, now: f64) -> bool {
    if life.mark_dead(now) {
        true
    } else {
        debug!("mark_dead ignored: {entity} is already dead");
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledTeardown {
    due: f64,
    seq: u64,
    entity: Entity,
}

/// Deferred teardown actions, processed once per tick in a reproducible order.
#[derive(Resource, Debug, Default)]
pub struct TeardownQueue {
    pending: Vec<ScheduledTeardown>,
    scheduled: HashSet<Entity>,
    next_seq: u64,
}

impl TeardownQueue {
    /// Schedule teardown `delay` seconds after `now`.
    ///
    /// Scheduling an entity that is already queued is a no-op; returns `false`.
    pub fn schedule(&mut self, entity: Entity, now: f64, delay: f32) -> bool {
        if !self.scheduled.insert(entity) {
            debug!("teardown for {entity} already scheduled");
            return false;
        }
        let due = now + f64::from(delay.max(0.0));
        self.pending.push(ScheduledTeardown {
            due,
            seq: self.next_seq,
            entity,
        });
        self.next_seq += 1;
        true
    }

    pub fn is_scheduled(&self, entity: Entity) -> bool {
        self.scheduled.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every entity due at `now`, in (due, schedule order).
    pub fn take_due(&mut self, now: f64) -> Vec<Entity> {
        let mut due: Vec<ScheduledTeardown> = Vec::new();
        self.pending.retain(|t| {
            if t.due <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));

        due.into_iter()
            .map(|t| {
                self.scheduled.remove(&t.entity);
                t.entity
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.scheduled.clear();
    }
}

/// Release an entity: unregister it and mark it for despawn.
///
/// Safe to call any number of times. Returns `true` only if this call did the work.
pub fn teardown(commands: &mut Commands, directory: &mut CombatDirectory, entity: Entity) -> bool {
    if !directory.unregister(entity) {
        debug!("teardown aborted: {entity} is not registered");
        return false;
    }
    match commands.get_entity(entity) {
        Ok(mut ec) => {
            ec.try_insert(PendingDespawn);
        }
        Err(_) => debug!("teardown: {entity} already despawned"),
    }
    true
}

/// Run every teardown whose grace delay has elapsed.
pub fn run_due_teardowns(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut queue: ResMut<TeardownQueue>,
    mut directory: ResMut<CombatDirectory>,
) {
    for entity in queue.take_due(clock.now()) {
        teardown(&mut commands, &mut directory, entity);
    }
}

/// Despawn entities marked for removal.
///
/// Centralizing despawn in one system keeps structural changes predictable.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).try_despawn();
    }
}

/// Session boundary: drop every pending action.
pub fn clear_teardown_queue(mut queue: ResMut<TeardownQueue>) {
    queue.clear();
}
