//! Enemy death reaction.
//!
//! `DamageResolver` performs the death transition and writes `EntityDied` once. Here the
//! enemy stops for good, stops blocking the player, starts toppling and is handed to
//! the teardown queue. It stays visible for the grace delay.

use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::layers::Layer;
use crate::common::tunables::Tunables;
use crate::plugins::combat::components::Faction;
use crate::plugins::combat::lifecycle::TeardownQueue;
use crate::plugins::combat::messages::EntityDied;

use super::components::{AiState, DeathTopple, Enemy, Heading, WalkCycle};

/// Seconds for the body to fall flat.
pub const TOPPLE_SECS: f32 = 0.6;

/// Keep membership, clear filters: the corpse collides with nothing.
#[inline]
pub fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn on_enemy_died(
    mut commands: Commands,
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut died: MessageReader<EntityDied>,
    mut queue: ResMut<TeardownQueue>,
    mut enemies: Query<(&mut AiState, &mut WalkCycle, Option<&mut CollisionLayers>), With<Enemy>>,
) {
    let now = clock.now();
    for ev in died.read() {
        if ev.faction != Faction::Enemy {
            continue;
        }
        let Ok((mut state, mut walk, layers)) = enemies.get_mut(ev.entity) else {
            debug!("death reaction skipped: {} is gone", ev.entity);
            continue;
        };
        if *state == AiState::Dead {
            continue;
        }

        *state = AiState::Dead;
        walk.swing = 0.0;
        if let Some(mut layers) = layers {
            *layers = non_interacting_enemy_layers();
        }
        commands
            .entity(ev.entity)
            .try_insert(DeathTopple { started_at: now });
        queue.schedule(ev.entity, now, tunables.death_grace_secs);
    }
}

/// Quintic ease, 0..1 -> 0..1.
#[inline]
pub fn smootherstep(x: f32) -> f32 {
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// Fraction of the fall completed at `now`.
pub fn topple_progress(started_at: f64, now: f64) -> f32 {
    let t = ((now - started_at) as f32 / TOPPLE_SECS).clamp(0.0, 1.0);
    smootherstep(t)
}

pub fn animate_topple(clock: Res<SimClock>, mut q: Query<(&DeathTopple, &Heading, &mut Transform)>) {
    let now = clock.now();
    for (topple, heading, mut tf) in &mut q {
        let fall = topple_progress(topple.started_at, now);
        tf.rotation = Quat::from_rotation_y(heading.0) * Quat::from_rotation_x(-FRAC_PI_2 * fall);
    }
}
