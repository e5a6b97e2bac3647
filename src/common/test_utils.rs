//! Test helpers.
//!
//! Systems are driven on a bare `World` with `World::run_system_once`. Systems that use
//! `Commands` only enqueue structural changes, so we `flush()` before assertions.

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::rng::CombatRng;
use crate::common::tunables::Tunables;
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::lifecycle::TeardownQueue;
use crate::plugins::combat::messages::{CombatFeedback, EntityDied, KillRequest};
use crate::plugins::projectiles::messages::SpawnBulletRequest;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A world with every resource the combat systems read or write.
pub fn combat_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(SimClock::default());
    world.insert_resource(CombatRng::new(7));
    world.insert_resource(CombatDirectory::default());
    world.insert_resource(TeardownQueue::default());
    world.init_resource::<Messages<CombatFeedback>>();
    world.init_resource::<Messages<EntityDied>>();
    world.init_resource::<Messages<KillRequest>>();
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world
}

/// Advance the simulation clock by `dt` seconds (unclamped up to 1s).
pub fn tick_clock(world: &mut World, dt: f32) {
    world.resource_mut::<SimClock>().advance(dt, 1.0);
}

/// Drain every message of type `M` written so far.
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    world.resource_mut::<Messages<M>>().drain().collect()
}
