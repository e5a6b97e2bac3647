//! Combat core: spatial queries, lifecycle, the combat directory and damage resolution.
//!
//! # Tick order
//! One tick per rendered frame, everything in `Update`, strictly ordered:
//! ```text
//!   Clock ─▶ Input ─▶ Sync ─▶ Enemies ─▶ Projectiles ─▶ Damage ─▶ Effects ─▶ Lifecycle
//!                                                                     PostUpdate: despawn
//! ```
//! - `Clock`: advance `SimClock` by the clamped frame delta.
//! - `Sync`: refresh the `CombatDirectory` snapshot from components.
//! - `Enemies` may request bullets; `Projectiles` spawns, advances and resolves them.
//! - `Damage`: explicit kill requests.
//! - `Effects`: cosmetic consumers only.
//! - `Lifecycle`: death reactions, then due teardowns.
//!
//! There is one logical thread of control; the discipline that keeps this correct is
//! idempotent death/registry/teardown operations, not locking.

pub mod components;
pub mod damage;
pub mod directory;
pub mod lifecycle;
pub mod messages;
pub mod spatial;

use bevy::prelude::*;

use crate::common::clock::{advance_sim_clock, SimClock};
use crate::common::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSystems {
    Clock,
    Input,
    Sync,
    Enemies,
    Projectiles,
    Damage,
    Effects,
    Lifecycle,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SimClock>()
        .init_resource::<directory::CombatDirectory>()
        .init_resource::<lifecycle::TeardownQueue>();

    app.add_message::<messages::EntityDied>()
        .add_message::<messages::KillRequest>()
        .add_message::<messages::CombatFeedback>();

    app.configure_sets(
        Update,
        (
            CombatSystems::Clock,
            CombatSystems::Input,
            CombatSystems::Sync,
            CombatSystems::Enemies,
            CombatSystems::Projectiles,
            CombatSystems::Damage,
            CombatSystems::Effects,
            CombatSystems::Lifecycle,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(Update, advance_sim_clock.in_set(CombatSystems::Clock))
        .add_systems(Update, directory::sync_directory.in_set(CombatSystems::Sync))
        .add_systems(Update, damage::process_kill_requests.in_set(CombatSystems::Damage))
        .add_systems(Update, lifecycle::run_due_teardowns.in_set(CombatSystems::Lifecycle));

    app.add_systems(PostUpdate, lifecycle::despawn_marked);

    // A level session owns the directory, the clock and any pending teardown.
    app.add_systems(
        OnExit(GameState::InGame),
        (
            directory::clear_directory,
            lifecycle::clear_teardown_queue,
            reset_clock,
        ),
    );
}

fn reset_clock(mut clock: ResMut<SimClock>) {
    clock.reset();
}

#[cfg(test)]
mod tests;
