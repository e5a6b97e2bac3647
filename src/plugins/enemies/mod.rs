//! Enemies plugin: spawning, behaviour, and death reactions.
//!
//! ```text
//!   OnEnter(InGame)            spawn_enemies (level spawn list -> entities + directory)
//!   CombatSystems::Enemies     enemy_think   (state machine, movement, fire requests)
//!   CombatSystems::Effects     animate_limbs, animate_topple
//!   CombatSystems::Lifecycle   on_enemy_died (Dead + topple + schedule teardown)
//! ```
//! Enemies never apply damage themselves. They write `SpawnBulletRequest`s; the
//! projectile system resolves hits through `DamageResolver`.

pub mod ai;
pub mod components;
pub mod config;
pub mod death;
pub mod spawn;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::combat::lifecycle::run_due_teardowns;
use crate::plugins::combat::CombatSystems;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn::spawn_enemies);

    app.add_systems(Update, ai::enemy_think.in_set(CombatSystems::Enemies))
        .add_systems(
            Update,
            (ai::animate_limbs, death::animate_topple).in_set(CombatSystems::Effects),
        )
        .add_systems(
            Update,
            death::on_enemy_died
                .before(run_due_teardowns)
                .in_set(CombatSystems::Lifecycle),
        );
}
