//! Projectiles: message-based spawning, pooled bullets, swept collision.
//!
//! # Data flow
//! ```text
//!   CombatSystems::Enemies           CombatSystems::Projectiles
//! ┌──────────────────────┐   ┌────────────────────────────────────────────────────────┐
//! │ enemy AI             │   │ (A) handle_player_weapon                               │
//! │  writes SpawnBullet- │   │     FireIntent/ReloadIntent -> SpawnBulletRequest      │
//! │  Request             │──▶│ (B) allocate_bullets_from_pool                         │
//! └──────────────────────┘   │     single writer of BulletPool; Inactive -> Active    │
//!                            │ (C) advance_bullets                                    │
//!                            │     integrate, expire, enemy/wall/floor/player checks  │
//!                            │     Active -> PendingReturn, damage via DamageResolver │
//!                            │ (D) return_to_pool_commit                              │
//!                            │     PendingReturn -> Inactive, back into the free list │
//!                            └────────────────────────────────────────────────────────┘
//! ```
//! Producers never touch the pool; they only write intent. Pool exhaustion drops the
//! request. Bullets released in (C) are back in the pool after (D), in the same tick.

pub mod advance;
pub mod allocator;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;
pub mod weapon;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::visuals::init_visuals;
use crate::plugins::combat::CombatSystems;

pub fn plugin(app: &mut App) {
    app.add_message::<messages::SpawnBulletRequest>()
        .add_message::<messages::FireIntent>()
        .add_message::<messages::ReloadIntent>();

    app.add_systems(Startup, pool::init_bullet_pool.after(init_visuals));

    app.add_systems(
        Update,
        (
            weapon::handle_player_weapon,
            allocator::allocate_bullets_from_pool,
            advance::advance_bullets,
            commit::return_to_pool_commit,
        )
            .chain()
            .in_set(CombatSystems::Projectiles),
    );

    app.add_systems(OnExit(GameState::InGame), commit::release_all_bullets);
}
