//! Buffered spawn requests.
//!
//! Producers (enemy AI, player weapon) only write intent. The allocator is the single
//! consumer and the only code that touches the bullet pool.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletKind {
    Player,
    Enemy,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    pub kind: BulletKind,
    pub origin: Vec3,
    /// Unit vector.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub owner: Option<Entity>,
}

/// Trigger pulled, already translated from input into a world-space ray.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FireIntent {
    pub origin: Vec3,
    pub direction: Vec3,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ReloadIntent;
