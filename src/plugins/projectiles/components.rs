use bevy::prelude::*;

use super::messages::{BulletKind, SpawnBulletRequest};

/// Opaque bullet handle returned by the spawn path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BulletId(pub Entity);

#[derive(Component)]
pub struct PooledBullet;

/// Bullet lifecycle.
///
/// `Active -> PendingReturn` happens through [`BulletState::release`] only, and only once.
/// The commit system then returns the entity to the pool in the same tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

impl BulletState {
    /// Remove from the live set. Returns `false` if the bullet was not live.
    #[inline]
    pub fn release(&mut self) -> bool {
        if *self == BulletState::Active {
            *self = BulletState::PendingReturn;
            true
        } else {
            false
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub kind: BulletKind,
    pub owner: Option<Entity>,
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub age: f32,
    pub max_age: f32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            kind: BulletKind::Player,
            owner: None,
            direction: Vec3::NEG_Z,
            speed: 0.0,
            damage: 0,
            age: 0.0,
            max_age: 0.0,
        }
    }
}

impl Bullet {
    #[inline]
    pub fn reset_for_fire(&mut self, req: &SpawnBulletRequest, max_age: f32) {
        self.kind = req.kind;
        self.owner = req.owner;
        self.direction = req.direction.normalize_or(Vec3::NEG_Z);
        self.speed = req.speed;
        self.damage = req.damage;
        self.age = 0.0;
        self.max_age = max_age;
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.direction * self.speed
    }
}
