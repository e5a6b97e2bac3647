//! Pre-spawned bullet entities.
//!
//! Bullets are never despawned during a session. A bullet is "destroyed" by moving it
//! back to `Inactive`, which hides it and returns the entity to the free list.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::common::visuals::CombatVisuals;

use super::components::{Bullet, BulletId, BulletState, PooledBullet};
use super::messages::SpawnBulletRequest;

#[derive(Resource, Debug, Default)]
pub struct BulletPool {
    free: Vec<BulletId>,
    capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<BulletId> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, id: BulletId) {
        debug_assert!(!self.free.contains(&id), "bullet {id:?} returned to the pool twice");
        self.free.push(id);
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bullets currently out of the pool.
    pub fn in_use(&self) -> usize {
        self.capacity.saturating_sub(self.free.len())
    }
}

/// Far below the floor, where hidden bullets wait.
pub const PARKED: Vec3 = Vec3::new(0.0, -100.0, 0.0);

/// Pre-spawn the pool (all inactive).
pub fn init_bullet_pool(
    mut commands: Commands,
    tunables: Res<Tunables>,
    visuals: Option<Res<CombatVisuals>>,
) {
    let capacity = tunables.bullet_pool_capacity;
    let mut pool = BulletPool::new(capacity);

    for _ in 0..capacity {
        let mut e = commands.spawn((
            Name::new("Bullet(Pooled)"),
            PooledBullet,
            BulletState::Inactive,
            Bullet::default(),
            Transform::from_translation(PARKED),
            Visibility::Hidden,
        ));
        if let Some(visuals) = visuals.as_deref() {
            e.insert((
                Mesh3d(visuals.bullet_mesh.clone()),
                MeshMaterial3d(visuals.player_bullet_material.clone()),
            ));
        }
        pool.free.push(BulletId(e.id()));
    }

    debug!("bullet pool ready: {capacity} bullets");
    commands.insert_resource(pool);
}

/// Bring one pooled bullet to life for `req`.
///
/// Returns `None` when the pool is exhausted. The request is dropped in that case; it
/// is a capacity decision, not a failure.
pub fn activate_bullet(
    pool: &mut BulletPool,
    bullets: &mut Query<(&mut BulletState, &mut Bullet, &mut Transform, &mut Visibility), With<PooledBullet>>,
    req: &SpawnBulletRequest,
    max_age: f32,
) -> Option<BulletId> {
    let id = pool.pop_free()?;
    let Ok((mut state, mut bullet, mut tf, mut vis)) = bullets.get_mut(id.0) else {
        // The entity vanished from under the pool; forget it.
        warn!("pooled bullet {:?} no longer exists", id.0);
        return None;
    };

    *state = BulletState::Active;
    bullet.reset_for_fire(req, max_age);
    tf.translation = req.origin;
    tf.look_to(bullet.direction, Vec3::Y);
    *vis = Visibility::Visible;
    Some(id)
}
