//! Spawn consumer: the single writer of the bullet pool.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::common::visuals::CombatVisuals;

use super::components::{Bullet, BulletState, PooledBullet};
use super::messages::{BulletKind, SpawnBulletRequest};
use super::pool::{activate_bullet, BulletPool};

pub fn allocate_bullets_from_pool(
    mut pool: ResMut<BulletPool>,
    tunables: Res<Tunables>,
    visuals: Option<Res<CombatVisuals>>,
    mut reader: MessageReader<SpawnBulletRequest>,
    mut bullets: Query<(&mut BulletState, &mut Bullet, &mut Transform, &mut Visibility), With<PooledBullet>>,
    mut materials: Query<&mut MeshMaterial3d<StandardMaterial>, With<PooledBullet>>,
) {
    for req in reader.read() {
        let Some(id) = activate_bullet(&mut pool, &mut bullets, req, tunables.bullet_max_age) else {
            debug!("bullet pool exhausted; dropped {:?} shot", req.kind);
            continue;
        };

        let (Some(visuals), Ok(mut material)) = (visuals.as_deref(), materials.get_mut(id.0)) else {
            continue;
        };
        material.0 = match req.kind {
            BulletKind::Player => visuals.player_bullet_material.clone(),
            BulletKind::Enemy => visuals.enemy_bullet_material.clone(),
        };
    }
}
