//! Return commit: recycle released bullets into the pool.
//!
//! Runs right after `advance_bullets`, so a bullet released this tick is back in the
//! free list before the tick ends. This system owns the Inactive invariants:
//! hidden, parked, and in the free list exactly once.

use bevy::prelude::*;

use super::components::{BulletId, BulletState, PooledBullet};
use super::pool::{BulletPool, PARKED};

pub fn return_to_pool_commit(
    mut pool: ResMut<BulletPool>,
    mut q: Query<(Entity, &mut BulletState, &mut Visibility, &mut Transform), With<PooledBullet>>,
) {
    for (e, mut state, mut vis, mut tf) in &mut q {
        if *state != BulletState::PendingReturn {
            continue;
        }
        park(&mut state, &mut vis, &mut tf);
        pool.push_free(BulletId(e));
    }
}

/// Session end: every bullet still in flight goes back to the pool.
pub fn release_all_bullets(
    mut pool: ResMut<BulletPool>,
    mut q: Query<(Entity, &mut BulletState, &mut Visibility, &mut Transform), With<PooledBullet>>,
) {
    let mut returned = 0usize;
    for (e, mut state, mut vis, mut tf) in &mut q {
        if *state == BulletState::Inactive {
            continue;
        }
        park(&mut state, &mut vis, &mut tf);
        pool.push_free(BulletId(e));
        returned += 1;
    }
    if returned > 0 {
        debug!("returned {returned} in-flight bullets to the pool");
    }
}

#[inline]
fn park(state: &mut BulletState, vis: &mut Visibility, tf: &mut Transform) {
    *state = BulletState::Inactive;
    *vis = Visibility::Hidden;
    tf.translation = PARKED;
}
