//! Per-tick bullet integration and collision resolution.
//!
//! For each live bullet, in order:
//! 1. integrate position and age, expire when older than `max_age`;
//! 2. player bullets: sphere test against live enemies, first in directory order wins;
//! 3. swept segment test against walls (previous to current position);
//! 4. floor plane;
//! 5. enemy bullets: sphere test against the player.
//!
//! The first positive check releases the bullet, so no bullet can hit twice. Damage goes
//! through [`DamageResolver`] only.

use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::tunables::Tunables;
use crate::plugins::combat::damage::{DamageResolver, Hit};
use crate::plugins::combat::directory::{CombatDirectory, EnemyHandle};
use crate::plugins::combat::messages::{CombatFeedback, SoundCue, Surface};
use crate::plugins::combat::spatial::{sphere_hit, sweep_walls};

use super::components::{Bullet, BulletState, PooledBullet};
use super::messages::BulletKind;

/// Why a bullet left the live set this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BulletFate {
    Flying,
    Expired,
    HitEnemy(Entity),
    /// Carries the surface normal at the contact point.
    HitWall(Vec3),
    HitFloor,
    HitPlayer(Entity),
}

/// Collision priority for one bullet segment. Pure, so the ordering can be tested
/// without a world.
pub fn classify_segment(
    bullet: &Bullet,
    from: Vec3,
    to: Vec3,
    enemies: &[EnemyHandle],
    directory: &CombatDirectory,
    tunables: &Tunables,
) -> (BulletFate, Vec3) {
    if bullet.age > bullet.max_age {
        return (BulletFate::Expired, to);
    }

    if bullet.kind == BulletKind::Player
        && let Some(enemy) = enemies
            .iter()
            .find(|e| sphere_hit(from, to, e.position, e.hit_radius))
    {
        return (BulletFate::HitEnemy(enemy.entity), to);
    }

    if let Some(hit) = sweep_walls(directory.walls(), from, to) {
        return (BulletFate::HitWall(hit.normal), hit.point);
    }

    if to.y <= tunables.floor_height {
        return (
            BulletFate::HitFloor,
            Vec3::new(to.x, tunables.floor_height, to.z),
        );
    }

    if bullet.kind == BulletKind::Enemy
        && let Some(player) = directory.player()
        && let Some(entry) = directory.player_entry()
        && entry.alive
        && sphere_hit(from, to, entry.position, entry.hit_radius)
    {
        return (BulletFate::HitPlayer(player), to);
    }

    (BulletFate::Flying, to)
}

pub fn advance_bullets(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    directory: Res<CombatDirectory>,
    mut resolver: DamageResolver,
    mut bullets: Query<(&mut Bullet, &mut BulletState, &mut Transform), With<PooledBullet>>,
) {
    let dt = clock.dt();
    if dt <= 0.0 {
        return;
    }
    // Stable for the whole tick; enemies killed mid-tick stay in it and absorb
    // bullets as no-op hits.
    let enemies = directory.query_live_enemies();

    for (mut bullet, mut state, mut tf) in &mut bullets {
        if *state != BulletState::Active {
            continue;
        }

        let from = tf.translation;
        let to = from + bullet.velocity() * dt;
        bullet.age += dt;

        let (fate, at) = classify_segment(&bullet, from, to, &enemies, &directory, &tunables);
        tf.translation = at;
        if fate == BulletFate::Flying || !state.release() {
            continue;
        }

        let hit = Hit {
            point: at,
            direction: bullet.direction,
        };
        match fate {
            BulletFate::Flying => {}
            BulletFate::Expired => {
                debug!("bullet expired after {:.2}s", bullet.age);
            }
            BulletFate::HitEnemy(target) | BulletFate::HitPlayer(target) => {
                if !resolver.apply_damage(target, bullet.damage, hit).landed() {
                    debug!("bullet absorbed by {target}: already dead or gone");
                }
            }
            BulletFate::HitWall(normal) => {
                resolver.cosmetic(CombatFeedback::Impact {
                    at,
                    normal,
                    surface: Surface::Wall,
                });
                resolver.cosmetic(CombatFeedback::Sound(SoundCue::WallImpact));
            }
            BulletFate::HitFloor => {
                resolver.cosmetic(CombatFeedback::Impact {
                    at,
                    normal: Vec3::Y,
                    surface: Surface::Floor,
                });
            }
        }
    }
}
