//! Enemy behaviour.
//!
//! One state machine for every tier, driven by [`EnemyStats`]:
//! ```text
//!   distance >= detection_range           -> Idle       (stand still)
//!   attack_range < distance < detection   -> Pursuing   (turn + walk toward player)
//!   distance <= attack_range              -> Attacking  (turn + fire on cooldown)
//!   killed                                -> Dead       (terminal, see death.rs)
//! ```
//! Distances are horizontal. Positions and player lookup come from the
//! `CombatDirectory`; enemies never hold a reference to the player.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use rand::Rng;

use crate::common::clock::SimClock;
use crate::common::rng::CombatRng;
use crate::common::tunables::Tunables;
use crate::plugins::combat::components::AimPoint;
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::combat::spatial::{distance_xz, push_out_of_walls};
use crate::plugins::projectiles::messages::{BulletKind, SpawnBulletRequest};

use super::components::{AiState, Enemy, FireCooldown, Heading, Limb, WalkCycle};
use super::config::EnemyStats;

/// Largest aim error, per axis, for an accuracy of zero.
pub const AIM_JITTER: f32 = 0.2;
/// Peak limb swing, radians.
pub const WALK_AMPLITUDE: f32 = 0.6;
/// Swing frequency per unit of move speed.
pub const WALK_FREQUENCY: f32 = 2.5;
/// Muzzle distance ahead of the aim point, before scaling.
pub const MUZZLE_REACH: f32 = 0.5;

pub fn classify(distance: f32, stats: &EnemyStats) -> AiState {
    if distance >= stats.detection_range {
        AiState::Idle
    } else if distance > stats.attack_range {
        AiState::Pursuing
    } else {
        AiState::Attacking
    }
}

/// Wrap to `[-PI, PI)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Yaw that faces `to` from `from` on the ground plane. `None` when they coincide.
pub fn yaw_toward(from: Vec3, to: Vec3) -> Option<f32> {
    let d = Vec2::new(to.x - from.x, to.z - from.z);
    (d.length_squared() > 1e-8).then(|| (-d.x).atan2(-d.y))
}

/// Rotate `current` toward `target` along the shortest arc by at most `max_step`.
pub fn turn_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + diff.signum() * max_step)
    }
}

/// Perturb `dir` by a bounded random offset scaled by `1 - accuracy`.
pub fn aim_with_spread(dir: Vec3, accuracy: f32, rng: &mut impl Rng) -> Vec3 {
    let spread = (1.0 - accuracy).clamp(0.0, 1.0) * AIM_JITTER;
    if spread <= 0.0 {
        return dir;
    }
    let jitter = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    ) * spread;
    (dir + jitter).normalize_or(dir)
}

/// Sim-time fire gate. Returns `true` and re-arms when a shot is allowed.
pub fn try_fire(cooldown: &mut FireCooldown, now: f64, interval: f32) -> bool {
    if now < cooldown.ready_at {
        return false;
    }
    cooldown.ready_at = now + interval as f64;
    true
}

#[inline]
pub fn walk_swing(now: f64, move_speed: f32) -> f32 {
    (now as f32 * WALK_FREQUENCY * move_speed).sin() * WALK_AMPLITUDE
}

pub fn enemy_think(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    directory: Res<CombatDirectory>,
    mut rng: ResMut<CombatRng>,
    mut enemies: Query<
        (
            Entity,
            &EnemyStats,
            &Life,
            &AimPoint,
            &mut AiState,
            &mut Heading,
            &mut FireCooldown,
            &mut WalkCycle,
            &mut Transform,
        ),
        With<Enemy>,
    >,
    mut requests: MessageWriter<SpawnBulletRequest>,
) {
    let dt = clock.dt();
    let now = clock.now();
    let target = directory
        .player_entry()
        .filter(|p| p.alive)
        .map(|p| p.position);

    for (entity, stats, life, aim, mut state, mut heading, mut cooldown, mut walk, mut tf) in &mut enemies {
        if !life.is_alive() || *state == AiState::Dead {
            continue;
        }

        let Some(target) = target else {
            *state = AiState::Idle;
            walk.swing = 0.0;
            continue;
        };

        let distance = distance_xz(tf.translation, target);
        *state = classify(distance, stats);
        if *state == AiState::Idle {
            walk.swing = 0.0;
            continue;
        }

        if let Some(yaw) = yaw_toward(tf.translation, target) {
            heading.0 = turn_toward(heading.0, yaw, stats.rotation_speed * dt);
            tf.rotation = Quat::from_rotation_y(heading.0);
        }

        match *state {
            AiState::Pursuing => {
                let to_player = Vec3::new(target.x - tf.translation.x, 0.0, target.z - tf.translation.z);
                let step = to_player.normalize_or_zero() * stats.move_speed * dt;
                let moved = tf.translation + step;
                tf.translation = push_out_of_walls(
                    moved,
                    tunables.enemy_body_radius * stats.scale,
                    directory.walls(),
                    tunables.wall_push_epsilon,
                );
                walk.swing = walk_swing(now, stats.move_speed);
            }
            AiState::Attacking => {
                walk.swing = 0.0;
                if !try_fire(&mut cooldown, now, stats.shoot_interval) {
                    continue;
                }
                let chest = tf.translation + aim.0;
                let forward = Vec3::new(target.x - chest.x, 0.0, target.z - chest.z).normalize_or_zero();
                let muzzle = chest + forward * MUZZLE_REACH * stats.scale;
                let Ok(dir) = Dir3::new(target - muzzle) else {
                    continue;
                };
                requests.write(SpawnBulletRequest {
                    kind: BulletKind::Enemy,
                    origin: muzzle,
                    direction: aim_with_spread(*dir, stats.accuracy, &mut rng.rng),
                    speed: stats.bullet_speed,
                    damage: stats.damage,
                    owner: Some(entity),
                });
            }
            AiState::Idle | AiState::Dead => {}
        }
    }
}

/// Mirror the parent's walk cycle on its limb children.
pub fn animate_limbs(walkers: Query<&WalkCycle>, mut limbs: Query<(&Limb, &ChildOf, &mut Transform)>) {
    for (limb, child_of, mut tf) in &mut limbs {
        let Ok(walk) = walkers.get(child_of.parent()) else {
            continue;
        };
        tf.rotation = Quat::from_rotation_x(walk.swing * limb.side);
    }
}
