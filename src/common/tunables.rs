//! Tunable gameplay constants.
//!
//! This is the one authoritative constant set for combat. Hit radii and the
//! absence of bullet drop are decided here and nowhere else.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Upper bound for a single simulation step, in seconds.
    ///
    /// A long stall (hidden tab, debugger pause) is replayed as one clamped
    /// step instead of a giant jump.
    pub max_tick_dt: f32,

    pub player_speed: f32,
    /// Eye height above the player body center.
    pub eye_height: f32,
    /// Radius of the sphere test used for enemy bullets against the player.
    pub player_hit_radius: f32,
    pub player_max_health: u32,

    /// Base radius of the sphere test used for player bullets against enemies.
    /// Multiplied by the enemy's scale. Deliberately larger than the mesh.
    pub enemy_hit_radius: f32,
    /// Base radius of the enemy body used for wall penetration checks.
    pub enemy_body_radius: f32,
    /// Clearance left between an enemy and a wall face after correction.
    pub wall_push_epsilon: f32,
    /// Time between death and teardown of an enemy (death animation window).
    pub death_grace_secs: f32,

    /// Bullets older than this are destroyed without effect.
    pub bullet_max_age: f32,
    /// Bullets at or below this height hit the floor.
    pub floor_height: f32,

    pub weapon_damage: u32,
    pub weapon_bullet_speed: f32,
    /// Seconds between player shots.
    pub weapon_fire_interval: f32,
    pub weapon_magazine: u32,
    pub weapon_reload_secs: f32,
    /// Distance ahead of the eye where player bullets appear.
    pub muzzle_offset: f32,
    pub bullet_pool_capacity: usize,

    pub camera_shake_intensity: f32,
    /// Maximum number of live cosmetic particles.
    pub particle_budget: usize,
    pub particle_lifetime: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            max_tick_dt: 0.1,
            player_speed: 5.0,
            eye_height: 0.7,
            player_hit_radius: 0.6,
            player_max_health: 100,
            enemy_hit_radius: 1.0,
            enemy_body_radius: 0.45,
            wall_push_epsilon: 0.05,
            death_grace_secs: 2.0,
            bullet_max_age: 3.0,
            floor_height: 0.0,
            weapon_damage: 10,
            weapon_bullet_speed: 40.0,
            weapon_fire_interval: 0.15,
            weapon_magazine: 12,
            weapon_reload_secs: 1.5,
            muzzle_offset: 0.3,
            bullet_pool_capacity: 256,
            camera_shake_intensity: 0.35,
            particle_budget: 256,
            particle_lifetime: 0.6,
        }
    }
}
