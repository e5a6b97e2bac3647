//! Cosmetic feedback: hit flash, camera shake, particles, sound cues.
//!
//! Everything here consumes `CombatFeedback` and writes presentation state only.
//! Nothing in the simulation reads it back, so any of these consumers may be absent
//! or drop work (particle budget, no renderer) without changing gameplay.

pub mod particles;

use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::state::GameState;
use crate::plugins::camera::MainCamera;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::combat::messages::CombatFeedback;
use crate::plugins::combat::CombatSystems;
use crate::plugins::enemies::components::EnemyMaterial;

/// Value normalized to `[0, 1]`; clamped on write.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    pub fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
    #[inline]
    pub fn add_clamped(&mut self, dv: f32) {
        self.0 = (self.0 + dv).clamp(0.0, 1.0);
    }
    #[inline]
    pub fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

/// Brief white tint after a hit.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitFlash(pub UnitF32);

const FLASH_DECAY: f32 = 6.0;
const TRAUMA_DECAY: f32 = 1.2;
const SHAKE_AMPLITUDE: f32 = 0.12;

/// Camera trauma. Shake strength is trauma squared.
#[derive(Resource, Debug, Default)]
pub struct CameraShake {
    pub trauma: UnitF32,
    phase: f32,
    /// Offset applied last tick, removed before applying the next one.
    prev_offset: Vec3,
}

impl CameraShake {
    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma.add_clamped(amount);
    }

    /// Advance by `dt` and return this tick's offset.
    pub fn step(&mut self, dt: f32) -> Vec3 {
        use std::f32::consts::TAU;

        self.phase += dt;
        self.trauma.decay_to_zero(TRAUMA_DECAY, dt);
        let strength = self.trauma.get() * self.trauma.get();
        if strength <= 0.0 {
            return Vec3::ZERO;
        }

        // Deterministic pseudo-noise.
        let p = self.phase;
        let x = (p * 37.0 * TAU).sin() + 0.5 * (p * 61.0 * TAU).sin();
        let y = (p * 41.0 * TAU).cos() + 0.5 * (p * 53.0 * TAU).cos();
        Vec3::new(x, y, 0.0).clamp_length_max(1.0) * SHAKE_AMPLITUDE * strength
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CameraShake>();

    app.add_systems(
        Update,
        (
            (
                trigger_hit_flash,
                trigger_camera_shake,
                particles::spawn_particles,
                log_sound_cues,
            ),
            (decay_hit_flash, apply_camera_shake, particles::age_particles),
        )
            .chain()
            .in_set(CombatSystems::Effects),
    );

    app.add_systems(OnExit(GameState::InGame), reset_camera_shake);
}

pub fn trigger_hit_flash(mut feedback: MessageReader<CombatFeedback>, mut q: Query<&mut HitFlash>) {
    for f in feedback.read() {
        if let CombatFeedback::HitFlash { target } = f
            && let Ok(mut flash) = q.get_mut(*target)
        {
            flash.0 = UnitF32::new_clamped(1.0);
        }
    }
}

/// Decay flashes and push the tint into each enemy's own material.
pub fn decay_hit_flash(
    clock: Res<SimClock>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut q: Query<(&mut HitFlash, &Life, Option<&EnemyMaterial>)>,
) {
    let dt = clock.dt();
    for (mut flash, life, material) in &mut q {
        flash.0.decay_to_zero(FLASH_DECAY, dt);

        let (Some(materials), Some(material)) = (materials.as_deref_mut(), material) else {
            continue;
        };
        let Some(mut asset) = materials.get_mut(&material.handle) else {
            continue;
        };

        let mut c = material.base.to_srgba();
        if !life.is_alive() {
            c.red *= 0.5;
            c.green *= 0.5;
            c.blue *= 0.5;
        }
        let f = flash.0.get();
        c.red += (1.0 - c.red) * f;
        c.green += (1.0 - c.green) * f;
        c.blue += (1.0 - c.blue) * f;
        asset.base_color = c.into();
    }
}

pub fn trigger_camera_shake(mut feedback: MessageReader<CombatFeedback>, mut shake: ResMut<CameraShake>) {
    for f in feedback.read() {
        if let CombatFeedback::CameraShake { intensity } = f {
            shake.add_trauma(*intensity);
        }
    }
}

pub fn apply_camera_shake(
    clock: Res<SimClock>,
    mut shake: ResMut<CameraShake>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let prev = shake.prev_offset;
    let offset = shake.step(clock.dt());
    for mut tf in &mut cameras {
        tf.translation += offset - prev;
    }
    shake.prev_offset = offset;
}

fn reset_camera_shake(mut shake: ResMut<CameraShake>) {
    *shake = CameraShake::default();
}

/// No audio device is part of the game core; cues are traced.
pub fn log_sound_cues(mut feedback: MessageReader<CombatFeedback>) {
    for f in feedback.read() {
        if let CombatFeedback::Sound(cue) = f {
            debug!("sound cue: {cue:?}");
        }
    }
}

#[cfg(test)]
mod tests;
