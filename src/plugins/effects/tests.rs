use bevy::prelude::*;

use crate::common::test_utils::{combat_world, run_system_once, tick_clock};
use crate::common::tunables::Tunables;
use crate::plugins::camera::MainCamera;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::combat::messages::{CombatFeedback, Surface};

use super::particles::{self, Particle};
use super::*;

fn effects_world() -> World {
    let mut world = combat_world();
    world.init_resource::<CameraShake>();
    world
}

fn particle_count(world: &mut World) -> usize {
    world.query::<&Particle>().iter(world).count()
}

#[test]
fn unit_f32_clamps_and_decays() {
    assert_eq!(UnitF32::new_clamped(2.0).get(), 1.0);
    assert_eq!(UnitF32::new_clamped(-1.0).get(), 0.0);

    let mut v = UnitF32::new_clamped(0.5);
    v.add_clamped(0.9);
    assert_eq!(v.get(), 1.0);
    v.decay_to_zero(2.0, 0.25);
    assert!((v.get() - 0.5).abs() < 1e-6);
    v.decay_to_zero(2.0, 10.0);
    assert_eq!(v.get(), 0.0);
}

#[test]
fn camera_shake_fades_out() {
    let mut shake = CameraShake::default();
    assert_eq!(shake.step(0.016), Vec3::ZERO);

    shake.add_trauma(0.8);
    let mut peak = 0.0f32;
    for _ in 0..10 {
        peak = peak.max(shake.step(0.016).length());
    }
    assert!(peak > 0.0);
    assert!(peak <= SHAKE_AMPLITUDE);

    for _ in 0..100 {
        shake.step(0.016);
    }
    assert_eq!(shake.trauma.get(), 0.0);
    assert_eq!(shake.step(0.016), Vec3::ZERO);
}

#[test]
fn camera_returns_to_rest_after_shake() {
    let mut world = effects_world();
    let cam = world.spawn((MainCamera, Transform::from_xyz(0.0, 0.7, 0.0))).id();
    world.write_message(CombatFeedback::CameraShake { intensity: 1.0 });
    run_system_once(&mut world, trigger_camera_shake);

    tick_clock(&mut world, 0.016);
    run_system_once(&mut world, apply_camera_shake);
    let shaken = world.get::<Transform>(cam).expect("camera").translation;
    assert!(shaken != Vec3::new(0.0, 0.7, 0.0));

    for _ in 0..120 {
        tick_clock(&mut world, 0.016);
        run_system_once(&mut world, apply_camera_shake);
    }
    let rest = world.get::<Transform>(cam).expect("camera").translation;
    assert!((rest - Vec3::new(0.0, 0.7, 0.0)).length() < 1e-4, "{rest}");
}

#[test]
fn hit_flash_triggers_and_decays() {
    let mut world = effects_world();
    let e = world.spawn((HitFlash::default(), Life::Alive)).id();
    world.write_message(CombatFeedback::HitFlash { target: e });
    run_system_once(&mut world, trigger_hit_flash);
    assert_eq!(world.get::<HitFlash>(e).expect("flash").0.get(), 1.0);

    // No material store: tint is skipped, decay still runs.
    tick_clock(&mut world, 0.1);
    run_system_once(&mut world, decay_hit_flash);
    let v = world.get::<HitFlash>(e).expect("flash").0.get();
    assert!((v - 0.4).abs() < 1e-5, "{v}");
}

#[test]
fn hit_flash_for_a_despawned_target_is_dropped() {
    let mut world = effects_world();
    let gone = world.spawn(HitFlash::default()).id();
    world.despawn(gone);
    world.write_message(CombatFeedback::HitFlash { target: gone });
    run_system_once(&mut world, trigger_hit_flash);
}

#[test]
fn particle_bursts_are_trimmed_to_the_budget() {
    let mut world = effects_world();
    world.resource_mut::<Tunables>().particle_budget = 10;

    world.write_message(CombatFeedback::Blood {
        at: Vec3::ZERO,
        direction: Vec3::X,
        count: 6,
    });
    world.write_message(CombatFeedback::Impact {
        at: Vec3::ZERO,
        normal: Vec3::NEG_X,
        surface: Surface::Wall,
    });
    world.write_message(CombatFeedback::Impact {
        at: Vec3::ZERO,
        normal: Vec3::Y,
        surface: Surface::Floor,
    });
    run_system_once(&mut world, particles::spawn_particles);

    // 6 blood + 4 of the 6 sparks; the dust burst finds no room.
    assert_eq!(particle_count(&mut world), 10);
}

#[test]
fn particles_expire() {
    let mut world = effects_world();
    world.write_message(CombatFeedback::Impact {
        at: Vec3::new(1.0, 0.0, 1.0),
        normal: Vec3::Y,
        surface: Surface::Floor,
    });
    run_system_once(&mut world, particles::spawn_particles);
    assert_eq!(particle_count(&mut world), 4);

    tick_clock(&mut world, 0.3);
    run_system_once(&mut world, particles::age_particles);
    assert_eq!(particle_count(&mut world), 4);

    tick_clock(&mut world, 0.4);
    run_system_once(&mut world, particles::age_particles);
    assert_eq!(particle_count(&mut world), 0);
}

#[test]
fn particle_falls_under_gravity() {
    let mut p = Particle {
        velocity: Vec3::ZERO,
        age: 0.0,
        max_age: 1.0,
    };
    let mut tf = Transform::default();
    assert!(p.step(&mut tf, 0.1));
    assert!(tf.translation.y < 0.0);
    assert!(!p.step(&mut tf, 1.0));
}

#[test]
fn sound_cues_and_unrelated_feedback_spawn_nothing() {
    let mut world = effects_world();
    world.write_message(CombatFeedback::Sound(crate::plugins::combat::messages::SoundCue::Gunshot));
    world.write_message(CombatFeedback::CameraShake { intensity: 0.2 });
    run_system_once(&mut world, log_sound_cues);
    run_system_once(&mut world, particles::spawn_particles);
    assert_eq!(particle_count(&mut world), 0);
}
