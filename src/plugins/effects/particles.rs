//! Cosmetic particles: blood bursts, wall sparks, floor dust.
//!
//! Particles are plain entities with a velocity and an age. They live under a global
//! budget; a burst that does not fit is trimmed, never queued.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::clock::SimClock;
use crate::common::rng::CombatRng;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::common::visuals::CombatVisuals;
use crate::plugins::combat::messages::{CombatFeedback, Surface};

const GRAVITY: f32 = 9.8;
const SPARKS_PER_IMPACT: u8 = 6;
const DUST_PER_IMPACT: u8 = 4;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub velocity: Vec3,
    pub age: f32,
    pub max_age: f32,
}

impl Particle {
    /// Integrate one step. Returns `false` once expired.
    pub fn step(&mut self, tf: &mut Transform, dt: f32) -> bool {
        self.age += dt;
        self.velocity.y -= GRAVITY * dt;
        tf.translation += self.velocity * dt;
        self.age <= self.max_age
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Blood,
    Spark,
    Dust,
}

/// Random spray around `dir` (or a hemisphere when `dir` is zero).
fn spray(rng: &mut impl Rng, dir: Vec3, speed: f32) -> Vec3 {
    let jitter = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(0.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    );
    (dir.normalize_or_zero() + jitter * 0.6).normalize_or(Vec3::Y) * speed * rng.gen_range(0.5..=1.0)
}

pub fn spawn_particles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<CombatRng>,
    visuals: Option<Res<CombatVisuals>>,
    live: Query<(), With<Particle>>,
    mut feedback: MessageReader<CombatFeedback>,
) {
    let mut alive = live.iter().count();
    for f in feedback.read() {
        let (at, dir, n, kind) = match *f {
            CombatFeedback::Blood { at, direction, count } => (at, direction, count, Kind::Blood),
            CombatFeedback::Impact {
                at,
                normal,
                surface: Surface::Wall,
            } => (at, normal, SPARKS_PER_IMPACT, Kind::Spark),
            CombatFeedback::Impact {
                at,
                normal,
                surface: Surface::Floor,
            } => (at, normal, DUST_PER_IMPACT, Kind::Dust),
            _ => continue,
        };

        let room = tunables.particle_budget.saturating_sub(alive);
        let n = (n as usize).min(room);
        if n == 0 {
            debug!("particle budget exhausted; {kind:?} burst dropped");
            continue;
        }

        let speed = match kind {
            Kind::Blood => 3.0,
            Kind::Spark => 5.0,
            Kind::Dust => 1.5,
        };
        for _ in 0..n {
            let mut e = commands.spawn((
                Name::new("Particle"),
                Particle {
                    velocity: spray(&mut rng.rng, dir, speed),
                    age: 0.0,
                    max_age: tunables.particle_lifetime,
                },
                Transform::from_translation(at),
                Visibility::default(),
                DespawnOnExit(GameState::InGame),
            ));
            if let Some(v) = visuals.as_deref() {
                let material = match kind {
                    Kind::Blood => v.blood_material.clone(),
                    Kind::Spark => v.spark_material.clone(),
                    Kind::Dust => v.dust_material.clone(),
                };
                e.insert((Mesh3d(v.particle_mesh.clone()), MeshMaterial3d(material)));
            }
        }
        alive += n;
    }
}

pub fn age_particles(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut q: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    let dt = clock.dt();
    for (e, mut p, mut tf) in &mut q {
        if !p.step(&mut tf, dt) {
            commands.entity(e).try_despawn();
        }
    }
}
