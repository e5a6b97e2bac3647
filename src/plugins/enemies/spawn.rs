//! Enemy instantiation from the level's spawn list.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::common::visuals::{enemy_tint, CombatVisuals};
use crate::plugins::combat::components::{AimPoint, Faction, Health};
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::effects::HitFlash;
use crate::plugins::level::{CurrentLevel, EnemySpawn};

use super::components::{AiState, Enemy, EnemyMaterial, FireCooldown, Heading, Limb, WalkCycle};

/// Body center above the floor, before scaling.
pub const BODY_CENTER: f32 = 0.9;
/// Aim point above the body center, before scaling.
pub const CHEST: f32 = 0.2;
const CAPSULE_LENGTH: f32 = 0.9;

pub fn spawn_enemies(
    mut commands: Commands,
    level: Option<Res<CurrentLevel>>,
    tunables: Res<Tunables>,
    visuals: Option<Res<CombatVisuals>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut directory: ResMut<CombatDirectory>,
) {
    let Some(level) = level else {
        warn!("no level loaded; no enemies spawned");
        return;
    };

    for (i, spawn) in level.enemies.iter().enumerate() {
        let e = spawn_enemy(&mut commands, i, spawn, &tunables);
        let stats = spawn.kind.stats();
        let aim = Vec3::Y * CHEST * stats.scale;
        let center = spawn.position + Vec3::Y * BODY_CENTER * stats.scale;
        directory.register(
            e,
            Faction::Enemy,
            center + aim,
            stats.max_health,
            tunables.enemy_hit_radius * stats.scale,
        );

        if let (Some(visuals), Some(materials)) = (visuals.as_deref(), materials.as_deref_mut()) {
            attach_enemy_visuals(&mut commands, e, spawn, visuals, materials);
        }
    }

    info!("spawned {} enemies", level.enemies.len());
}

fn spawn_enemy(commands: &mut Commands, index: usize, spawn: &EnemySpawn, tunables: &Tunables) -> Entity {
    let stats = spawn.kind.stats();
    let center = spawn.position + Vec3::Y * BODY_CENTER * stats.scale;
    let body_radius = tunables.enemy_body_radius;

    commands
        .spawn((
            Name::new(format!("Enemy{index}({})", spawn.kind)),
            (Enemy, spawn.kind, stats, Faction::Enemy),
            (Health::new(stats.max_health), Life::Alive),
            (
                AiState::Idle,
                Heading(spawn.yaw),
                FireCooldown::default(),
                WalkCycle::default(),
                HitFlash::default(),
            ),
            AimPoint(Vec3::Y * CHEST * stats.scale),
            Transform::from_translation(center)
                .with_rotation(Quat::from_rotation_y(spawn.yaw))
                .with_scale(Vec3::splat(stats.scale)),
            Visibility::default(),
            (
                RigidBody::Kinematic,
                Collider::capsule(body_radius, CAPSULE_LENGTH),
                CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player]),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn attach_enemy_visuals(
    commands: &mut Commands,
    enemy: Entity,
    spawn: &EnemySpawn,
    visuals: &CombatVisuals,
    materials: &mut Assets<StandardMaterial>,
) {
    let base = enemy_tint(spawn.kind.tier());
    let material = materials.add(base);

    commands.entity(enemy).insert(EnemyMaterial {
        handle: material.clone(),
        base,
    });
    commands.entity(enemy).with_children(|parent| {
        parent.spawn((
            Mesh3d(visuals.enemy_body.clone()),
            MeshMaterial3d(material.clone()),
        ));
        parent.spawn((
            Mesh3d(visuals.enemy_head.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(0.0, 0.75, 0.0),
        ));
        for side in [-1.0, 1.0] {
            parent.spawn((
                Limb { side },
                Mesh3d(visuals.enemy_limb.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.45 * side, 0.1, 0.0),
            ));
        }
    });
}
