//! Visual attach point.
//!
//! Gameplay code never requires rendering. Mesh and material handles are built once,
//! and only when the asset stores exist (full app). Spawners read
//! `Option<Res<CombatVisuals>>` and attach a visual node when it is there; the headless
//! app simply runs the same simulation without visual nodes.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct CombatVisuals {
    pub wall_mesh: Handle<Mesh>,
    pub wall_material: Handle<StandardMaterial>,
    pub floor_material: Handle<StandardMaterial>,

    pub enemy_body: Handle<Mesh>,
    pub enemy_head: Handle<Mesh>,
    pub enemy_limb: Handle<Mesh>,

    pub bullet_mesh: Handle<Mesh>,
    pub player_bullet_material: Handle<StandardMaterial>,
    pub enemy_bullet_material: Handle<StandardMaterial>,

    pub particle_mesh: Handle<Mesh>,
    pub blood_material: Handle<StandardMaterial>,
    pub spark_material: Handle<StandardMaterial>,
    pub dust_material: Handle<StandardMaterial>,
}

/// Base colour for each enemy tier; materials are per-enemy so hit flashes stay local.
pub fn enemy_tint(tier: usize) -> Color {
    match tier {
        0 => Color::srgb(0.55, 0.6, 0.35),
        1 => Color::srgb(0.35, 0.45, 0.7),
        _ => Color::srgb(0.7, 0.25, 0.2),
    }
}

pub fn init_visuals(
    mut commands: Commands,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        debug!("mesh/material stores unavailable; running without visuals");
        return;
    };

    let unlit = |color: Color| StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    };

    commands.insert_resource(CombatVisuals {
        wall_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        wall_material: materials.add(Color::srgb(0.32, 0.33, 0.38)),
        floor_material: materials.add(Color::srgb(0.14, 0.14, 0.16)),

        enemy_body: meshes.add(Capsule3d::new(0.35, 0.9)),
        enemy_head: meshes.add(Sphere::new(0.22)),
        enemy_limb: meshes.add(Cuboid::new(0.14, 0.6, 0.14)),

        bullet_mesh: meshes.add(Sphere::new(0.06)),
        player_bullet_material: materials.add(unlit(Color::srgb(1.0, 0.85, 0.3))),
        enemy_bullet_material: materials.add(unlit(Color::srgb(1.0, 0.3, 0.2))),

        particle_mesh: meshes.add(Cuboid::new(0.06, 0.06, 0.06)),
        blood_material: materials.add(unlit(Color::srgb(0.6, 0.02, 0.02))),
        spark_material: materials.add(unlit(Color::srgb(1.0, 0.8, 0.4))),
        dust_material: materials.add(unlit(Color::srgb(0.45, 0.42, 0.38))),
    });
}
