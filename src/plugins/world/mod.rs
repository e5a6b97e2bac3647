//! World plugin: builds the maze from the current level.
//!
//! Every wall exists twice: as a static physics body that blocks the player, and as a
//! box in the `CombatDirectory` wall set that bullets and enemies are tested against.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::visuals::CombatVisuals;
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::spatial::WallId;
use crate::plugins::level::CurrentLevel;

const FLOOR_THICKNESS: f32 = 0.1;

/// Links a wall entity to its entry in the directory's wall set.
#[derive(Component, Debug, Clone, Copy)]
pub struct MazeWall(pub WallId);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_maze, spawn_floor));
}

pub fn spawn_maze(
    mut commands: Commands,
    level: Option<Res<CurrentLevel>>,
    visuals: Option<Res<CombatVisuals>>,
    mut directory: ResMut<CombatDirectory>,
) {
    let Some(level) = level else {
        warn!("no level loaded; maze not built");
        return;
    };

    let layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);

    for (i, bounds) in level.walls.iter().enumerate() {
        let id = directory.walls_mut().add(*bounds);
        let mut e = commands.spawn((
            Name::new(format!("Wall{i}")),
            MazeWall(id),
            // Unit cube scaled to the box; the collider scales with it.
            Transform::from_translation(bounds.center()).with_scale(bounds.size()),
            Visibility::default(),
            RigidBody::Static,
            Collider::cuboid(1.0, 1.0, 1.0),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
        if let Some(v) = visuals.as_deref() {
            e.insert((Mesh3d(v.wall_mesh.clone()), MeshMaterial3d(v.wall_material.clone())));
        }
    }

    debug!("maze built: {} wall boxes", directory.walls().len());
}

/// Visual only; nothing falls, so the floor needs no body.
pub fn spawn_floor(mut commands: Commands, level: Option<Res<CurrentLevel>>, visuals: Option<Res<CombatVisuals>>) {
    let (Some(level), Some(v)) = (level, visuals) else {
        return;
    };
    let size = level.size();
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(v.wall_mesh.clone()),
        MeshMaterial3d(v.floor_material.clone()),
        Transform::from_translation(level.center() - Vec3::Y * FLOOR_THICKNESS * 0.5)
            .with_scale(Vec3::new(size.x, FLOOR_THICKNESS, size.y)),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
