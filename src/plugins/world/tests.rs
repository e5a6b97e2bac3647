use bevy::prelude::*;

use crate::common::test_utils::{combat_world, run_system_once};
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::spatial::WallId;
use crate::plugins::level::LevelSource;

use super::MazeWall;

#[test]
fn spawn_maze_fills_wall_set_and_spawns_bodies() {
    let mut world = combat_world();
    let level = LevelSource::Embedded.load().expect("default level");
    let boxes = level.walls.len();
    world.insert_resource(level);

    run_system_once(&mut world, super::spawn_maze);

    assert_eq!(world.resource::<CombatDirectory>().walls().len(), boxes);
    assert_eq!(world.query::<&MazeWall>().iter(&world).count(), boxes);
}

#[test]
fn wall_transform_matches_its_box() {
    let mut world = combat_world();
    let level = LevelSource::Embedded.load().expect("default level");
    let first = level.walls[0];
    world.insert_resource(level);

    run_system_once(&mut world, super::spawn_maze);

    let tf = world
        .query::<(&MazeWall, &Transform)>()
        .iter(&world)
        .find(|(w, _)| w.0 == WallId(0))
        .map(|(_, tf)| *tf)
        .expect("first wall");
    assert_eq!(tf.translation, first.center());
    assert_eq!(tf.scale, first.size());
}

#[test]
fn no_level_builds_nothing() {
    let mut world = combat_world();
    run_system_once(&mut world, super::spawn_maze);
    run_system_once(&mut world, super::spawn_floor);
    assert!(world.resource::<CombatDirectory>().walls().is_empty());
    assert_eq!(world.query::<&Name>().iter(&world).count(), 0);
}
