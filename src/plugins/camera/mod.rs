//! Camera plugin (render-only).
//!
//! The camera is a child of the player body at eye height, so it follows the body's
//! yaw for free. Only pitch is written here. Camera shake (effects plugin) adds a
//! local offset on top of this and removes it again the next tick.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::CombatSystems;
use crate::plugins::player::{spawn_player, Player, PlayerView};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), attach_camera.after(spawn_player))
        .add_systems(Update, apply_pitch.after(CombatSystems::Input));
}

fn attach_camera(mut commands: Commands, tunables: Res<Tunables>, q_player: Query<Entity, With<Player>>) {
    let Ok(player) = q_player.single() else {
        warn!("no player to attach the camera to");
        return;
    };
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Name::new("MainCamera"),
            Camera3d::default(),
            MainCamera,
            Projection::Perspective(PerspectiveProjection {
                fov: 75f32.to_radians(),
                ..default()
            }),
            Transform::from_xyz(0.0, tunables.eye_height, 0.0),
        ));
    });
}

fn apply_pitch(
    q_player: Query<&PlayerView, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(view) = q_player.single() else {
        return;
    };
    for mut tf in &mut q_cam {
        tf.rotation = Quat::from_rotation_x(view.pitch);
    }
}
