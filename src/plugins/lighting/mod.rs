//! Lighting plugin (render-only).
//!
//! A low sun over the maze plus a warm lantern carried by the player.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::level::CurrentLevel;
use crate::plugins::player::Player;

const LANTERN_HEIGHT: f32 = 1.0;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), light_level)
        .add_systems(Update, carry_lantern.run_if(in_state(GameState::InGame)));
}

fn light_level(mut commands: Commands, level: Option<Res<CurrentLevel>>) {
    let center = level.as_deref().map_or(Vec3::ZERO, CurrentLevel::center);
    let reach = level.as_deref().map_or(20.0, |l| l.size().max_element());

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 3_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(center + Vec3::new(0.3, 1.0, 0.5) * reach).looking_at(center, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("Lantern"),
        PlayerLight,
        PointLight {
            color: Color::srgb(1.0, 0.9, 0.75),
            intensity: 200_000.0,
            range: 18.0,
            ..default()
        },
        Transform::from_translation(center),
        DespawnOnExit(GameState::InGame),
    ));
}

fn carry_lantern(
    players: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut lights: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let (Ok(player), Ok(mut light)) = (players.single(), lights.single_mut()) else {
        return;
    };
    light.translation = player.translation + Vec3::Y * LANTERN_HEIGHT;
}
