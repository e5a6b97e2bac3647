//! Player plugin.
//!
//! Pipeline:
//! - `CombatSystems::Input`: sample devices into [`PlayerInput`], turn the view, write
//!   `FireIntent` / `ReloadIntent` / debug `KillRequest`s.
//! - `FixedUpdate`: apply planar velocity to the physics body.
//!
//! Devices are read through `Option<Res<...>>`; the headless app has none and the
//! player simply stands still. Everything downstream of the intents is device-free.

use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::combat::components::{AimPoint, Faction, Health};
use crate::plugins::combat::directory::CombatDirectory;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::combat::messages::{EntityDied, KillRequest};
use crate::plugins::combat::CombatSystems;
use crate::plugins::level::CurrentLevel;
use crate::plugins::projectiles::messages::{FireIntent, ReloadIntent};
use crate::plugins::projectiles::weapon::PlayerWeapon;

/// Body center above the floor.
pub const BODY_CENTER: f32 = 0.9;
/// Where enemies aim, above the body center.
pub const CHEST: f32 = 0.4;
const BODY_RADIUS: f32 = 0.35;
const BODY_LENGTH: f32 = 1.1;

const MOUSE_SENSITIVITY: f32 = 0.003;
const KEY_TURN_SPEED: f32 = 2.5;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

#[derive(Component)]
pub struct Player;

/// Look direction. Yaw turns the body, pitch only tilts the view.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerView {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerView {
    pub fn forward(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    pub fn turn(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    /// x = strafe right, y = forward.
    pub move_axis: Vec2,
    /// Radians this tick (x = yaw, y = pitch).
    pub look_delta: Vec2,
    pub fire: bool,
    pub reload: bool,
    pub kill_all: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(OnEnter(GameState::InGame), spawn_player)
        .add_systems(
            Update,
            (gather_input, apply_look, emit_intents, debug_kill_all)
                .chain()
                .in_set(CombatSystems::Input),
        )
        .add_systems(
            Update,
            on_player_died.in_set(CombatSystems::Lifecycle),
        )
        .add_systems(
            FixedUpdate,
            apply_movement.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            restart_on_key.run_if(in_state(GameState::GameOver).or(in_state(GameState::LoadFailed))),
        )
        .add_systems(OnExit(GameState::InGame), clear_input);
}

pub fn spawn_player(
    mut commands: Commands,
    level: Option<Res<CurrentLevel>>,
    tunables: Res<Tunables>,
    mut directory: ResMut<CombatDirectory>,
) {
    let start = level.map_or(Vec3::ZERO, |l| l.player_start) + Vec3::Y * BODY_CENTER;
    let aim = Vec3::Y * CHEST;

    let e = commands
        .spawn((
            Name::new("Player"),
            (Player, Faction::Player, PlayerView::default()),
            (
                Health::new(tunables.player_max_health),
                Life::Alive,
                PlayerWeapon::new(&tunables),
                AimPoint(aim),
            ),
            Transform::from_translation(start),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::capsule(BODY_RADIUS, BODY_LENGTH),
                LockedAxes::ROTATION_LOCKED.lock_translation_y(),
                Friction::ZERO,
                CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]),
                LinearVelocity::ZERO,
                TranslationInterpolation,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    directory.register(
        e,
        Faction::Player,
        start + aim,
        tunables.player_max_health,
        tunables.player_hit_radius,
    );
    info!("player spawned at {start}");
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    time: Res<Time>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    if let Some(keys) = keys {
        let mut axis = Vec2::ZERO;
        if keys.pressed(KeyCode::KeyW) {
            axis.y += 1.0;
        }
        if keys.pressed(KeyCode::KeyS) {
            axis.y -= 1.0;
        }
        if keys.pressed(KeyCode::KeyA) {
            axis.x -= 1.0;
        }
        if keys.pressed(KeyCode::KeyD) {
            axis.x += 1.0;
        }
        input.move_axis = axis.normalize_or_zero();

        let turn = KEY_TURN_SPEED * time.delta_secs();
        if keys.pressed(KeyCode::ArrowLeft) {
            input.look_delta.x -= turn;
        }
        if keys.pressed(KeyCode::ArrowRight) {
            input.look_delta.x += turn;
        }
        input.fire |= keys.pressed(KeyCode::Space);
        input.reload = keys.just_pressed(KeyCode::KeyR);
        input.kill_all = keys.just_pressed(KeyCode::KeyK);
    }

    if let Some(buttons) = buttons {
        input.fire |= buttons.pressed(MouseButton::Left);
    }
    if let Some(motion) = motion {
        input.look_delta += motion.delta * MOUSE_SENSITIVITY;
    }
}

fn apply_look(input: Res<PlayerInput>, mut q: Query<(&mut PlayerView, &mut Transform, &Life), With<Player>>) {
    let Ok((mut view, mut tf, life)) = q.single_mut() else {
        return;
    };
    if !life.is_alive() || input.look_delta == Vec2::ZERO {
        return;
    }
    view.turn(input.look_delta);
    tf.rotation = Quat::from_rotation_y(view.yaw);
}

/// Translate held buttons into weapon intents from the eye, along the view.
fn emit_intents(
    input: Res<PlayerInput>,
    tunables: Res<Tunables>,
    q: Query<(&Transform, &PlayerView), With<Player>>,
    mut fire: MessageWriter<FireIntent>,
    mut reload: MessageWriter<ReloadIntent>,
) {
    let Ok((tf, view)) = q.single() else {
        return;
    };
    if input.reload {
        reload.write(ReloadIntent);
    }
    if input.fire {
        fire.write(FireIntent {
            origin: tf.translation + Vec3::Y * tunables.eye_height,
            direction: view.forward(),
        });
    }
}

/// Debug trigger: kill every live enemy.
fn debug_kill_all(input: Res<PlayerInput>, directory: Res<CombatDirectory>, mut kills: MessageWriter<KillRequest>) {
    if !input.kill_all {
        return;
    }
    let enemies = directory.query_live_enemies();
    info!("debug: killing {} enemies", enemies.len());
    for enemy in enemies {
        kills.write(KillRequest { target: enemy.entity });
    }
}

pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&PlayerView, &Life, &mut LinearVelocity), With<Player>>,
) {
    let Ok((view, life, mut vel)) = q_player.single_mut() else {
        return;
    };
    if !life.is_alive() {
        vel.0 = Vec3::ZERO;
        return;
    }
    let yaw = Quat::from_rotation_y(view.yaw);
    let wish = yaw * Vec3::new(input.move_axis.x, 0.0, -input.move_axis.y);
    vel.0 = wish * tunables.player_speed;
}

pub fn on_player_died(mut died: MessageReader<EntityDied>, mut next: ResMut<NextState<GameState>>) {
    for ev in died.read() {
        if ev.faction == Faction::Player {
            info!("game over");
            next.set(GameState::GameOver);
        }
    }
}

fn restart_on_key(keys: Option<Res<ButtonInput<KeyCode>>>, mut next: ResMut<NextState<GameState>>) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::Enter)) {
        next.set(GameState::Loading);
    }
}

fn clear_input(mut input: ResMut<PlayerInput>) {
    *input = PlayerInput::default();
}
