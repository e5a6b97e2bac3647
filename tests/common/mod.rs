//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime, with a fixed 16 ms frame so runs
//!   are deterministic;
//! - `maze_shooter::game::configure_headless` installs the gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use maze_shooter::common::state::GameState;

pub const FRAME: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so the physics backend finds its stores.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.init_asset::<Mesh>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    maze_shooter::game::configure_headless(&mut app);
    // `App::run` normally does this; plugins like avian insert resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Tick until `target` is the current state. Panics after `max_frames`.
pub fn run_until_state(app: &mut App, target: GameState, max_frames: usize) {
    for _ in 0..max_frames {
        if state(app) == target {
            return;
        }
        app.update();
    }
    assert_eq!(state(app), target, "state not reached in {max_frames} frames");
}

pub fn run_frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Frames needed to cover `secs` of simulation time.
pub fn frames_for(secs: f32) -> usize {
    (secs / FRAME.as_secs_f32()).ceil() as usize + 2
}
