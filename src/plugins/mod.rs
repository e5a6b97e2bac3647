//! Feature plugins.
//!
//! Gameplay plugins are order-sensitive only through `CombatSystems`; registration
//! order below just keeps resources initialized before the plugins that read them.

use bevy::prelude::*;

pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod level;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    combat::plugin(app);
    level::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    effects::plugin(app);
}

/// Register render-only plugins (needs DefaultPlugins for cameras and lights).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
