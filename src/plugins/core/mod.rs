//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::rng::CombatRng;
use crate::common::tunables::Tunables;
use crate::common::visuals::init_visuals;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(CombatRng::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.add_systems(Startup, init_visuals);
}

#[cfg(test)]
mod tests;
