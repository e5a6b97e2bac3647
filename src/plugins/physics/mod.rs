//! Physics collaborator: walls, the player body and enemy bodies.
//!
//! Bullets are not simulated here; they are integrated and swept by the projectile
//! plugin.

use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    // Movement is planar; nothing falls.
    app.insert_resource(Gravity(Vec3::ZERO));
}
