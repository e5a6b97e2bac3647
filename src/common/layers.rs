//! Collision layers for the physics collaborator.
//!
//! Bullets never enter the physics world; these layers only govern how the
//! player body, enemy bodies and walls block each other.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
}
