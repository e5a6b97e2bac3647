use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Behaviour state, re-evaluated every tick from the distance to the player.
///
/// `Dead` is terminal and only ever set by the death reaction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Idle,
    Pursuing,
    Attacking,
    Dead,
}

/// Facing around +Y, radians. Zero looks down -Z.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Heading(pub f32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct FireCooldown {
    /// Sim time from which the next shot is allowed.
    pub ready_at: f64,
}

/// Current limb swing angle in radians; limbs mirror it with opposite signs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkCycle {
    pub swing: f32,
}

/// Visual limb child. `side` is +1 or -1.
#[derive(Component, Debug, Clone, Copy)]
pub struct Limb {
    pub side: f32,
}

/// Death animation in progress.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathTopple {
    pub started_at: f64,
}

/// Per-enemy material, so a hit flash tints only the enemy that was hit.
#[derive(Component, Debug, Clone)]
pub struct EnemyMaterial {
    pub handle: Handle<StandardMaterial>,
    pub base: Color,
}
