//! Combat messages.
//!
//! Gameplay outcomes (`EntityDied`) and cosmetic intent (`CombatFeedback`) travel as
//! messages so the code that decides them never touches presentation state.

use bevy::prelude::*;

use super::components::Faction;

/// Written exactly once per entity, by the call that performed the death transition.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub faction: Faction,
    pub position: Vec3,
}

/// Explicit kill, bypassing health (debug trigger, scripted deaths).
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillRequest {
    pub target: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Gunshot,
    Reload,
    EnemyHit,
    EnemyDeath,
    PlayerHurt,
    PlayerDeath,
    WallImpact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Wall,
    Floor,
}

/// Fire-and-forget presentation intent.
///
/// Consumers may drop any of these (missing renderer, particle budget exhausted)
/// without affecting the simulation.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum CombatFeedback {
    HitFlash { target: Entity },
    Blood { at: Vec3, direction: Vec3, count: u8 },
    Impact { at: Vec3, normal: Vec3, surface: Surface },
    CameraShake { intensity: f32 },
    Sound(SoundCue),
}
