//! Enemy tiers.
//!
//! All enemies share one behaviour; tiers differ only by the constants below.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Grunt,
    Soldier,
    Heavy,
}

/// Per-enemy tuning, copied from the tier table at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: u32,
    /// Units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub damage: u32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Seconds of simulation time between shots.
    pub shoot_interval: f32,
    /// 1.0 fires dead straight; lower values widen the aim jitter.
    pub accuracy: f32,
    pub bullet_speed: f32,
    pub scale: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Grunt, EnemyKind::Soldier, EnemyKind::Heavy];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Grunt => EnemyStats {
                max_health: 30,
                move_speed: 2.0,
                rotation_speed: 3.0,
                damage: 5,
                detection_range: 20.0,
                attack_range: 12.0,
                shoot_interval: 2.0,
                accuracy: 0.6,
                bullet_speed: 18.0,
                scale: 1.0,
            },
            EnemyKind::Soldier => EnemyStats {
                max_health: 60,
                move_speed: 2.6,
                rotation_speed: 3.5,
                damage: 10,
                detection_range: 25.0,
                attack_range: 15.0,
                shoot_interval: 1.5,
                accuracy: 0.75,
                bullet_speed: 22.0,
                scale: 1.15,
            },
            EnemyKind::Heavy => EnemyStats {
                max_health: 150,
                move_speed: 1.5,
                rotation_speed: 2.0,
                damage: 20,
                detection_range: 30.0,
                attack_range: 18.0,
                shoot_interval: 1.0,
                accuracy: 0.85,
                bullet_speed: 26.0,
                scale: 1.5,
            },
        }
    }

    /// Index into tier-ordered tables (tints, etc).
    pub fn tier(self) -> usize {
        match self {
            EnemyKind::Grunt => 0,
            EnemyKind::Soldier => 1,
            EnemyKind::Heavy => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Grunt => "grunt",
            EnemyKind::Soldier => "soldier",
            EnemyKind::Heavy => "heavy",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnemyKind(pub String);

impl FromStr for EnemyKind {
    type Err = UnknownEnemyKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EnemyKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| UnknownEnemyKind(s.to_owned()))
    }
}
