//! Damage resolution.
//!
//! [`DamageResolver`] is the only code that mutates `Health` or flips `Life` in response
//! to combat. Projectiles call `apply_damage` and nothing else; they never reach into
//! enemy internals.
//!
//! Rules:
//! - health is clamped at zero (`Health` is unsigned, subtraction saturates);
//! - the hit that takes health to zero performs the death transition exactly once,
//!   further hits in the same tick find a dead target and are ignored;
//! - a dead target produces no feedback at all, apart from the single death cue
//!   written by the killing call;
//! - feedback is fire-and-forget messages, never gameplay state.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::tunables::Tunables;

use super::components::{Faction, Health};
use super::directory::CombatDirectory;
use super::lifecycle::{mark_dead, Life};
use super::messages::{CombatFeedback, EntityDied, KillRequest, SoundCue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target no longer exists or was never a combat entity.
    Missing,
    /// Target is already dead.
    Ignored,
    Damaged { remaining: u32 },
    Killed,
}

impl DamageOutcome {
    #[inline]
    pub fn landed(self) -> bool {
        matches!(self, DamageOutcome::Damaged { .. } | DamageOutcome::Killed)
    }
}

/// Where and from which direction a hit arrived. Only used for feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    pub direction: Vec3,
}

impl Hit {
    pub fn at(point: Vec3) -> Self {
        Self {
            point,
            direction: Vec3::ZERO,
        }
    }
}

const BLOOD_ON_HIT: u8 = 6;
const BLOOD_ON_KILL: u8 = 18;

/// Core rule, separated from messaging so it can be tested on plain values.
pub fn resolve_damage(entity: Entity, health: &mut Health, life: &mut Life, amount: u32, now: f64) -> DamageOutcome {
    if !life.is_alive() {
        return DamageOutcome::Ignored;
    }
    health.take(amount);
    if !health.is_depleted() {
        return DamageOutcome::Damaged {
            remaining: health.current,
        };
    }
    if mark_dead(entity, life, now) {
        DamageOutcome::Killed
    } else {
        DamageOutcome::Ignored
    }
}

#[derive(SystemParam)]
pub struct DamageResolver<'w, 's> {
    targets: Query<'w, 's, (&'static mut Health, &'static mut Life, &'static Faction)>,
    directory: Res<'w, CombatDirectory>,
    clock: Res<'w, SimClock>,
    tunables: Res<'w, Tunables>,
    died: MessageWriter<'w, EntityDied>,
    feedback: MessageWriter<'w, CombatFeedback>,
}

impl DamageResolver<'_, '_> {
    pub fn apply_damage(&mut self, target: Entity, amount: u32, hit: Hit) -> DamageOutcome {
        let now = self.clock.now();
        let Ok((mut health, mut life, faction)) = self.targets.get_mut(target) else {
            debug!("damage to {target} dropped: not a combat entity");
            return DamageOutcome::Missing;
        };
        let faction = *faction;

        let outcome = resolve_damage(target, &mut health, &mut life, amount, now);
        match outcome {
            DamageOutcome::Damaged { .. } => self.hurt_feedback(target, faction, hit),
            DamageOutcome::Killed => self.on_death(target, faction, hit),
            DamageOutcome::Missing | DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// Kill regardless of health. Idempotent.
    pub fn kill(&mut self, target: Entity) -> DamageOutcome {
        let now = self.clock.now();
        let Ok((mut health, mut life, faction)) = self.targets.get_mut(target) else {
            return DamageOutcome::Missing;
        };
        let faction = *faction;

        if !mark_dead(target, &mut life, now) {
            return DamageOutcome::Ignored;
        }
        health.current = 0;

        let point = self.directory.get(target).map_or(Vec3::ZERO, |e| e.position);
        self.on_death(target, faction, Hit::at(point));
        DamageOutcome::Killed
    }

    /// Restore health of a live target. Returns the amount restored, `None` if the
    /// target is dead or missing.
    pub fn heal(&mut self, target: Entity, amount: u32) -> Option<u32> {
        let (mut health, life, _) = self.targets.get_mut(target).ok()?;
        if !life.is_alive() {
            return None;
        }
        Some(health.restore(amount))
    }

    /// Forward cosmetic feedback that is not tied to a damage outcome (impacts).
    pub fn cosmetic(&mut self, feedback: CombatFeedback) {
        self.feedback.write(feedback);
    }

    fn hurt_feedback(&mut self, target: Entity, faction: Faction, hit: Hit) {
        match faction {
            Faction::Enemy => {
                self.feedback.write(CombatFeedback::HitFlash { target });
                self.feedback.write(CombatFeedback::Blood {
                    at: hit.point,
                    direction: hit.direction,
                    count: BLOOD_ON_HIT,
                });
                self.feedback.write(CombatFeedback::Sound(SoundCue::EnemyHit));
            }
            Faction::Player => {
                self.feedback.write(CombatFeedback::CameraShake {
                    intensity: self.tunables.camera_shake_intensity,
                });
                self.feedback.write(CombatFeedback::Sound(SoundCue::PlayerHurt));
            }
        }
    }

    fn on_death(&mut self, target: Entity, faction: Faction, hit: Hit) {
        let position = self.directory.get(target).map_or(hit.point, |e| e.position);
        self.died.write(EntityDied {
            entity: target,
            faction,
            position,
        });

        match faction {
            Faction::Enemy => {
                info!("enemy {target} killed");
                self.feedback.write(CombatFeedback::HitFlash { target });
                self.feedback.write(CombatFeedback::Blood {
                    at: hit.point,
                    direction: hit.direction,
                    count: BLOOD_ON_KILL,
                });
                self.feedback.write(CombatFeedback::Sound(SoundCue::EnemyDeath));
            }
            Faction::Player => {
                info!("player killed");
                self.feedback.write(CombatFeedback::CameraShake {
                    intensity: self.tunables.camera_shake_intensity * 2.0,
                });
                self.feedback.write(CombatFeedback::Sound(SoundCue::PlayerDeath));
            }
        }
    }
}

/// Apply explicit kill requests.
pub fn process_kill_requests(mut requests: MessageReader<KillRequest>, mut resolver: DamageResolver) {
    for req in requests.read() {
        resolver.kill(req.target);
    }
}
