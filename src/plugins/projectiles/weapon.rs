//! Player weapon: turns fire/reload intents into bullet requests.
//!
//! Cooldowns and reloads are measured on `SimClock`, so a stalled frame never grants
//! extra shots.

use bevy::prelude::*;

use crate::common::clock::SimClock;
use crate::common::tunables::Tunables;
use crate::plugins::combat::lifecycle::Life;
use crate::plugins::combat::messages::{CombatFeedback, SoundCue};

use super::messages::{BulletKind, FireIntent, ReloadIntent, SpawnBulletRequest};

#[derive(Component, Debug, Clone)]
pub struct PlayerWeapon {
    pub damage: u32,
    pub bullet_speed: f32,
    pub fire_interval: f32,
    pub magazine: u32,
    pub ammo: u32,
    pub reload_secs: f32,
    /// Sim time at which the running reload completes.
    pub reload_until: Option<f64>,
    pub next_shot_at: f64,
}

impl PlayerWeapon {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            damage: tunables.weapon_damage,
            bullet_speed: tunables.weapon_bullet_speed,
            fire_interval: tunables.weapon_fire_interval,
            magazine: tunables.weapon_magazine,
            ammo: tunables.weapon_magazine,
            reload_secs: tunables.weapon_reload_secs,
            reload_until: None,
            next_shot_at: 0.0,
        }
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reload_until.is_some()
    }

    /// Complete a due reload. Returns `true` on the tick the magazine refills.
    pub fn finish_reload(&mut self, now: f64) -> bool {
        match self.reload_until {
            Some(until) if now >= until => {
                self.reload_until = None;
                self.ammo = self.magazine;
                true
            }
            _ => false,
        }
    }

    /// Begin a reload. No-op while reloading or with a full magazine.
    pub fn start_reload(&mut self, now: f64) -> bool {
        if self.is_reloading() || self.ammo >= self.magazine {
            return false;
        }
        self.reload_until = Some(now + self.reload_secs as f64);
        true
    }

    /// Consume one round if the weapon is ready.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.is_reloading() || now < self.next_shot_at || self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        self.next_shot_at = now + self.fire_interval as f64;
        true
    }
}

pub fn handle_player_weapon(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut fire: MessageReader<FireIntent>,
    mut reload: MessageReader<ReloadIntent>,
    mut weapons: Query<(Entity, &mut PlayerWeapon, &Life)>,
    mut requests: MessageWriter<SpawnBulletRequest>,
    mut feedback: MessageWriter<CombatFeedback>,
) {
    let now = clock.now();
    let Ok((owner, mut weapon, life)) = weapons.single_mut() else {
        fire.clear();
        reload.clear();
        return;
    };
    if !life.is_alive() {
        fire.clear();
        reload.clear();
        return;
    }

    if weapon.finish_reload(now) {
        info!("reloaded: {} rounds", weapon.ammo);
    }

    if reload.read().count() > 0 && weapon.start_reload(now) {
        feedback.write(CombatFeedback::Sound(SoundCue::Reload));
    }

    for intent in fire.read() {
        if !weapon.try_fire(now) {
            continue;
        }
        let direction = intent.direction.normalize_or(Vec3::NEG_Z);
        requests.write(SpawnBulletRequest {
            kind: BulletKind::Player,
            origin: intent.origin + direction * tunables.muzzle_offset,
            direction,
            speed: weapon.bullet_speed,
            damage: weapon.damage,
            owner: Some(owner),
        });
        feedback.write(CombatFeedback::Sound(SoundCue::Gunshot));

        if weapon.ammo == 0 && weapon.start_reload(now) {
            feedback.write(CombatFeedback::Sound(SoundCue::Reload));
        }
    }
}
