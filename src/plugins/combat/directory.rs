//! Combat directory: who is alive, where they are, and what walls exist.
//!
//! This resource is how the projectile code finds "any enemy near this point" and
//! how enemies find the player, without either holding references into the other.
//! Its lifetime is one level session: it is filled on `OnEnter(InGame)` and
//! cleared on exit.
//!
//! Entries are refreshed from ECS components once at the start of every tick
//! (`sync_directory`). `query_live_enemies` therefore returns a snapshot that is
//! stable for the rest of the tick, in registration order.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::components::{AimPoint, Faction, Health};
use super::lifecycle::Life;
use super::spatial::WallSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectoryEntry {
    pub faction: Faction,
    pub position: Vec3,
    pub health: u32,
    pub alive: bool,
    /// Radius of the sphere used to test bullets against this entity.
    pub hit_radius: f32,
}

/// Snapshot of a live enemy for target searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHandle {
    pub entity: Entity,
    pub position: Vec3,
    pub hit_radius: f32,
}

#[derive(Resource, Debug, Default)]
pub struct CombatDirectory {
    entries: HashMap<Entity, DirectoryEntry>,
    order: Vec<Entity>,
    player: Option<Entity>,
    walls: WallSet,
}

impl CombatDirectory {
    /// Register an entity. Registering twice is a no-op; returns `false`.
    pub fn register(
        &mut self,
        entity: Entity,
        faction: Faction,
        position: Vec3,
        health: u32,
        hit_radius: f32,
    ) -> bool {
        if self.entries.contains_key(&entity) {
            return false;
        }
        self.entries.insert(
            entity,
            DirectoryEntry {
                faction,
                position,
                health,
                alive: health > 0,
                hit_radius,
            },
        );
        self.order.push(entity);
        if faction == Faction::Player {
            self.player = Some(entity);
        }
        true
    }

    /// Unregister an entity. Unregistering a non-member is a no-op; returns `false`.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        if self.entries.remove(&entity).is_none() {
            return false;
        }
        self.order.retain(|e| *e != entity);
        if self.player == Some(entity) {
            self.player = None;
        }
        true
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&DirectoryEntry> {
        self.entries.get(&entity)
    }

    /// Overwrite the cached state of a registered entity. Unknown entities are ignored.
    pub fn refresh(&mut self, entity: Entity, position: Vec3, health: u32, alive: bool) {
        if let Some(entry) = self.entries.get_mut(&entity) {
            entry.position = position;
            entry.health = health;
            entry.alive = alive;
        }
    }

    /// Live enemies in registration order.
    pub fn query_live_enemies(&self) -> Vec<EnemyHandle> {
        self.order
            .iter()
            .filter_map(|e| {
                let entry = self.entries.get(e)?;
                (entry.faction == Faction::Enemy && entry.alive).then_some(EnemyHandle {
                    entity: *e,
                    position: entry.position,
                    hit_radius: entry.hit_radius,
                })
            })
            .collect()
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Where enemies should aim. `None` while no player is registered.
    pub fn player_position(&self) -> Option<Vec3> {
        self.player_entry().map(|e| e.position)
    }

    pub fn player_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(&self.player?)
    }

    pub fn player_alive(&self) -> bool {
        self.player
            .and_then(|p| self.entries.get(&p))
            .is_some_and(|e| e.alive)
    }

    #[inline]
    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    /// Scene construction/teardown only. Never call this from a collision pass.
    #[inline]
    pub fn walls_mut(&mut self) -> &mut WallSet {
        &mut self.walls
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.player = None;
        self.walls.clear();
    }
}

/// Start-of-tick refresh of every registered entity from its components.
pub fn sync_directory(
    mut directory: ResMut<CombatDirectory>,
    q: Query<(Entity, &Transform, &Health, &Life, Option<&AimPoint>)>,
) {
    for (entity, tf, health, life, aim) in &q {
        let offset = aim.map_or(Vec3::ZERO, |a| a.0);
        directory.refresh(entity, tf.translation + offset, health.current, life.is_alive());
    }
}

/// Session boundary: forget every entity and wall.
pub fn clear_directory(mut directory: ResMut<CombatDirectory>) {
    directory.clear();
}
