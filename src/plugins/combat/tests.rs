//! Combat core tests: geometry, lifecycle idempotence, directory semantics and the
//! damage pipeline.

use bevy::prelude::*;

use super::components::{Faction, Health};
use super::damage::{resolve_damage, DamageOutcome, DamageResolver, Hit};
use super::directory::CombatDirectory;
use super::lifecycle::{self, Life, PendingDespawn, TeardownQueue};
use super::messages::{CombatFeedback, EntityDied, KillRequest, SoundCue};
use super::spatial::{self, Aabb, WallSet};
use crate::common::test_utils::{combat_world, drain_messages, run_system_once, tick_clock};

fn spawn_enemy(world: &mut World, hp: u32, at: Vec3) -> Entity {
    let e = world
        .spawn((Faction::Enemy, Health::new(hp), Life::Alive, Transform::from_translation(at)))
        .id();
    world
        .resource_mut::<CombatDirectory>()
        .register(e, Faction::Enemy, at, hp, 1.0);
    e
}

// -----------------------------------------------------------------------------
// Spatial
// -----------------------------------------------------------------------------

#[test]
fn swept_test_catches_fast_bullet_through_thin_wall() {
    // 20 u/s at 30 ticks/s is ~0.67 u per tick against a 0.3 u wall.
    let mut walls = WallSet::default();
    walls.add(Aabb::from_center_size(Vec3::new(0.0, 1.0, 5.0), Vec3::new(4.0, 2.0, 0.3)));

    let dt = 1.0 / 30.0;
    let dir = Vec3::Z;
    let speed = 20.0;

    // Tick boundaries straddle the wall: neither endpoint is inside it.
    let from = Vec3::new(0.0, 1.0, 4.8);
    let to = from + dir * speed * dt;
    assert!(to.z > 5.15, "endpoint must already be past the wall");
    assert!(!walls.iter().any(|w| w.bounds.contains(from) || w.bounds.contains(to)));

    let hit = spatial::sweep_walls(&walls, from, to).expect("swept test must register the wall");
    assert!((hit.point.z - 4.85).abs() < 1e-4);
    assert_eq!(hit.normal, Vec3::NEG_Z);
}

#[test]
fn sweep_returns_nearest_wall() {
    let mut walls = WallSet::default();
    let far = walls.add(Aabb::from_center_size(Vec3::new(0.0, 0.0, 8.0), Vec3::ONE));
    let near = walls.add(Aabb::from_center_size(Vec3::new(0.0, 0.0, 3.0), Vec3::ONE));

    let hit = spatial::sweep_walls(&walls, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap();
    assert_eq!(hit.wall, near);
    assert_ne!(hit.wall, far);
}

#[test]
fn sweep_misses_parallel_segment() {
    let mut walls = WallSet::default();
    walls.add(Aabb::from_center_size(Vec3::new(0.0, 0.0, 3.0), Vec3::ONE));
    assert!(spatial::sweep_walls(&walls, Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 6.0)).is_none());
}

#[test]
fn segment_starting_inside_wall_hits_immediately() {
    let b = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
    let (t, n) = b.segment_entry(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)).unwrap();
    assert_eq!(t, 0.0);
    assert_eq!(n, Vec3::NEG_X);
}

#[test]
fn wall_set_remove_is_idempotent() {
    let mut walls = WallSet::default();
    let id = walls.add(Aabb::from_center_size(Vec3::ZERO, Vec3::ONE));
    assert!(walls.remove(id));
    assert!(!walls.remove(id));
    assert!(walls.is_empty());
}

#[test]
fn push_out_clears_the_nearest_face() {
    let mut walls = WallSet::default();
    walls.add(Aabb::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0)));

    let start = Vec3::new(1.2, 0.0, 0.0);
    let pushed = spatial::push_out_of_walls(start, 0.45, &walls, 0.05);
    assert!((pushed.x - 1.5).abs() < 1e-5, "{pushed}");
    assert_eq!(pushed.z, 0.0);
    assert!(!walls.iter().any(|w| w.bounds.overlaps_circle_xz(pushed, 0.45)));

    // Clear of the wall: untouched.
    let clear = Vec3::new(3.0, 0.0, 0.0);
    assert_eq!(spatial::push_out_of_walls(clear, 0.45, &walls, 0.05), clear);
}

#[test]
fn push_out_of_a_long_box_is_perpendicular_near_its_end() {
    // A merged run of five 4-unit wall cells: x 4..24, z 8..12.
    let mut walls = WallSet::default();
    walls.add(Aabb::new(Vec3::new(4.0, 0.0, 8.0), Vec3::new(24.0, 3.0, 12.0)));

    let touching = Vec3::new(20.0, 0.9, 7.7);
    let pushed = spatial::push_out_of_walls(touching, 0.45, &walls, 0.05);
    assert!((pushed.x - 20.0).abs() < 1e-5, "no slide along the wall: {pushed}");
    assert!((pushed.z - 7.5).abs() < 1e-5, "{pushed}");
}

#[test]
fn push_out_from_inside_uses_the_shallowest_face() {
    let wall = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 3.0, 4.0));
    let push = wall
        .circle_exit_xz(Vec3::new(3.8, 0.0, 2.0), 0.45, 0.05)
        .expect("overlapping");
    assert!((push - Vec3::new(0.7, 0.0, 0.0)).length() < 1e-5, "{push}");
    assert_eq!(wall.circle_exit_xz(Vec3::new(4.5, 0.0, 2.0), 0.45, 0.05), None);
}

#[test]
fn sphere_hit_uses_travelled_segment() {
    let center = Vec3::new(0.0, 0.0, 5.0);
    assert!(spatial::sphere_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), center, 0.5));
    assert!(!spatial::sphere_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), center, 0.5));
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

#[test]
fn mark_dead_is_one_way_and_idempotent() {
    let mut life = Life::Alive;
    assert!(life.mark_dead(1.0));
    assert!(!life.mark_dead(2.0));
    assert_eq!(life, Life::Dead { at: 1.0 });
    assert!(!life.is_alive());
}

#[test]
fn teardown_queue_orders_by_due_time_then_schedule_order() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let c = world.spawn_empty().id();

    let mut q = TeardownQueue::default();
    assert!(q.schedule(a, 0.0, 2.0));
    assert!(q.schedule(b, 0.0, 1.0));
    assert!(q.schedule(c, 1.0, 0.0));
    assert!(!q.schedule(a, 0.5, 0.1), "second schedule is absorbed");

    assert!(q.take_due(0.5).is_empty());
    assert_eq!(q.take_due(1.0), vec![b, c]);
    assert_eq!(q.take_due(10.0), vec![a]);
    assert!(q.is_empty());
    assert!(!q.is_scheduled(a));
}

#[test]
fn due_teardown_unregisters_and_marks_for_despawn() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 10, Vec3::ZERO);
    world.resource_mut::<TeardownQueue>().schedule(e, 0.0, 0.5);

    tick_clock(&mut world, 0.25);
    run_system_once(&mut world, lifecycle::run_due_teardowns);
    assert!(world.resource::<CombatDirectory>().contains(e));

    tick_clock(&mut world, 0.25);
    run_system_once(&mut world, lifecycle::run_due_teardowns);
    assert!(!world.resource::<CombatDirectory>().contains(e));
    assert!(world.get::<PendingDespawn>(e).is_some());

    run_system_once(&mut world, lifecycle::despawn_marked);
    assert!(world.get_entity(e).is_err());
}

#[test]
fn teardown_of_unregistered_entity_aborts_silently() {
    let mut world = combat_world();
    let bystander = spawn_enemy(&mut world, 10, Vec3::X);
    let e = world.spawn(Transform::default()).id();

    world.resource_mut::<TeardownQueue>().schedule(e, 0.0, 0.0);
    run_system_once(&mut world, lifecycle::run_due_teardowns);

    assert!(world.get::<PendingDespawn>(e).is_none());
    assert!(world.resource::<CombatDirectory>().contains(bystander));
    assert_eq!(world.resource::<CombatDirectory>().len(), 1);
}

#[test]
fn teardown_of_already_despawned_entity_does_not_panic() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 10, Vec3::ZERO);
    world.despawn(e);

    world.resource_mut::<TeardownQueue>().schedule(e, 0.0, 0.0);
    run_system_once(&mut world, lifecycle::run_due_teardowns);
    run_system_once(&mut world, lifecycle::despawn_marked);

    assert!(!world.resource::<CombatDirectory>().contains(e));
}

// -----------------------------------------------------------------------------
// Directory
// -----------------------------------------------------------------------------

#[test]
fn register_and_unregister_are_idempotent() {
    let mut world = World::new();
    let e = world.spawn_empty().id();
    let mut dir = CombatDirectory::default();

    assert!(dir.register(e, Faction::Enemy, Vec3::ZERO, 10, 1.0));
    assert!(!dir.register(e, Faction::Enemy, Vec3::ONE, 99, 1.0));
    assert_eq!(dir.get(e).unwrap().health, 10);

    assert!(dir.unregister(e));
    assert!(!dir.unregister(e));
    assert!(dir.is_empty());
}

#[test]
fn live_enemies_are_returned_in_registration_order_without_dead_or_player() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let p = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let c = world.spawn_empty().id();

    let mut dir = CombatDirectory::default();
    dir.register(a, Faction::Enemy, Vec3::X, 10, 1.0);
    dir.register(p, Faction::Player, Vec3::Z, 100, 1.0);
    dir.register(b, Faction::Enemy, Vec3::Y, 10, 1.0);
    dir.register(c, Faction::Enemy, Vec3::ONE, 10, 1.0);
    dir.refresh(b, Vec3::Y, 0, false);

    let live: Vec<Entity> = dir.query_live_enemies().iter().map(|h| h.entity).collect();
    assert_eq!(live, vec![a, c]);
    assert_eq!(dir.player_position(), Some(Vec3::Z));

    dir.unregister(p);
    assert_eq!(dir.player_position(), None);
}

#[test]
fn sync_directory_applies_aim_offset_and_liveness() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 10, Vec3::ZERO);
    world.entity_mut(e).insert((
        Transform::from_xyz(3.0, 0.0, 4.0),
        super::components::AimPoint(Vec3::Y),
        Life::Dead { at: 0.0 },
    ));

    run_system_once(&mut world, super::directory::sync_directory);

    let entry = *world.resource::<CombatDirectory>().get(e).unwrap();
    assert_eq!(entry.position, Vec3::new(3.0, 1.0, 4.0));
    assert!(!entry.alive);
}

// -----------------------------------------------------------------------------
// Damage
// -----------------------------------------------------------------------------

#[test]
fn only_damage_and_kills_count_as_landed() {
    assert!(DamageOutcome::Damaged { remaining: 1 }.landed());
    assert!(DamageOutcome::Killed.landed());
    assert!(!DamageOutcome::Ignored.landed());
    assert!(!DamageOutcome::Missing.landed());
}

#[test]
fn resolve_damage_clamps_and_kills_once() {
    let mut world = World::new();
    let e = world.spawn_empty().id();
    let mut hp = Health::new(15);
    let mut life = Life::Alive;

    assert_eq!(resolve_damage(e, &mut hp, &mut life, 10, 0.0), DamageOutcome::Damaged { remaining: 5 });
    assert_eq!(resolve_damage(e, &mut hp, &mut life, 100, 0.0), DamageOutcome::Killed);
    assert_eq!(hp.current, 0);
    assert_eq!(resolve_damage(e, &mut hp, &mut life, 100, 0.0), DamageOutcome::Ignored);
    assert_eq!(hp.current, 0);
}

#[test]
fn three_simultaneous_hits_kill_once_and_emit_one_death() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 30, Vec3::ZERO);

    let outcomes = run_system_once(&mut world, move |mut resolver: DamageResolver| {
        (0..3)
            .map(|_| resolver.apply_damage(e, 10, Hit::at(Vec3::ZERO)))
            .collect::<Vec<_>>()
    });

    assert_eq!(
        outcomes,
        vec![
            DamageOutcome::Damaged { remaining: 20 },
            DamageOutcome::Damaged { remaining: 10 },
            DamageOutcome::Killed,
        ]
    );

    // Three more in the same tick: already dead, nothing changes.
    let late = run_system_once(&mut world, move |mut resolver: DamageResolver| {
        (0..3)
            .map(|_| resolver.apply_damage(e, 10, Hit::at(Vec3::ZERO)))
            .collect::<Vec<_>>()
    });
    assert!(late.iter().all(|o| *o == DamageOutcome::Ignored));

    let died = drain_messages::<EntityDied>(&mut world);
    assert_eq!(died.len(), 1);
    assert_eq!(died[0].entity, e);

    let death_cues = drain_messages::<CombatFeedback>(&mut world)
        .into_iter()
        .filter(|f| *f == CombatFeedback::Sound(SoundCue::EnemyDeath))
        .count();
    assert_eq!(death_cues, 1);
}

#[test]
fn single_overkill_hit_reaches_zero_on_first_application() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 30, Vec3::ZERO);

    let outcomes = run_system_once(&mut world, move |mut resolver: DamageResolver| {
        [
            resolver.apply_damage(e, 30, Hit::at(Vec3::ZERO)),
            resolver.apply_damage(e, 30, Hit::at(Vec3::ZERO)),
        ]
    });
    assert_eq!(outcomes, [DamageOutcome::Killed, DamageOutcome::Ignored]);
    assert_eq!(world.get::<Health>(e).unwrap().current, 0);
}

#[test]
fn dead_target_gets_no_feedback() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 10, Vec3::ZERO);
    world.entity_mut(e).insert(Life::Dead { at: 0.0 });

    run_system_once(&mut world, move |mut resolver: DamageResolver| {
        resolver.apply_damage(e, 5, Hit::at(Vec3::ZERO));
    });

    assert!(drain_messages::<CombatFeedback>(&mut world).is_empty());
    assert_eq!(world.get::<Health>(e).unwrap().current, 10);
}

#[test]
fn missing_target_is_a_noop() {
    let mut world = combat_world();
    let ghost = world.spawn_empty().id();
    world.despawn(ghost);

    let outcome = run_system_once(&mut world, move |mut resolver: DamageResolver| {
        resolver.apply_damage(ghost, 5, Hit::at(Vec3::ZERO))
    });
    assert_eq!(outcome, DamageOutcome::Missing);
    assert!(drain_messages::<EntityDied>(&mut world).is_empty());
}

#[test]
fn player_hurt_shakes_camera() {
    let mut world = combat_world();
    let p = world
        .spawn((Faction::Player, Health::new(100), Life::Alive, Transform::default()))
        .id();

    run_system_once(&mut world, move |mut resolver: DamageResolver| {
        resolver.apply_damage(p, 5, Hit::at(Vec3::ZERO));
    });

    let fb = drain_messages::<CombatFeedback>(&mut world);
    assert!(fb.iter().any(|f| matches!(f, CombatFeedback::CameraShake { intensity } if *intensity > 0.0)));
    assert!(fb.contains(&CombatFeedback::Sound(SoundCue::PlayerHurt)));
}

#[test]
fn kill_twice_equals_kill_once() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 50, Vec3::ZERO);

    world.write_message(KillRequest { target: e });
    world.write_message(KillRequest { target: e });
    run_system_once(&mut world, super::damage::process_kill_requests);

    assert!(!world.get::<Life>(e).unwrap().is_alive());
    assert_eq!(world.get::<Health>(e).unwrap().current, 0);
    assert_eq!(drain_messages::<EntityDied>(&mut world).len(), 1);
}

#[test]
fn heal_only_affects_live_targets_and_clamps() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 50, Vec3::ZERO);
    world.get_mut::<Health>(e).unwrap().current = 20;

    let restored = run_system_once(&mut world, move |mut resolver: DamageResolver| resolver.heal(e, 100));
    assert_eq!(restored, Some(30));
    assert_eq!(world.get::<Health>(e).unwrap().current, 50);

    world.entity_mut(e).insert(Life::Dead { at: 0.0 });
    let restored = run_system_once(&mut world, move |mut resolver: DamageResolver| resolver.heal(e, 10));
    assert_eq!(restored, None);
}

#[test]
fn health_never_increases_without_heal_randomized() {
    let mut world = combat_world();
    let e = spawn_enemy(&mut world, 500, Vec3::ZERO);

    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut prev = 500;
    let mut deaths = 0;
    for _ in 0..200 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let amount = (seed % 13) as u32;

        let outcome = run_system_once(&mut world, move |mut resolver: DamageResolver| {
            resolver.apply_damage(e, amount, Hit::at(Vec3::ZERO))
        });
        if outcome == DamageOutcome::Killed {
            deaths += 1;
        }

        let now = world.get::<Health>(e).unwrap().current;
        assert!(now <= prev);
        prev = now;
    }
    assert!(deaths <= 1);
    if prev == 0 {
        assert!(!world.get::<Life>(e).unwrap().is_alive());
    }
}
