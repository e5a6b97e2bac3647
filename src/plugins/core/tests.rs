use bevy::prelude::*;

use crate::common::rng::CombatRng;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::common::visuals::{init_visuals, CombatVisuals};
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<CombatRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn visuals_are_skipped_without_asset_stores() {
    let mut world = World::new();
    run_system_once(&mut world, init_visuals);
    assert!(world.get_resource::<CombatVisuals>().is_none());
}

#[test]
fn tunables_are_consistent() {
    let t = Tunables::default();
    assert!(t.max_tick_dt > 0.0 && t.max_tick_dt <= 0.1);
    assert!(t.enemy_hit_radius > t.enemy_body_radius, "hit test is more tolerant than the body");
    assert!(t.bullet_max_age > 0.0);
    assert!(t.weapon_magazine > 0);
}
