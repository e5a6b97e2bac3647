//! Simulation clock.
//!
//! Every cooldown, age and deferred action in the combat core is measured
//! against this clock rather than wall-clock time. It advances exactly once
//! per tick, by the frame delta clamped to `Tunables::max_tick_dt`.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Resource, Debug, Clone, Default)]
pub struct SimClock {
    elapsed: f64,
    dt: f32,
    tick: u64,
}

impl SimClock {
    /// Advance by `raw_dt`, clamped to `[0, max_dt]`. Returns the applied step.
    pub fn advance(&mut self, raw_dt: f32, max_dt: f32) -> f32 {
        let dt = if raw_dt.is_finite() { raw_dt.clamp(0.0, max_dt) } else { 0.0 };
        self.dt = dt;
        self.elapsed += f64::from(dt);
        self.tick += 1;
        dt
    }

    /// Seconds of simulated time since the session started.
    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    /// Length of the current tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn advance_sim_clock(time: Res<Time>, tunables: Res<Tunables>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta_secs(), tunables.max_tick_dt);
}
