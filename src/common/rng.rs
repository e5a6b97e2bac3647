//! Seeded RNG shared by aim jitter and particle spray.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Resource)]
pub struct CombatRng {
    pub rng: ChaCha8Rng,
}

impl CombatRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::new(42)
    }
}
