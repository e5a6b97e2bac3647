//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    /// Level data is parsed and validated here; nothing is spawned yet.
    #[default]
    Loading,
    InGame,
    /// A level configuration error stopped the level from starting.
    LoadFailed,
    GameOver,
}
