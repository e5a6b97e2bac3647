//! Level loading.
//!
//! `GameState::Loading` parses and validates the selected level. A valid level is
//! inserted as [`CurrentLevel`] and the game moves to `InGame`, where the world,
//! player and enemy plugins spawn from it. Any configuration error stops here: it is
//! logged, kept in [`LoadFailure`] and the game moves to `LoadFailed` without
//! spawning anything.

pub mod definition;
pub mod error;

use std::path::PathBuf;

use bevy::prelude::*;

use crate::common::state::GameState;

pub use definition::{CurrentLevel, EnemySpawn, LevelDefinition};
pub use error::LevelError;

/// Environment variable naming a level file to load instead of the built-in one.
pub const LEVEL_ENV: &str = "MAZE_SHOOTER_LEVEL";

const DEFAULT_LEVEL: &str = include_str!("default_level.ron");

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelSource {
    #[default]
    Embedded,
    File(PathBuf),
    /// RON text supplied directly (tools and tests).
    Inline(String),
}

impl LevelSource {
    pub fn from_env() -> Self {
        match std::env::var_os(LEVEL_ENV) {
            Some(path) if !path.is_empty() => LevelSource::File(PathBuf::from(path)),
            _ => LevelSource::Embedded,
        }
    }

    pub fn load(&self) -> Result<CurrentLevel, LevelError> {
        let definition = match self {
            LevelSource::Embedded => LevelDefinition::from_ron(DEFAULT_LEVEL)?,
            LevelSource::Inline(text) => LevelDefinition::from_ron(text)?,
            LevelSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
                    path: path.clone(),
                    source,
                })?;
                LevelDefinition::from_ron(&text)?
            }
        };
        definition.validate()
    }
}

/// Why the last load failed, for whoever presents it.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure(pub String);

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelSource>()
        .add_systems(OnEnter(GameState::Loading), load_level);
}

pub fn load_level(
    mut commands: Commands,
    source: Res<LevelSource>,
    mut next: ResMut<NextState<GameState>>,
) {
    match source.load() {
        Ok(level) => {
            info!(
                "level {:?} loaded: {}x{} cells, {} wall boxes, {} enemies",
                level.name,
                level.columns,
                level.rows,
                level.walls.len(),
                level.enemies.len()
            );
            commands.remove_resource::<LoadFailure>();
            commands.insert_resource(level);
            next.set(GameState::InGame);
        }
        Err(err) => {
            error!("level failed to load: {err}");
            commands.remove_resource::<CurrentLevel>();
            commands.insert_resource(LoadFailure(err.to_string()));
            next.set(GameState::LoadFailed);
        }
    }
}
