use std::path::PathBuf;

use thiserror::Error;

/// Authoring mistakes in a level definition. Fatal at load time: the level never starts.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("cell size and wall height must be finite and positive")]
    InvalidCellSize,
    #[error("maze has no rows")]
    EmptyMaze,
    #[error("maze row {row} has {found} tiles, expected {expected}")]
    RaggedMaze { row: usize, expected: usize, found: usize },
    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, tile: char },
    #[error("maze has no player start tile 'P'")]
    MissingPlayerStart,
    #[error("maze has more than one player start tile 'P'")]
    MultiplePlayerStarts,
    #[error("enemy #{index}: unknown kind {kind:?}")]
    UnknownEnemyKind { index: usize, kind: String },
    #[error("enemy #{index}: position or rotation is not finite")]
    NonFinitePosition { index: usize },
    #[error("enemy #{index}: spawn point lies outside the maze")]
    SpawnOutOfBounds { index: usize },
    #[error("enemy #{index}: spawn point lies inside a wall")]
    SpawnInsideWall { index: usize },
}
