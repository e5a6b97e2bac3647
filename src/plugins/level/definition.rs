//! Level documents and their validated form.
//!
//! A level is authored as RON:
//! ```ron
//! (
//!     name: "Training",
//!     cell_size: 4.0,
//!     wall_height: 3.0,
//!     maze: [
//!         "#####",
//!         "#P..#",
//!         "#####",
//!     ],
//!     enemies: [
//!         (position: (10.0, 6.0), kind: "grunt", rotation: Some(1.57)),
//!     ],
//! )
//! ```
//! Maze cell `(row, col)` covers `x in [col, col + 1) * cell_size` and
//! `z in [row, row + 1) * cell_size`. Enemy positions are world `(x, z)`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plugins::combat::spatial::Aabb;
use crate::plugins::enemies::config::EnemyKind;

use super::error::LevelError;

pub const WALL: char = '#';
pub const FLOOR: char = '.';
pub const PLAYER_START: char = 'P';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub name: String,
    pub cell_size: f32,
    pub wall_height: f32,
    pub maze: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawnDef {
    pub position: (f32, f32),
    pub kind: String,
    /// Yaw in radians.
    #[serde(default)]
    pub rotation: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    /// On the floor (`y = 0`).
    pub position: Vec3,
    pub yaw: f32,
}

/// A validated level, ready to spawn.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CurrentLevel {
    pub name: String,
    pub cell_size: f32,
    pub wall_height: f32,
    pub columns: usize,
    pub rows: usize,
    /// Wall boxes, one per horizontal run of wall tiles.
    pub walls: Vec<Aabb>,
    /// On the floor (`y = 0`).
    pub player_start: Vec3,
    pub enemies: Vec<EnemySpawn>,
}

impl CurrentLevel {
    /// Extent of the maze on the ground plane.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.cell_size
    }

    pub fn center(&self) -> Vec3 {
        let s = self.size() * 0.5;
        Vec3::new(s.x, 0.0, s.y)
    }
}

impl LevelDefinition {
    pub fn from_ron(text: &str) -> Result<Self, LevelError> {
        Ok(ron::from_str(text)?)
    }

    pub fn validate(&self) -> Result<CurrentLevel, LevelError> {
        let cell = self.cell_size;
        if !(cell.is_finite() && cell > 0.0 && self.wall_height.is_finite() && self.wall_height > 0.0) {
            return Err(LevelError::InvalidCellSize);
        }

        let grid: Vec<Vec<char>> = self.maze.iter().map(|r| r.chars().collect()).collect();
        let columns = grid.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(LevelError::EmptyMaze);
        }

        let mut player_start = None;
        for (row, tiles) in grid.iter().enumerate() {
            if tiles.len() != columns {
                return Err(LevelError::RaggedMaze {
                    row,
                    expected: columns,
                    found: tiles.len(),
                });
            }
            for (col, &tile) in tiles.iter().enumerate() {
                match tile {
                    WALL | FLOOR => {}
                    PLAYER_START if player_start.is_some() => return Err(LevelError::MultiplePlayerStarts),
                    PLAYER_START => player_start = Some(cell_center(row, col, cell)),
                    _ => return Err(LevelError::UnknownTile { row, col, tile }),
                }
            }
        }
        let player_start = player_start.ok_or(LevelError::MissingPlayerStart)?;

        let mut enemies = Vec::with_capacity(self.enemies.len());
        for (index, def) in self.enemies.iter().enumerate() {
            let kind = def
                .kind
                .parse::<EnemyKind>()
                .map_err(|_| LevelError::UnknownEnemyKind {
                    index,
                    kind: def.kind.clone(),
                })?;

            let (x, z) = def.position;
            let yaw = def.rotation.unwrap_or(0.0);
            if !(x.is_finite() && z.is_finite() && yaw.is_finite()) {
                return Err(LevelError::NonFinitePosition { index });
            }

            let (col, row) = ((x / cell).floor(), (z / cell).floor());
            if col < 0.0 || row < 0.0 || col as usize >= columns || row as usize >= grid.len() {
                return Err(LevelError::SpawnOutOfBounds { index });
            }
            if grid[row as usize][col as usize] == WALL {
                return Err(LevelError::SpawnInsideWall { index });
            }

            enemies.push(EnemySpawn {
                kind,
                position: Vec3::new(x, 0.0, z),
                yaw,
            });
        }

        Ok(CurrentLevel {
            name: self.name.clone(),
            cell_size: cell,
            wall_height: self.wall_height,
            columns,
            rows: grid.len(),
            walls: merge_wall_runs(&grid, cell, self.wall_height),
            player_start,
            enemies,
        })
    }
}

#[inline]
fn cell_center(row: usize, col: usize, cell: f32) -> Vec3 {
    Vec3::new((col as f32 + 0.5) * cell, 0.0, (row as f32 + 0.5) * cell)
}

/// One box per horizontal run of wall tiles; fewer boxes to sweep every tick.
fn merge_wall_runs(grid: &[Vec<char>], cell: f32, height: f32) -> Vec<Aabb> {
    let mut out = Vec::new();
    for (row, tiles) in grid.iter().enumerate() {
        let mut col = 0;
        while col < tiles.len() {
            if tiles[col] != WALL {
                col += 1;
                continue;
            }
            let start = col;
            while col < tiles.len() && tiles[col] == WALL {
                col += 1;
            }
            out.push(Aabb::new(
                Vec3::new(start as f32 * cell, 0.0, row as f32 * cell),
                Vec3::new(col as f32 * cell, height, (row + 1) as f32 * cell),
            ));
        }
    }
    out
}
