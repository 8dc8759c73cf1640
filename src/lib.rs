//! A hand-laid dungeon floor built from typed wall, door and floor tiles,
//! with collision and interaction queries for a game loop to drive.

pub mod config;
pub mod engine;
pub mod error;
pub mod map;
pub mod tui;

pub use config::{GameConfig, LevelConfig};
pub use engine::level::Level;
pub use error::{ConfigError, RunError};
pub use map::{
    Grid,
    tile::{Door, Orientation, Tile, WallKind},
};
