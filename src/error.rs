use std::path::PathBuf;

use thiserror::Error;

use crate::map::generator::Carve;

/// Problems found while loading or checking a [`crate::config::GameConfig`].
/// Anything that passes validation can be carved without going out of range.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("layout step {index} ({step:?}) does not fit in a {width}x{height} grid")]
    CarveOutOfBounds {
        index: usize,
        step: Carve,
        width: usize,
        height: usize,
    },

    #[error("{who} spawn ({x}, {y}) is outside the map")]
    SpawnOutOfBounds { who: &'static str, x: i32, y: i32 },

    #[error("{who} spawn ({x}, {y}) is inside a solid tile")]
    SpawnBlocked { who: &'static str, x: i32, y: i32 },
}

/// Failure while running the interactive session.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
