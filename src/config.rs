use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::engine::entity::Spawn;
use crate::error::ConfigError;
use crate::map::{
    generator::{Carve, default_layout},
    tile::Orientation,
};

/// The stock layout needs at least 40x18; the extra margin is open floor.
pub const DEFAULT_WIDTH: usize = 48;
pub const DEFAULT_HEIGHT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Input poll interval. Must be non-zero.
    pub tick_ms: u64,
    /// Minimum time between two player moves.
    pub move_cooldown_ms: u64,
    pub level: LevelConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 120,
            move_cooldown_ms: 90,
            level: LevelConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// A zero tick would make the input poll return immediately and spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.level.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolSpawn {
    pub x: i32,
    pub y: i32,
    pub axis: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    /// Carved in order; later steps overwrite earlier ones.
    pub layout: Vec<Carve>,
    pub player: Spawn,
    pub patrollers: Vec<PatrolSpawn>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            layout: default_layout(),
            player: Spawn { x: 8, y: 4 },
            patrollers: vec![PatrolSpawn { x: 30, y: 3, axis: Orientation::Horizontal }],
        }
    }
}

impl LevelConfig {
    /// Checks everything that can be checked before carving: grid size,
    /// that every layout step fits, and that every spawn is on the map.
    /// Spawns landing on solid tiles are caught when the level is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        for (index, step) in self.layout.iter().enumerate() {
            if !step.fits(width, height) {
                return Err(ConfigError::CarveOutOfBounds { index, step: *step, width, height });
            }
        }

        let on_map = |x: i32, y: i32| x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
        if !on_map(self.player.x, self.player.y) {
            return Err(ConfigError::SpawnOutOfBounds { who: "player", x: self.player.x, y: self.player.y });
        }
        for p in &self.patrollers {
            if !on_map(p.x, p.y) {
                return Err(ConfigError::SpawnOutOfBounds { who: "patroller", x: p.x, y: p.y });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        LevelConfig::default().validate().expect("default level validates");
    }

    #[test]
    fn zero_tick_is_rejected() {
        let err = GameConfig::from_toml_str("tick_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTick));

        let config = GameConfig { tick_ms: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
        assert!(GameConfig::from_toml_str("tick_ms = 1").is_ok());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn parses_custom_layout() {
        let text = r#"
            tick_ms = 30

            [level]
            width = 12
            height = 7
            player = { x = 2, y = 3 }
            patrollers = []

            [[level.layout]]
            kind = "room"
            x = 0
            y = 0
            width = 6
            height = 7

            [[level.layout]]
            kind = "hallway"
            x = 5
            y = 3
            length = 5
            doors = true
            orientation = "horizontal"
        "#;
        let config = GameConfig::from_toml_str(text).expect("custom config");
        assert_eq!(config.tick_ms, 30);
        assert_eq!(config.move_cooldown_ms, 90);
        assert_eq!(config.level.layout, vec![
            Carve::Room { x: 0, y: 0, width: 6, height: 7 },
            Carve::Hallway { x: 5, y: 3, length: 5, doors: true, orientation: Orientation::Horizontal },
        ]);
        assert!(config.level.patrollers.is_empty());
    }

    #[test]
    fn rejects_out_of_bounds_step() {
        let text = r#"
            [level]
            width = 10
            height = 10
            layout = [{ kind = "room", x = 5, y = 0, width = 6, height = 4 }]
        "#;
        let err = GameConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::CarveOutOfBounds { index: 0, .. }), "{err}");
    }

    #[test]
    fn rejects_hallway_without_flank_room() {
        let level = LevelConfig {
            width: 10,
            height: 10,
            layout: vec![Carve::Hallway { x: 0, y: 2, length: 4, doors: false, orientation: Orientation::Vertical }],
            player: Spawn { x: 5, y: 5 },
            patrollers: vec![],
        };
        assert!(matches!(level.validate(), Err(ConfigError::CarveOutOfBounds { .. })));
    }

    #[test]
    fn rejects_zero_sized_grid() {
        let level = LevelConfig { width: 0, ..LevelConfig::default() };
        assert!(matches!(level.validate(), Err(ConfigError::EmptyGrid { width: 0, .. })));
    }

    #[test]
    fn rejects_spawn_off_map() {
        let level = LevelConfig { player: Spawn { x: -1, y: 2 }, ..LevelConfig::default() };
        assert!(matches!(
            level.validate(),
            Err(ConfigError::SpawnOutOfBounds { who: "player", x: -1, y: 2 })
        ));

        let level = LevelConfig {
            patrollers: vec![PatrolSpawn { x: 0, y: 99, axis: Orientation::Vertical }],
            ..LevelConfig::default()
        };
        assert!(matches!(level.validate(), Err(ConfigError::SpawnOutOfBounds { who: "patroller", .. })));
    }

    #[test]
    fn default_config_survives_toml() {
        let text = GameConfig::default().to_toml_string().expect("serialize");
        let back = GameConfig::from_toml_str(&text).expect("reparse");
        assert_eq!(back, GameConfig::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "move_cooldown_ms = 0").expect("write");
        let config = GameConfig::load(file.path()).expect("load");
        assert_eq!(config.move_cooldown_ms, 0);
        assert_eq!(config.level, LevelConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.toml");
        let err = GameConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
