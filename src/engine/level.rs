use tracing::{debug, info, trace};

use crate::config::{LevelConfig, PatrolSpawn};
use crate::engine::entity::{Character, Patroller, Player, Spawn};
use crate::error::ConfigError;
use crate::map::{
    Grid,
    generator::{Carve, carve_layout, default_layout},
};

/// One carved dungeon floor and everything standing on it.
///
/// `characters()[0]` is always the player; the rest are NPCs. Coordinates
/// passed to [`Level::check_collision`] and [`Level::interact`] are `(x, y)`
/// and must already be on the map.
#[derive(Debug, Clone)]
pub struct Level {
    map: Grid,
    characters: Vec<Character>,
}

impl Level {
    /// Builds the stock dungeon. The grid must be at least 40x18.
    pub fn new(width: usize, height: usize) -> Self {
        let defaults = LevelConfig::default();
        Self::build(width, height, &default_layout(), defaults.player, &defaults.patrollers)
    }

    pub fn from_config(config: &LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let level = Self::build(
            config.width,
            config.height,
            &config.layout,
            config.player,
            &config.patrollers,
        );

        for c in &level.characters {
            let (x, y) = c.position();
            if level.check_collision(x as usize, y as usize) {
                let who = match c {
                    Character::Player(_) => "player",
                    Character::Patroller(_) => "patroller",
                };
                return Err(ConfigError::SpawnBlocked { who, x, y });
            }
        }
        Ok(level)
    }

    fn build(
        width: usize,
        height: usize,
        layout: &[Carve],
        player: Spawn,
        patrollers: &[PatrolSpawn],
    ) -> Self {
        let mut map = Grid::new(width, height);
        carve_layout(&mut map, layout);

        let mut characters = Vec::with_capacity(1 + patrollers.len());
        characters.push(Character::Player(Player::new(player.x, player.y)));
        characters.extend(
            patrollers
                .iter()
                .map(|p| Character::Patroller(Patroller::new(p.x, p.y, p.axis))),
        );

        info!(
            width,
            height,
            steps = layout.len(),
            characters = characters.len(),
            "level built"
        );
        Self { map, characters }
    }

    pub fn width(&self) -> usize {
        self.map.width()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }

    pub fn map(&self) -> &Grid {
        &self.map
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn player(&self) -> &Player {
        match &self.characters[0] {
            Character::Player(p) => p,
            other => unreachable!("first character is a {}, not the player", other.name()),
        }
    }

    pub fn player_mut(&mut self) -> &mut Player {
        match &mut self.characters[0] {
            Character::Player(p) => p,
            other => unreachable!("first character is a {}, not the player", other.name()),
        }
    }

    /// Advances every NPC one step, in list order. The player at index 0 is
    /// skipped. An NPC never steps into a cell another character holds.
    pub fn update(&mut self) {
        for i in 1..self.characters.len() {
            let occupied: Vec<(i32, i32)> = self
                .characters
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| c.position())
                .collect();
            self.characters[i].update(&self.map, &occupied);
        }
    }

    pub fn check_collision(&self, x: usize, y: usize) -> bool {
        self.map.get(x, y).is_solid()
    }

    pub fn interact(&mut self, x: usize, y: usize) {
        let tile = self.map.get_mut(x, y);
        tile.execute_behaviour();
        trace!(x, y, now = tile.describe(), "interacted");
    }

    pub fn character_at(&self, x: i32, y: i32) -> Option<&Character> {
        self.characters.iter().find(|c| c.position() == (x, y))
    }

    /// Moves the player by `(dx, dy)` unless the target is off the map, solid,
    /// or taken by an NPC. Returns whether the player moved.
    pub fn try_move_player(&mut self, dx: i32, dy: i32) -> bool {
        let p = self.player();
        let (nx, ny) = (p.x + dx, p.y + dy);

        if !self.map.in_bounds(nx, ny) {
            debug!(nx, ny, "move off the map ignored");
            return false;
        }
        if self.check_collision(nx as usize, ny as usize) || self.character_at(nx, ny).is_some() {
            return false;
        }

        let p = self.player_mut();
        p.x = nx;
        p.y = ny;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tile::{Door, Orientation, Tile, WallKind};

    fn stock() -> Level {
        Level::new(40, 18)
    }

    #[test]
    fn junction_door_blocks_until_opened() {
        let mut level = stock();
        assert_eq!(level.map().get(6, 8), Tile::closed_door(Orientation::Horizontal));
        assert!(level.check_collision(6, 8));

        level.interact(6, 8);
        assert!(!level.check_collision(6, 8));
        assert_eq!(
            level.map().get(6, 8),
            Tile::Door(Door { orientation: Orientation::Horizontal, is_open: true })
        );

        level.interact(6, 8);
        assert!(level.check_collision(6, 8));
    }

    #[test]
    fn collision_uses_x_as_column() {
        let level = stock();
        // (x=2, y=4) is the west wall of the first room; (x=4, y=2) is its floor.
        assert_eq!(level.map().get(2, 4), Tile::wall(WallKind::Vertical));
        assert!(level.check_collision(2, 4));
        assert!(!level.check_collision(4, 2));
    }

    #[test]
    fn interact_on_wall_and_floor_changes_nothing() {
        let mut level = stock();
        let before = level.map().clone();
        level.interact(2, 4);
        level.interact(4, 4);
        assert_eq!(level.map(), &before);
    }

    #[test]
    fn sealed_hallway_opens_both_rooms() {
        let level = stock();
        assert_eq!(level.map().get(15, 3), Tile::Empty);
        assert_eq!(level.map().get(22, 3), Tile::Empty);
        assert_eq!(level.map().get(15, 2), Tile::wall(WallKind::BotLeft));
        assert_eq!(level.map().get(15, 4), Tile::wall(WallKind::TopLeft));
        assert_eq!(level.map().get(22, 2), Tile::wall(WallKind::BotRight));
        assert_eq!(level.map().get(22, 4), Tile::wall(WallKind::TopRight));
    }

    #[test]
    fn player_is_first_character() {
        let level = stock();
        assert_eq!(level.characters()[0], Character::Player(level.player().clone()));
        assert_eq!(level.characters().len(), 2);
        assert_eq!(level.width(), 40);
        assert_eq!(level.height(), 18);
    }

    #[test]
    fn update_moves_npcs_but_not_player() {
        let mut level = stock();
        let player_before = level.player().clone();
        let npc_before = level.characters()[1].position();

        level.update();

        assert_eq!(level.player(), &player_before);
        assert_ne!(level.characters()[1].position(), npc_before);
    }

    #[test]
    fn npc_turns_back_instead_of_stepping_on_player() {
        let mut level = stock();
        level.player_mut().x = 31;
        level.player_mut().y = 3;

        level.update();

        assert_eq!(level.characters()[1].position(), (30, 3));
        assert!(matches!(&level.characters()[1], Character::Patroller(n) if n.step == -1));
        assert_eq!(level.character_at(31, 3).map(Character::symbol), Some('@'));

        level.update();
        assert_eq!(level.characters()[1].position(), (29, 3));
    }

    #[test]
    fn long_run_never_stacks_characters() {
        let mut level = stock();
        level.player_mut().x = 34;
        level.player_mut().y = 3;
        for _ in 0..64 {
            level.update();
            let (px, py) = (level.player().x, level.player().y);
            assert_eq!((px, py), (34, 3));
            assert_ne!(level.characters()[1].position(), (px, py));
        }
    }

    #[test]
    fn player_cannot_walk_into_npc() {
        let mut level = stock();
        level.player_mut().x = 29;
        level.player_mut().y = 3;

        assert!(!level.try_move_player(1, 0));
        assert_eq!((level.player().x, level.player().y), (29, 3));
        assert!(level.try_move_player(0, 1));
    }

    #[test]
    fn player_moves_around_walls() {
        let mut level = stock();
        level.player_mut().x = 3;
        level.player_mut().y = 1;

        assert!(!level.try_move_player(-1, 0));
        assert!(!level.try_move_player(0, -1));
        assert!(level.try_move_player(1, 1));
        assert_eq!((level.player().x, level.player().y), (4, 2));
    }

    #[test]
    fn player_cannot_leave_map() {
        let mut level = stock();
        level.player_mut().x = 0;
        level.player_mut().y = 0;
        assert!(!level.try_move_player(-1, 0));
        assert!(!level.try_move_player(0, -1));
        assert_eq!((level.player().x, level.player().y), (0, 0));
    }

    #[test]
    fn from_config_rejects_spawn_in_wall() {
        let config = LevelConfig { player: Spawn { x: 2, y: 0 }, ..LevelConfig::default() };
        let err = Level::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::SpawnBlocked { who: "player", x: 2, y: 0 }));
    }

    #[test]
    fn from_config_matches_new_for_defaults() {
        let config = LevelConfig::default();
        let level = Level::from_config(&config).expect("default level");
        let stock = Level::new(config.width, config.height);
        assert_eq!(level.map(), stock.map());
        assert_eq!(level.characters(), stock.characters());
    }

    #[test]
    fn character_at_finds_npc() {
        let level = stock();
        assert_eq!(level.character_at(30, 3).map(Character::name), Some("patroller"));
        assert_eq!(level.character_at(8, 4).map(Character::symbol), Some('@'));
        assert!(level.character_at(0, 17).is_none());
    }
}
