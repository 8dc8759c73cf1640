use serde::{Deserialize, Serialize};

use crate::map::{Grid, tile::Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: i32,
    pub y: i32,
}

/// The player-controlled character. Driven by input, never by
/// [`crate::engine::level::Level::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// NPC that walks back and forth along one axis, turning around whenever the
/// next cell is solid, off the map, or taken by another character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patroller {
    pub x: i32,
    pub y: i32,
    pub axis: Orientation,
    pub step: i32,
    pub moves: u32,
}

impl Patroller {
    pub fn new(x: i32, y: i32, axis: Orientation) -> Self {
        Self { x, y, axis, step: 1, moves: 0 }
    }

    fn next_cell(&self) -> (i32, i32) {
        match self.axis {
            Orientation::Horizontal => (self.x + self.step, self.y),
            Orientation::Vertical => (self.x, self.y + self.step),
        }
    }

    pub fn update(&mut self, map: &Grid, occupied: &[(i32, i32)]) {
        let (nx, ny) = self.next_cell();
        if map.in_bounds(nx, ny)
            && !map.get(nx as usize, ny as usize).is_solid()
            && !occupied.contains(&(nx, ny))
        {
            self.x = nx;
            self.y = ny;
            self.moves += 1;
        } else {
            self.step = -self.step;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Character {
    Player(Player),
    Patroller(Patroller),
}

impl Character {
    pub fn position(&self) -> (i32, i32) {
        match self {
            Character::Player(p) => (p.x, p.y),
            Character::Patroller(n) => (n.x, n.y),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Character::Player(_) => '@',
            Character::Patroller(_) => 'p',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Character::Player(_) => "you",
            Character::Patroller(_) => "patroller",
        }
    }

    /// One simulation step for an NPC. `occupied` holds the cells of every
    /// other character. The player is moved by input only, so stepping it
    /// here is a bug in the caller.
    pub fn update(&mut self, map: &Grid, occupied: &[(i32, i32)]) {
        match self {
            Character::Player(_) => unreachable!("the player is moved by input, not by update"),
            Character::Patroller(n) => n.update(map, occupied),
        }
    }
}
