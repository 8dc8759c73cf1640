use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Axis of a hallway, and the plane a door swings across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Structural shape of a wall cell. Only affects how the wall is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WallKind {
    TopLeft,
    TopRight,
    BotLeft,
    BotRight,
    Vertical,
    Horizontal,
    /// Vertical wall with a branch leaving to the left.
    InterLeft,
    /// Vertical wall with a branch leaving to the right.
    InterRight,
    /// Horizontal wall with a branch leaving upward.
    InterTop,
    /// Horizontal wall with a branch leaving downward.
    InterBot,
}

impl WallKind {
    pub fn glyph(self) -> char {
        match self {
            WallKind::TopLeft => '┌',
            WallKind::TopRight => '┐',
            WallKind::BotLeft => '└',
            WallKind::BotRight => '┘',
            WallKind::Vertical => '│',
            WallKind::Horizontal => '─',
            WallKind::InterLeft => '┤',
            WallKind::InterRight => '├',
            WallKind::InterTop => '┴',
            WallKind::InterBot => '┬',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Door {
    pub orientation: Orientation,
    pub is_open: bool,
}

impl Door {
    pub fn closed(orientation: Orientation) -> Self {
        Self { orientation, is_open: false }
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall(WallKind),
    Door(Door),
}

impl Tile {
    pub fn wall(kind: WallKind) -> Self {
        Tile::Wall(kind)
    }

    pub fn closed_door(orientation: Orientation) -> Self {
        Tile::Door(Door::closed(orientation))
    }

    /// Whether the cell blocks movement.
    pub fn is_solid(&self) -> bool {
        match self {
            Tile::Empty => false,
            Tile::Wall(_) => true,
            Tile::Door(door) => !door.is_open,
        }
    }

    /// Runs the cell's interaction hook. Doors flip open/closed on every call;
    /// floor and walls ignore it.
    pub fn execute_behaviour(&mut self) {
        match self {
            Tile::Empty | Tile::Wall(_) => {}
            Tile::Door(door) => door.toggle(),
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall(kind) => kind.glyph(),
            Tile::Door(Door { is_open: false, .. }) => '+',
            Tile::Door(Door { is_open: true, .. }) => '\'',
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Tile::Empty => "floor",
            Tile::Wall(_) => "wall",
            Tile::Door(Door { is_open: false, .. }) => "closed door",
            Tile::Door(Door { is_open: true, .. }) => "open door",
        }
    }
}
