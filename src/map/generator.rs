use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::map::{
    Grid,
    tile::{Orientation, Tile, WallKind},
};

/// One carving call. A layout is an ordered list of these; every call
/// overwrites whatever the previous ones left, so order is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Carve {
    Room {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    Hallway {
        x: usize,
        y: usize,
        length: usize,
        doors: bool,
        orientation: Orientation,
    },
}

impl Carve {
    pub fn apply(&self, map: &mut Grid) {
        match *self {
            Carve::Room { x, y, width, height } => carve_room(map, x, y, width, height),
            Carve::Hallway { x, y, length, doors, orientation } => {
                carve_hallway(map, x, y, length, doors, orientation)
            }
        }
    }

    /// True when every cell this step writes lies inside a `width` x `height`
    /// grid, hallway flanks included.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        match *self {
            Carve::Room { x, y, width: w, height: h } => {
                w >= 1 && h >= 1 && x + w <= width && y + h <= height
            }
            Carve::Hallway { x, y, length, orientation: Orientation::Horizontal, .. } => {
                length >= 1 && y >= 1 && y + 1 < height && x + length <= width
            }
            Carve::Hallway { x, y, length, orientation: Orientation::Vertical, .. } => {
                length >= 1 && x >= 1 && x + 1 < width && y + length <= height
            }
        }
    }
}

/// The stock dungeon: three rooms, an open passage between the two upper
/// rooms and a door-capped corridor down to the lower one.
pub fn default_layout() -> Vec<Carve> {
    vec![
        Carve::Room { x: 2, y: 0, width: 14, height: 9 },
        Carve::Room { x: 22, y: 1, width: 18, height: 6 },
        Carve::Room { x: 1, y: 12, width: 18, height: 6 },
        Carve::Hallway { x: 15, y: 3, length: 8, doors: false, orientation: Orientation::Horizontal },
        Carve::Hallway { x: 6, y: 8, length: 5, doors: true, orientation: Orientation::Vertical },
    ]
}

pub fn carve_layout(map: &mut Grid, layout: &[Carve]) {
    for step in layout {
        step.apply(map);
    }
}

/// Stamp the border ring of a room with its top-left corner at `(x, y)`.
/// Cells inside the ring are left as they are.
pub fn carve_room(map: &mut Grid, x: usize, y: usize, width: usize, height: usize) {
    debug!(x, y, width, height, "carving room");

    let right = x + width - 1;
    let bottom = y + height - 1;

    map.set(x, y, Tile::wall(WallKind::TopLeft));
    map.set(right, y, Tile::wall(WallKind::TopRight));
    map.set(x, bottom, Tile::wall(WallKind::BotLeft));
    map.set(right, bottom, Tile::wall(WallKind::BotRight));

    for row in (y + 1)..bottom {
        map.set(x, row, Tile::wall(WallKind::Vertical));
        map.set(right, row, Tile::wall(WallKind::Vertical));
    }
    for col in (x + 1)..right {
        map.set(col, y, Tile::wall(WallKind::Horizontal));
        map.set(col, bottom, Tile::wall(WallKind::Horizontal));
    }
}

/// 3-wide corridor starting at `(x, y)`: a walkable centre line along
/// `orientation` with a wall line on either side. With `doors` the ends
/// become closed doors framed by T-junctions, otherwise they are capped with
/// corners and left open.
pub fn carve_hallway(
    map: &mut Grid,
    x: usize,
    y: usize,
    length: usize,
    doors: bool,
    orientation: Orientation,
) {
    debug!(x, y, length, doors, %orientation, "carving hallway");

    match orientation {
        Orientation::Horizontal => carve_h_hallway(map, x, y, length, doors),
        Orientation::Vertical => carve_v_hallway(map, x, y, length, doors),
    }
}

/// Centre row `y`, flank rows `y - 1` and `y + 1`.
fn carve_h_hallway(map: &mut Grid, x: usize, y: usize, length: usize, doors: bool) {
    let far = x + length - 1;

    for col in (x + 1)..(x + length) {
        map.set(col, y + 1, Tile::wall(WallKind::Horizontal));
        map.set(col, y - 1, Tile::wall(WallKind::Horizontal));
    }

    if doors {
        let door = Tile::closed_door(Orientation::Horizontal.perpendicular());
        map.set(x, y + 1, Tile::wall(WallKind::InterRight));
        map.set(x, y - 1, Tile::wall(WallKind::InterRight));
        map.set(x, y, door);
        map.set(far, y + 1, Tile::wall(WallKind::InterLeft));
        map.set(far, y - 1, Tile::wall(WallKind::InterLeft));
        map.set(far, y, door);
    } else {
        map.set(x, y + 1, Tile::wall(WallKind::TopLeft));
        map.set(x, y - 1, Tile::wall(WallKind::BotLeft));
        map.set(x, y, Tile::Empty);
        map.set(far, y + 1, Tile::wall(WallKind::TopRight));
        map.set(far, y - 1, Tile::wall(WallKind::BotRight));
        map.set(far, y, Tile::Empty);
    }
}

/// Centre column `x`, flank columns `x - 1` and `x + 1`.
fn carve_v_hallway(map: &mut Grid, x: usize, y: usize, length: usize, doors: bool) {
    let far = y + length - 1;

    for row in (y + 1)..(y + length) {
        map.set(x + 1, row, Tile::wall(WallKind::Vertical));
        map.set(x - 1, row, Tile::wall(WallKind::Vertical));
    }

    if doors {
        let door = Tile::closed_door(Orientation::Vertical.perpendicular());
        map.set(x + 1, y, Tile::wall(WallKind::InterBot));
        map.set(x - 1, y, Tile::wall(WallKind::InterBot));
        map.set(x, y, door);
        map.set(x + 1, far, Tile::wall(WallKind::InterTop));
        map.set(x - 1, far, Tile::wall(WallKind::InterTop));
        map.set(x, far, door);
    } else {
        map.set(x + 1, y, Tile::wall(WallKind::TopLeft));
        map.set(x - 1, y, Tile::wall(WallKind::TopRight));
        map.set(x, y, Tile::Empty);
        map.set(x + 1, far, Tile::wall(WallKind::BotLeft));
        map.set(x - 1, far, Tile::wall(WallKind::BotRight));
        map.set(x, far, Tile::Empty);
    }
}
