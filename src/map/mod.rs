pub mod generator;
pub mod tile;

use std::fmt;

use tile::Tile;

/// Fixed-size tile grid stored row-major: cell `(x, y)` lives in row `y`,
/// column `x`. Coordinates are trusted; indexing outside the grid panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Empty)
    }

    pub fn filled(width: usize, height: usize, fill: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let i = self.idx(x, y);
        &mut self.tiles[i]
    }

    pub fn set(&mut self, x: usize, y: usize, t: Tile) {
        let i = self.idx(x, y);
        self.tiles[i] = t;
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use super::tile::{Orientation, WallKind};

    proptest! {
        #[test]
        fn fresh_grid_is_all_empty(width in 1usize..64, height in 1usize..64) {
            let grid = Grid::new(width, height);
            prop_assert_eq!(grid.tiles().len(), width * height);
            prop_assert!(grid.tiles().iter().all(|t| *t == Tile::Empty));
            prop_assert_eq!(grid.rows().count(), height);
        }
    }

    #[test]
    fn set_uses_x_as_column_and_y_as_row() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 1, Tile::wall(WallKind::Vertical));

        let rows: Vec<&[Tile]> = grid.rows().collect();
        assert_eq!(rows[1][3], Tile::wall(WallKind::Vertical));
        assert_eq!(grid.get(3, 1), Tile::wall(WallKind::Vertical));
        assert_eq!(grid.tiles()[4 + 3], Tile::wall(WallKind::Vertical));
        assert_eq!(grid.get(1, 2), Tile::Empty);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 1, Tile::closed_door(Orientation::Horizontal));
        grid.get_mut(0, 1).execute_behaviour();
        assert!(!grid.get(0, 1).is_solid());
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let grid = Grid::new(3, 3);
        let _ = grid.get(3, 0);
    }

    #[test]
    fn in_bounds_rejects_negative_and_overflowing() {
        let grid = Grid::new(5, 2);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(4, 1));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(5, 0));
        assert!(!grid.in_bounds(0, 2));
    }

    #[test]
    fn display_draws_one_line_per_row() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 0, Tile::wall(WallKind::TopLeft));
        grid.set(2, 1, Tile::closed_door(Orientation::Vertical));
        assert_eq!(grid.to_string(), "┌..\n..+");
    }
}
