use std::collections::VecDeque;

use tracing::debug;

use crate::engine::action::Action;
use crate::engine::level::Level;
use crate::map::tile::{Door, Tile};

const MAX_LOGS: usize = 6;

/// A play session: the level plus the bits of state only the front-end
/// cares about (message log, which way the player is facing).
pub struct World {
    pub level: Level,
    pub logs: VecDeque<String>,
    pub facing: (i32, i32),
    pub ticks: u64,
}

impl World {
    pub fn new(level: Level) -> Self {
        let mut logs = VecDeque::new();
        logs.push_back("You wake up in a silent dungeon.".to_string());
        logs.push_back("Move with WASD or arrow keys.".to_string());
        logs.push_back("Press E to open or close the door you face.".to_string());

        Self {
            level,
            logs,
            facing: (0, 1),
            ticks: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// The cell in front of the player, if it is on the map.
    pub fn facing_cell(&self) -> Option<(usize, usize)> {
        let p = self.level.player();
        let (x, y) = (p.x + self.facing.0, p.y + self.facing.1);
        self.level
            .map()
            .in_bounds(x, y)
            .then_some((x as usize, y as usize))
    }

    pub fn facing_tile(&self) -> Option<Tile> {
        self.facing_cell().map(|(x, y)| self.level.map().get(x, y))
    }

    fn move_player(&mut self, dx: i32, dy: i32) {
        self.facing = (dx, dy);
        if self.level.try_move_player(dx, dy) {
            return;
        }
        if let Some((x, y)) = self.facing_cell() {
            if let Some(npc) = self.level.character_at(x as i32, y as i32) {
                let msg = format!("The {} is in the way.", npc.name());
                self.push_log(msg);
                return;
            }
        }
        if let Some(Tile::Door(Door { is_open: false, .. })) = self.facing_tile() {
            self.push_log("The door is closed. Press E to open it.");
        }
    }

    fn interact(&mut self) {
        let Some((x, y)) = self.facing_cell() else {
            self.push_log("There is nothing there.");
            return;
        };

        if let Some(npc) = self.level.character_at(x as i32, y as i32) {
            let msg = format!("The {} ignores you.", npc.name());
            self.push_log(msg);
            return;
        }

        self.level.interact(x, y);
        let msg = match self.level.map().get(x, y) {
            Tile::Door(Door { is_open: true, .. }) => "You open the door.",
            Tile::Door(Door { is_open: false, .. }) => "You close the door.",
            Tile::Wall(_) => "You touch the cold wall.",
            Tile::Empty => "Nothing happens.",
        };
        self.push_log(msg);
    }

    /// Applies one player action. Returns `false` once the session should end.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Move(dx, dy) => self.move_player(dx, dy),
            Action::Interact => self.interact(),
            Action::Tick => {
                self.ticks += 1;
                self.level.update();
            }
            Action::Quit => {
                debug!(ticks = self.ticks, "quit requested");
                return false;
            }
            Action::None => {}
        }
        true
    }
}
