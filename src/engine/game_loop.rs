use crate::config::GameConfig;
use crate::engine::action::Action;
use crate::engine::level::Level;
use crate::engine::world::World;
use crate::error::RunError;
use crate::tui::{
    input::{is_press, key_to_action},
    renderer::render,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use ratatui::{backend::CrosstermBackend, Terminal};

use std::{
    io,
    time::{Duration, Instant},
};

use tracing::{info, warn};

/// Raw mode plus the alternate screen. Dropping it restores the terminal,
/// including when setup fails halfway or the loop returns an error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "could not leave raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            warn!(error = %e, "could not leave the alternate screen");
        }
    }
}

/// Validates `config` and builds the level before the terminal is touched,
/// so a bad config never leaves the terminal in raw mode.
pub fn run(config: &GameConfig) -> Result<(), RunError> {
    config.validate()?;
    let level = Level::from_config(&config.level)?;
    let mut world = World::new(level);

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut world, config);
    terminal.show_cursor()?;

    info!(ticks = world.ticks, "session ended");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    world: &mut World,
    config: &GameConfig,
) -> Result<(), RunError> {
    let tick_rate = Duration::from_millis(config.tick_ms);
    let move_cooldown = Duration::from_millis(config.move_cooldown_ms);
    let mut last_move_time = Instant::now().checked_sub(move_cooldown).unwrap_or_else(Instant::now);

    let mut running = true;
    while running {
        if terminal.draw(|f| render(f, world)).is_err() {
            terminal.autoresize()?;
            terminal.clear()?;
            continue;
        }

        if !event::poll(tick_rate)? {
            running = world.apply_action(Action::Tick);
            continue;
        }

        match event::read()? {
            Event::Resize(_, _) => {
                terminal.autoresize()?;
                terminal.clear()?;
            }

            Event::Key(key) => {
                if !is_press(&key) {
                    continue;
                }

                let mut action = key_to_action(&key);

                if let Action::Move(_, _) = action {
                    let now = Instant::now();
                    if now.duration_since(last_move_time) < move_cooldown {
                        action = Action::None;
                    } else {
                        last_move_time = now;
                    }
                }

                running = world.apply_action(action);
            }

            _ => {}
        }
    }
    Ok(())
}
