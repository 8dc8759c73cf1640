use crate::engine::entity::Character;
use crate::engine::world::World;
use crate::map::tile::{Door, Tile};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn compute_viewport_origin(
    px: i32, py: i32,
    map_w: i32, map_h: i32,
    view_w: i32, view_h: i32,
) -> (i32, i32) {
    let mut x0 = px - view_w / 2;
    let mut y0 = py - view_h / 2;

    if view_w < map_w && x0 + view_w > map_w {
        x0 = map_w - view_w;
    }
    if view_h < map_h && y0 + view_h > map_h {
        y0 = map_h - view_h;
    }

    if x0 < 0 { x0 = 0; }
    if y0 < 0 { y0 = 0; }

    (x0, y0)
}

fn tile_style(tile: Tile) -> Style {
    match tile {
        Tile::Empty => Style::default().fg(Color::DarkGray),
        Tile::Wall(_) => Style::default().fg(Color::Gray),
        Tile::Door(Door { is_open: false, .. }) => {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        }
        Tile::Door(Door { is_open: true, .. }) => Style::default().fg(Color::Yellow),
    }
}

pub fn render(f: &mut Frame, world: &World) {
    let size = f.size();
    f.render_widget(Clear, size);

    if size.width < 20 || size.height < 10 {
        let msg = Paragraph::new("Terminal too small, resize to play.")
            .block(Block::default().borders(Borders::ALL).title("Solitary Dungeon"))
            .wrap(Wrap { trim: true });
        f.render_widget(msg, size);
        return;
    }

    let log_h = (size.height / 4).clamp(5, 8);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(log_h)])
        .split(size);

    let top = vertical[0];
    let sidebar_w = (top.width / 3).clamp(20, 32);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(sidebar_w)])
        .split(top);

    draw_map(f, horizontal[0], world);
    draw_sidebar(f, horizontal[1], world);
    draw_logs(f, vertical[1], world);
}

fn draw_map(f: &mut Frame, area: Rect, world: &World) {
    let map = world.level.map();
    let player = world.level.player();

    let map_w = map.width() as i32;
    let map_h = map.height() as i32;

    let view_w = (area.width as i32).saturating_sub(2).max(1);
    let view_h = (area.height as i32).saturating_sub(2).max(1);

    let (x0, y0) = compute_viewport_origin(player.x, player.y, map_w, map_h, view_w, view_h);

    let mut lines: Vec<Line> = Vec::with_capacity(view_h as usize);

    for vy in 0..view_h {
        let wy = y0 + vy;
        let mut spans: Vec<Span> = Vec::with_capacity(view_w as usize);

        for vx in 0..view_w {
            let wx = x0 + vx;

            if !map.in_bounds(wx, wy) {
                spans.push(Span::raw(" "));
                continue;
            }

            if let Some(c) = world.level.character_at(wx, wy) {
                let style = match c {
                    Character::Player(_) => Style::default().fg(Color::Yellow),
                    Character::Patroller(_) => Style::default().fg(Color::Red),
                };
                spans.push(Span::styled(
                    c.symbol().to_string(),
                    style.add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let tile = map.get(wx as usize, wy as usize);
            spans.push(Span::styled(tile.glyph().to_string(), tile_style(tile)));
        }

        lines.push(Line::from(spans));
    }

    let map_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Map"));

    f.render_widget(map_widget, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, world: &World) {
    let p = world.level.player();
    let ahead = world
        .facing_tile()
        .map(|t| t.describe())
        .unwrap_or("the edge of the world");

    let text: Vec<Line> = vec![
        Line::from(format!("Pos: ({}, {})", p.x, p.y)),
        Line::from(format!("Ahead: {}", ahead)),
        Line::from(format!("Turn: {}", world.ticks)),
        Line::from(""),
        Line::from(Span::styled("Controls", Style::default().fg(Color::Cyan))),
        Line::from("WASD / Arrows: Move"),
        Line::from("E: Open / close door"),
        Line::from("Esc / Ctrl+C: Quit"),
    ];

    let sidebar = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Player"))
        .wrap(Wrap { trim: true });

    f.render_widget(sidebar, area);
}

fn draw_logs(f: &mut Frame, area: Rect, world: &World) {
    let lines: Vec<Line> = world.logs.iter().map(|msg| Line::from(msg.clone())).collect();

    let logs = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });

    f.render_widget(logs, area);
}
