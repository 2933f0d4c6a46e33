//! Frame rendering: a bordered grid of the world plus a status header.

use crate::world::World;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;

/// Sink that paints one frame per tick.
pub trait Renderer {
    /// Paint `world` with `message` (may span several lines) as status text.
    fn render(&mut self, world: &World, message: &str) -> io::Result<()>;
}

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sky,
    Pipe,
    Bird,
}

/// Rasterize the world into `height` rows of `width` cells.
///
/// Pipes outside the grid are skipped; the bird is drawn last so it shows
/// on top of a pipe it just hit.
pub fn build_grid(world: &World) -> Vec<Vec<Cell>> {
    let width = world.width as usize;
    let height = world.height as usize;
    let mut grid = vec![vec![Cell::Sky; width]; height];

    for pipe in &world.pipes {
        if pipe.x < 0 || pipe.x >= world.width as i32 {
            continue;
        }
        for (y, row) in grid.iter_mut().enumerate() {
            if pipe.blocks(y as i32) {
                row[pipe.x as usize] = Cell::Pipe;
            }
        }
    }

    let bird_x = world.bird.x;
    let bird_y = world.bird.cell_y();
    if (0..world.width as i32).contains(&bird_x) && (0..world.height as i32).contains(&bird_y) {
        grid[bird_y as usize][bird_x as usize] = Cell::Bird;
    }

    grid
}

/// Header lines: the score, then each line of `message`.
pub fn hud_lines(world: &World, message: &str) -> Vec<String> {
    let mut lines = vec![format!("Score: {}", world.score)];
    lines.extend(message.lines().map(str::to_string));
    lines
}

/// Center a `width` x `height` box in `area`, clipped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Sky => Span::raw(" "),
        Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
        Cell::Bird => Span::styled(
            "●",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

fn draw_frame(frame: &mut Frame, world: &World, hud: &[String]) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let hud_height = hud.len() as u16;
    let board_width = world.width.saturating_add(2);
    let board_height = world.height.saturating_add(2);
    let outer = centered_rect(area, board_width, hud_height.saturating_add(board_height));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(hud_height), Constraint::Min(0)])
        .split(outer);

    let header: Vec<Line> = hud
        .iter()
        .map(|text| Line::from(Span::styled(text.clone(), Style::default().fg(Color::White))))
        .collect();
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let rows: Vec<Line> = build_grid(world)
        .into_iter()
        .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
        .collect();
    frame.render_widget(Paragraph::new(rows), inner);
}

/// Draws frames through a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, world: &World, message: &str) -> io::Result<()> {
        let hud = hud_lines(world, message);
        self.terminal.draw(|frame| draw_frame(frame, world, &hud))?;
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _world: &World, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Remembers what it was last asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: usize,
    pub last_message: String,
    pub last_world: Option<World>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, world: &World, message: &str) -> io::Result<()> {
        self.frames += 1;
        self.last_message = message.to_string();
        self.last_world = Some(world.clone());
        Ok(())
    }
}
