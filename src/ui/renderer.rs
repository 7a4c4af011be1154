use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

use crate::constants::{CELL_COLUMNS, CELL_ROWS};
use crate::game::board::CellPos;
use crate::game::{Cell, Game};

const WALL_COLOR: Color = Color::Rgb(139, 69, 19);
const PATH_COLOR: Color = Color::Rgb(245, 222, 179);
const TRAIL_COLOR: Color = Color::Rgb(255, 107, 107);

const INFO_WIDTH: u16 = 30;

/// Screen areas, shared by the renderer and the mouse mapping.
pub struct ScreenLayout {
    pub title: Rect,
    pub board: Rect,
    pub info: Rect,
    pub tips: Rect,
}

impl ScreenLayout {
    pub fn new(size: Rect, game: &Game) -> Self {
        let board = &game.level().board;
        let board_width = footprint(board.cols(), CELL_COLUMNS);
        let board_height = footprint(board.rows(), CELL_ROWS);

        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Maze
                Constraint::Length(4),            // Tips
                Constraint::Min(0),
            ])
            .split(size);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(board_width),
                Constraint::Length(INFO_WIDTH),
                Constraint::Min(1),
            ])
            .split(vertical_chunks[1]);

        Self {
            title: vertical_chunks[0],
            board: horizontal_chunks[1],
            info: horizontal_chunks[2],
            tips: vertical_chunks[2],
        }
    }

    /// Board area without its border: the region that maps to maze pixels.
    pub fn board_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.board)
    }
}

// Terminal cells for `cells` maze cells plus the two border cells, clamped to u16
fn footprint(cells: usize, per_cell: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(per_cell)
        .saturating_add(2)
}

pub fn ui(f: &mut Frame, game: &Game) {
    let layout = ScreenLayout::new(f.size(), game);

    render_title(f, layout.title);
    render_board(f, game, &layout);
    render_info(f, game, layout.info);
    render_tips(f, layout.tips);

    if game.is_celebrating() {
        render_finished_overlay(f, layout.board);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![Span::styled(
        "🚜 Digger Maze Adventure! 🚜",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, game: &Game, layout: &ScreenLayout) {
    let level = game.level();
    let mut board_lines = Vec::new();

    for (y, row) in level.board.iter_rows().enumerate() {
        for sub_row in 0..CELL_ROWS {
            let mut line_spans = Vec::new();
            for (x, cell) in row.iter().enumerate() {
                let pos = CellPos::new(y, x);
                let marker = if pos == level.start {
                    Some("🚜")
                } else if pos == level.goal {
                    Some("💎")
                } else {
                    None
                };

                let span = match (cell, marker) {
                    (Cell::Wall, _) => {
                        Span::styled("████", Style::default().fg(WALL_COLOR))
                    }
                    (Cell::Open, Some(icon)) if sub_row == 0 => {
                        Span::styled(format!(" {icon} "), Style::default().bg(PATH_COLOR))
                    }
                    (Cell::Open, _) => Span::styled("    ", Style::default().bg(PATH_COLOR)),
                };
                line_spans.push(span);
            }
            board_lines.push(Line::from(line_spans));
        }
    }

    let border_color = if game.is_flashing() {
        Color::Red
    } else if game.is_celebrating() {
        Color::Green
    } else {
        Color::White
    };

    let board_widget = Paragraph::new(board_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!("Level {}", game.level_number())),
    );
    f.render_widget(board_widget, layout.board);

    render_trail(f, game, layout.board_inner());
}

// Braille overlay in maze pixel space. Canvas y grows upwards, the maze's grows downwards.
fn render_trail(f: &mut Frame, game: &Game, area: Rect) {
    let points = game.trail.points();
    if points.len() < 2 {
        return;
    }

    let (width, height) = game.level().pixel_size();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(PATH_COLOR)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for pair in points.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].x,
                    y1: height - pair[0].y,
                    x2: pair[1].x,
                    y2: height - pair[1].y,
                    color: TRAIL_COLOR,
                });
            }
        });

    f.render_widget(canvas, area);
}

fn render_info(f: &mut Frame, game: &Game, area: Rect) {
    let status = if game.is_celebrating() {
        Span::styled("Treasure found!", Style::default().fg(Color::Green))
    } else if game.is_flashing() {
        Span::styled("Bonk! That's a wall.", Style::default().fg(Color::Red))
    } else if game.trail.is_drawing() {
        Span::styled("Digging...", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("Ready to dig")
    };

    let info_text = vec![
        Line::from(vec![Span::styled(
            format!("Score: {}", game.score),
            Style::default().fg(Color::Cyan),
        )]),
        Line::from(vec![Span::raw(format!(
            "Level: {}/{}",
            game.level_number(),
            game.levels.len()
        ))]),
        Line::from(vec![Span::styled(
            game.level().name.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![status]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("Help the digger find")]),
        Line::from(vec![Span::raw("the treasure! 💎")]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("R  Try again")]),
        Line::from(vec![Span::raw("N  Next level")]),
        Line::from(vec![Span::raw("Q  Quit")]),
    ];

    let info_widget = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Digger"))
        .wrap(Wrap { trim: true });

    f.render_widget(info_widget, area);
}

fn render_tips(f: &mut Frame, area: Rect) {
    let tips = vec![
        Line::from(vec![Span::raw(
            "Draw a path from the digger to the treasure with the mouse!",
        )]),
        Line::from(vec![
            Span::raw("💡 Stay on the "),
            Span::styled("light brown paths", Style::default().fg(PATH_COLOR)),
            Span::raw("!  🚫 Avoid the "),
            Span::styled("dark brown walls", Style::default().fg(WALL_COLOR)),
            Span::raw("!"),
        ]),
    ];

    let tips_widget = Paragraph::new(tips)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(tips_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_finished_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(90, 60, area);
    f.render_widget(Clear, popup_area);

    let finished_text = vec![
        Line::from(vec![Span::raw("🎉")]),
        Line::from(vec![Span::styled(
            "Great job!",
            Style::default().fg(Color::Green),
        )]),
        Line::from(vec![Span::raw("The digger found")]),
        Line::from(vec![Span::raw("the treasure!")]),
        Line::from(vec![Span::raw("🚜💎✨")]),
    ];

    let finished_widget = Paragraph::new(finished_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(finished_widget, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::builtin_levels;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn board_area_fits_the_maze() {
        let game = Game::new(builtin_levels(), 0, 4);
        let layout = ScreenLayout::new(Rect::new(0, 0, 100, 40), &game);
        let inner = layout.board_inner();
        assert_eq!(inner.width, 5 * CELL_COLUMNS);
        assert_eq!(inner.height, 5 * CELL_ROWS);
        assert_eq!(inner.y, 4);
    }

    #[test]
    fn oversized_board_layout_saturates() {
        use crate::game::board::Board;
        use crate::game::level::Level;

        let mut row = vec![Cell::Open; 20_000];
        row[1] = Cell::Wall;
        let level = Level {
            name: "huge".to_string(),
            board: Board::from_rows(vec![row]),
            start: CellPos::new(0, 0),
            goal: CellPos::new(0, 19_999),
            cell_size: 60.0,
        };
        let game = Game::new(vec![level], 0, 4);
        let layout = ScreenLayout::new(Rect::new(0, 0, 100, 40), &game);
        assert!(layout.board.width <= 100);
        assert_eq!(footprint(20_000, CELL_COLUMNS), u16::MAX);
        assert_eq!(footprint(5, CELL_COLUMNS), 22);
    }

    #[test]
    fn draws_score_and_level() {
        let mut game = Game::new(builtin_levels(), 0, 4);
        game.pointer_down(CellPos::new(0, 0).center(60.0));
        game.pointer_move(CellPos::new(0, 2).center(60.0));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, &game)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Level: 1/5"));
        assert!(text.contains("Digging..."));
    }
}
