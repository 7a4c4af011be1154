use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout, Stdout},
    time::Duration,
};

mod cli_options;
mod constants;
mod game;
mod input;
mod ui;

use game::Game;
use input::{handle_input, handle_mouse, BoardGeometry};
use ui::{ui, ScreenLayout};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli_options::parse();
    cli_options::init_logging(&args)?;

    let levels = args.load_levels().map_err(|e| {
        error!("{e}");
        e
    })?;
    if args.list {
        cli_options::print_levels(&levels);
        return Ok(());
    }

    let mut game = Game::new(levels, args.first_level(), args.samples_per_cell);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let result = with_restore(
        || {
            let mut stdout = stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture, event::EnableFocusChange)?;

            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;
            run(&mut terminal, &mut game)
        },
        restore_terminal,
    );

    info!("Final score: {}", game.score);
    result
}

/// Run `session`, then `restore`, whether or not the session failed. The session's error wins
/// over a restore error.
fn with_restore<F, R>(session: F, restore: R) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<(), Box<dyn std::error::Error>>,
    R: FnOnce() -> io::Result<()>,
{
    let result = session();
    let restored = restore();
    if let Err(e) = &restored {
        error!("Cannot restore the terminal: {e}");
    }
    result?;
    restored?;
    Ok(())
}

// Safe to call when setup stopped half way: each step is a no-op if it was never enabled.
fn restore_terminal() -> io::Result<()> {
    execute!(stdout(), event::DisableFocusChange, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)
}

fn run(terminal: &mut Tui, game: &mut Game) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Render
        terminal.draw(|f| ui(f, game))?;

        // Handle input
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        if kind == KeyEventKind::Press {
                            break;
                        }
                    }
                    _ => {
                        handle_input(game, code, kind);
                    }
                },
                Event::Mouse(mouse) => {
                    let layout = ScreenLayout::new(terminal.size()?, game);
                    let board = BoardGeometry::new(layout.board_inner(), game.level().cell_size);
                    handle_mouse(game, mouse, &board);
                }
                Event::FocusLost => {
                    game.pointer_up();
                }
                _ => {}
            }
        }

        // Update game state
        game.update();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn restores_after_a_failed_session() {
        let restored = Cell::new(false);
        let result = with_restore(
            || Err("alternate screen unavailable".into()),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "alternate screen unavailable");
    }

    #[test]
    fn session_error_wins_over_restore_error() {
        let result = with_restore(
            || Err("session failed".into()),
            || Err(io::Error::new(io::ErrorKind::Other, "restore failed")),
        );
        assert_eq!(result.unwrap_err().to_string(), "session failed");
    }

    #[test]
    fn restore_error_is_reported_after_a_clean_session() {
        let result = with_restore(
            || Ok(()),
            || Err(io::Error::new(io::ErrorKind::Other, "restore failed")),
        );
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
    }
}
