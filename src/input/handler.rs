use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::debug;

use crate::game::Game;
use crate::input::pointer::BoardGeometry;

pub fn handle_input(game: &mut Game, key_code: KeyCode, kind: KeyEventKind) {
    if kind != KeyEventKind::Press {
        return;
    }

    match key_code {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            debug!("Try again");
            game.reset();
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            game.next_level();
        }
        _ => {}
    }
}

/// Turn mouse events into trail operations.
///
/// Dragging or releasing outside the board counts as the pointer leaving the maze, which ends
/// the current drag.
pub fn handle_mouse(game: &mut Game, event: MouseEvent, board: &BoardGeometry) {
    let point = board.to_point(event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(point) = point {
                game.pointer_down(point);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => match point {
            Some(point) => game.pointer_move(point),
            None => game.pointer_up(),
        },
        MouseEventKind::Up(MouseButton::Left) => {
            game.pointer_up();
        }
        _ => {}
    }
}
