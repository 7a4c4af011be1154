pub mod board;
pub mod level;
pub mod state;
pub mod trail;

pub use board::{Cell, Point};
pub use state::Game;
