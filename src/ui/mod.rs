pub mod renderer;

pub use renderer::{ui, ScreenLayout};
