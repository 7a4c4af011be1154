pub mod handler;
pub mod pointer;

pub use handler::{handle_input, handle_mouse};
pub use pointer::BoardGeometry;
