pub mod game_loop;
pub mod input;
pub mod renderer;

pub use crate::game_loop::{GameSession, SessionOptions};
pub use crate::input::{Console, MenuChoice};
