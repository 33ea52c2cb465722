pub mod board;
pub mod error;
pub mod game;
pub mod player;
pub mod position;

pub use board::{Board, BoardIterator, Cell};
pub use error::GameError;
pub use game::{Action, Game, GameState};
pub use player::AiPlayer;
pub use position::Position;
