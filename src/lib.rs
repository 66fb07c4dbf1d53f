use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, InvalidMove, MoveResult};
pub use game::{Game, GameEvent, GameObserver, GameStatus};
pub use rules::Rules;
pub use types::{Coord, GameOutcome, GameStateView, Piece};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
