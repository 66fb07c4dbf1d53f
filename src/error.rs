use thiserror::Error;

use crate::types::{Coord, Piece};

/// Why a submitted move was rejected. Board and turn are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("game is already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Piece, got: Piece },

    #[error("{coord} is outside the {board_size}x{board_size} board")]
    OutOfBounds { coord: Coord, board_size: u8 },

    #[error("{coord} is already occupied")]
    Occupied { coord: Coord },

    #[error("{coord} captures nothing")]
    NoCapture { coord: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid board size {size}: expected an even size between {min} and {max}")]
    InvalidBoardSize { size: usize, min: u8, max: u8 },

    #[error("malformed board row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

pub type MoveResult<T> = Result<T, InvalidMove>;
