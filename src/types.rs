use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. `x` is the column, `y` the row (growing downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Dense array key for a square board of side `board_size`.
    pub fn index(self, board_size: u8) -> usize {
        self.y as usize * board_size as usize + self.x as usize
    }
}

/// Row-major: `y` first, then `x`.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}+{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Piece {
    Black,
    White,
}

impl Piece {
    pub const ALL: [Piece; 2] = [Piece::Black, Piece::White];

    /// The other color.
    pub fn next(self) -> Self {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
        }
    }

    /// Cell code used by [`GameStateView::board`]: 1=black, 2=white.
    pub fn to_cell(self) -> u8 {
        match self {
            Piece::Black => 1,
            Piece::White => 2,
        }
    }

    pub fn from_cell(cell: u8) -> Option<Self> {
        match cell {
            1 => Some(Piece::Black),
            2 => Some(Piece::White),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Piece::Black => "BLACK",
            Piece::White => "WHITE",
        })
    }
}

/// Final result after game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Colors holding the highest count, in `Piece::ALL` order. Two entries mean a tie.
    pub winners: Vec<Piece>,
    pub black_count: u16,
    pub white_count: u16,
}

impl GameOutcome {
    pub fn from_counts(black_count: u16, white_count: u16) -> Self {
        let high = black_count.max(white_count);
        let winners = Piece::ALL
            .into_iter()
            .filter(|&piece| match piece {
                Piece::Black => black_count == high,
                Piece::White => white_count == high,
            })
            .collect();
        Self {
            winners,
            black_count,
            white_count,
        }
    }

    pub fn count(&self, piece: Piece) -> u16 {
        match piece {
            Piece::Black => self.black_count,
            Piece::White => self.white_count,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    /// The sole winner, or `None` on a tie.
    pub fn winner(&self) -> Option<Piece> {
        match self.winners.as_slice() {
            [piece] => Some(*piece),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(winner) = self.winner() {
            return write!(f, "{winner} wins!");
        }
        for (i, piece) in self.winners.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{piece}")?;
        }
        f.write_str(" tie.")
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStateView {
    pub board_size: u8,
    /// Row-major cell codes: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// 0 once the game is over.
    pub current_player: u8,
    pub black_count: u16,
    pub white_count: u16,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous mover had no play and passed.
    /// - `false` after a normal move or a reset.
    pub is_pass: bool,
    pub legal_moves: Vec<Coord>,
    pub outcome: Option<GameOutcome>,
}
