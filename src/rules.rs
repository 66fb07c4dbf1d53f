use crate::board::Board;
use crate::types::{Coord, Piece};

/// NW, N, NE, W, E, SW, S, SE with `y` growing downward.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Stateless Reversi rules for a square board of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    board_size: u8,
}

impl Rules {
    pub fn new(board_size: u8) -> Self {
        Self { board_size }
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    /// Returns true if `color` can play at `coord`: the cell is on the board, empty,
    /// and at least one direction holds a run of opposing pieces closed by `color`.
    pub fn is_legal_play(&self, board: &Board, color: Piece, coord: Coord) -> bool {
        if !self.playable(board, coord) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.run_in_direction(board, color, coord, dx, dy).is_some())
    }

    /// Pieces that playing `color` at `coord` would flip, in discovery order.
    /// Empty for an illegal play.
    pub fn captures(&self, board: &Board, color: Piece, coord: Coord) -> Vec<Coord> {
        if !self.playable(board, coord) {
            return Vec::new();
        }
        let mut flips = Vec::new();
        for (dx, dy) in DIRECTIONS {
            if let Some(run) = self.run_in_direction(board, color, coord, dx, dy) {
                flips.extend(run);
            }
        }
        flips
    }

    /// Places `color` at `coord` and flips every captured run.
    /// Returns the flipped coordinates in discovery order.
    ///
    /// Caller contract: the play must already be known to be legal.
    pub fn apply_play(&self, board: &mut Board, color: Piece, coord: Coord) -> Vec<Coord> {
        debug_assert!(
            self.is_legal_play(board, color, coord),
            "apply_play() requires a legal play, got {color} at {coord}"
        );

        let flips = self.captures(board, color, coord);
        board.place(coord, color);
        for &flipped in &flips {
            board.place(flipped, color);
        }
        flips
    }

    /// All legal plays for `color`, scanning rows top to bottom and columns left to right.
    pub fn legal_plays(&self, board: &Board, color: Piece) -> Vec<Coord> {
        self.cells()
            .filter(|&coord| board.is_empty_at(coord) && self.is_legal_play(board, color, coord))
            .collect()
    }

    pub fn has_any_play(&self, board: &Board, color: Piece) -> bool {
        self.cells()
            .any(|coord| board.is_empty_at(coord) && self.is_legal_play(board, color, coord))
    }

    fn cells(&self) -> impl Iterator<Item = Coord> {
        let size = self.board_size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }

    fn playable(&self, board: &Board, coord: Coord) -> bool {
        coord.x < self.board_size && coord.y < self.board_size && board.is_empty_at(coord)
    }

    /// Walks from `coord` along `(dx, dy)`. Returns the run of opposing pieces when it
    /// is closed by a `color` piece; `None` on an empty cell, the edge, or an empty run.
    fn run_in_direction(
        &self,
        board: &Board,
        color: Piece,
        coord: Coord,
        dx: i32,
        dy: i32,
    ) -> Option<Vec<Coord>> {
        let mut x = coord.x as i32 + dx;
        let mut y = coord.y as i32 + dy;
        let mut line = Vec::new();

        while board.in_bounds(x, y) {
            let square = Coord::new(x as u8, y as u8);
            match board.get(square) {
                Some(piece) if piece == color => {
                    return if line.is_empty() { None } else { Some(line) };
                }
                Some(_) => line.push(square),
                None => return None,
            }
            x += dx;
            y += dy;
        }

        None
    }
}
