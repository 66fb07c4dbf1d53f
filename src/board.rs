use std::collections::BTreeMap;
use std::fmt;

use crate::config::{DEFAULT_BOARD_SIZE, validate_board_size};
use crate::error::ConfigError;
use crate::types::{Coord, Piece};

/// Square Reversi board stored as a dense row-major array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates the standard 8x8 starting board:
    /// (3,3)=white, (4,3)=black, (3,4)=black, (4,4)=white.
    pub fn new() -> Self {
        Self::initial(DEFAULT_BOARD_SIZE)
    }

    pub fn empty(size: u8) -> Self {
        let len = size as usize * size as usize;
        Self {
            size,
            cells: vec![None; len],
        }
    }

    /// Empty board seeded with the 2x2 block of starting pieces in the middle.
    pub fn initial(size: u8) -> Self {
        let mut board = Self::empty(size);
        let half = size / 2;
        if half == 0 {
            return board;
        }
        board.place(Coord::new(half - 1, half - 1), Piece::White);
        board.place(Coord::new(half, half - 1), Piece::Black);
        board.place(Coord::new(half - 1, half), Piece::Black);
        board.place(Coord::new(half, half), Piece::White);
        board
    }

    /// Parses one string per row: `B` black, `W` white, `.` empty.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        validate_board_size(rows.len())?;
        let size = rows.len() as u8;
        let mut board = Self::empty(size);

        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != rows.len() {
                return Err(ConfigError::MalformedRow {
                    row: y,
                    reason: format!("expected {} cells, got {}", rows.len(), cells.len()),
                });
            }
            for (x, cell) in cells.into_iter().enumerate() {
                let piece = match cell {
                    'B' | 'b' => Piece::Black,
                    'W' | 'w' => Piece::White,
                    '.' => continue,
                    other => {
                        return Err(ConfigError::MalformedRow {
                            row: y,
                            reason: format!("unexpected cell {other:?} at column {x}"),
                        });
                    }
                };
                board.place(Coord::new(x as u8, y as u8), piece);
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Signed bounds check so callers can step off any edge without wrapping.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    /// Occupant of `coord`; `None` for an empty or off-board cell.
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        if !self.contains(coord) {
            return None;
        }
        self.cells[coord.index(self.size)]
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.contains(coord) && self.cells[coord.index(self.size)].is_none()
    }

    pub fn count(&self, piece: Piece) -> u16 {
        self.cells.iter().filter(|&&cell| cell == Some(piece)).count() as u16
    }

    pub fn empty_count(&self) -> u16 {
        self.cells.iter().filter(|cell| cell.is_none()).count() as u16
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|piece| (Coord::new((idx % size) as u8, (idx / size) as u8), piece))
        })
    }

    pub fn snapshot(&self) -> BTreeMap<Coord, Piece> {
        self.occupied().collect()
    }

    /// Row-major cell codes: 0=empty, 1=black, 2=white.
    pub fn to_cells(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|cell| cell.map_or(0, Piece::to_cell))
            .collect()
    }

    pub(crate) fn place(&mut self, coord: Coord, piece: Piece) {
        let idx = coord.index(self.size);
        self.cells[idx] = Some(piece);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx > 0 && idx % self.size as usize == 0 {
                f.write_str("\n")?;
            }
            f.write_str(match cell {
                Some(Piece::Black) => "B",
                Some(Piece::White) => "W",
                None => ".",
            })?;
        }
        Ok(())
    }
}
