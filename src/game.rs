use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, trace};
use serde::Serialize;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ConfigError, InvalidMove, MoveResult};
use crate::rules::Rules;
use crate::types::{Coord, GameOutcome, GameStateView, Piece};

/// A state change pushed to observers, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Every piece was removed ahead of a reset.
    Cleared,
    Placed { coord: Coord, piece: Piece },
    Flipped { coord: Coord, piece: Piece },
    /// `after_pass` is set when the previous mover had no play.
    TurnChanged { piece: Piece, after_pass: bool },
    GameOver(GameOutcome),
}

/// Receives every [`GameEvent`] synchronously, before the mutating call returns.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> GameObserver for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(Piece),
    GameOver(GameOutcome),
}

/// Owns the board and drives turns, passes and the end of the game.
pub struct Game {
    config: GameConfig,
    rules: Rules,
    board: Board,
    /// The mover lives in `status`; this only records whether the last turn change was a pass.
    last_was_pass: bool,
    status: GameStatus,
    legal: Vec<Coord>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Board::initial(config.board_size), Piece::Black))
    }

    /// Resumes play from an arbitrary position with `to_move` on turn.
    /// The turn is evaluated immediately, so the result may already have
    /// passed or be over.
    pub fn from_position(board: Board, to_move: Piece) -> Result<Self, ConfigError> {
        let config = GameConfig::with_board_size(board.size());
        config.validate()?;
        Ok(Self::build(config, board, to_move))
    }

    fn build(config: GameConfig, board: Board, to_move: Piece) -> Self {
        let mut game = Self {
            config,
            rules: Rules::new(config.board_size),
            board,
            last_was_pass: false,
            status: GameStatus::AwaitingMove(to_move),
            legal: Vec::new(),
            observers: Vec::new(),
        };
        game.begin_turn();
        game
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Clears the board, sets the four starting pieces and gives the move to black.
    pub fn reset(&mut self) {
        debug!("reset {0}x{0} game", self.config.board_size);
        self.emit(GameEvent::Cleared);
        self.board = Board::initial(self.config.board_size);
        let seeds: Vec<_> = self.board.occupied().collect();
        for (coord, piece) in seeds {
            self.emit(GameEvent::Placed { coord, piece });
        }

        self.last_was_pass = false;
        self.status = GameStatus::AwaitingMove(Piece::Black);
        self.emit(GameEvent::TurnChanged {
            piece: Piece::Black,
            after_pass: false,
        });
        self.begin_turn();
    }

    /// The color to move, or `None` once the game is over.
    pub fn current_turn(&self) -> Option<Piece> {
        match self.status {
            GameStatus::AwaitingMove(piece) => Some(piece),
            GameStatus::GameOver(_) => None,
        }
    }

    /// Legal moves for the player to move in row-major order. Empty once the game is over.
    pub fn legal_moves(&self) -> &[Coord] {
        &self.legal
    }

    pub fn submit_move(&mut self, color: Piece, coord: Coord) -> MoveResult<()> {
        if let Err(err) = self.check_move(color, coord) {
            debug!("rejected {color} at {coord}: {err}");
            return Err(err);
        }

        let flips = self.rules.apply_play(&mut self.board, color, coord);
        debug!("{color} played {coord}, flipped {}", flips.len());
        trace!("board after {color} at {coord}:\n{}", self.board);

        self.emit(GameEvent::Placed { coord, piece: color });
        for flipped in flips {
            self.emit(GameEvent::Flipped {
                coord: flipped,
                piece: color,
            });
        }

        self.change_turn(color.next());
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BTreeMap<Coord, Piece> {
        self.board.snapshot()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match &self.status {
            GameStatus::GameOver(outcome) => Some(outcome),
            GameStatus::AwaitingMove(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    /// True when the last turn change was an auto-pass: the player before the
    /// current mover had no play. Cleared by the next accepted move or a reset.
    pub fn previous_passed(&self) -> bool {
        self.last_was_pass
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn to_view(&self) -> GameStateView {
        GameStateView {
            board_size: self.config.board_size,
            board: self.board.to_cells(),
            current_player: self.current_turn().map_or(0, Piece::to_cell),
            black_count: self.board.count(Piece::Black),
            white_count: self.board.count(Piece::White),
            is_game_over: self.is_game_over(),
            is_pass: self.last_was_pass,
            legal_moves: self.legal.clone(),
            outcome: self.outcome().cloned(),
        }
    }

    fn check_move(&self, color: Piece, coord: Coord) -> MoveResult<()> {
        let expected = self.current_turn().ok_or(InvalidMove::GameOver)?;
        if color != expected {
            return Err(InvalidMove::NotYourTurn {
                expected,
                got: color,
            });
        }
        if !self.board.contains(coord) {
            return Err(InvalidMove::OutOfBounds {
                coord,
                board_size: self.config.board_size,
            });
        }
        if !self.board.is_empty_at(coord) {
            return Err(InvalidMove::Occupied { coord });
        }
        if !self.legal.contains(&coord) {
            return Err(InvalidMove::NoCapture { coord });
        }
        Ok(())
    }

    fn change_turn(&mut self, piece: Piece) {
        self.status = GameStatus::AwaitingMove(piece);
        self.emit(GameEvent::TurnChanged {
            piece,
            after_pass: false,
        });
        self.begin_turn();
    }

    /// Runs after every transition: exposes the mover's plays, passes when there
    /// are none, and ends the game on the second consecutive pass.
    fn begin_turn(&mut self) {
        let mut passed = false;
        while let GameStatus::AwaitingMove(mover) = self.status {
            self.last_was_pass = passed;
            self.legal = self.rules.legal_plays(&self.board, mover);
            if !self.legal.is_empty() {
                return;
            }

            if passed {
                self.end_game();
                return;
            }

            debug!("{mover} has no legal move and passes");
            passed = true;
            self.status = GameStatus::AwaitingMove(mover.next());
            self.emit(GameEvent::TurnChanged {
                piece: mover.next(),
                after_pass: true,
            });
        }
    }

    fn end_game(&mut self) {
        let outcome = GameOutcome::from_counts(
            self.board.count(Piece::Black),
            self.board.count(Piece::White),
        );
        info!(
            "game over: {outcome} (black {}, white {})",
            outcome.black_count, outcome.white_count
        );
        self.legal.clear();
        self.status = GameStatus::GameOver(outcome.clone());
        self.emit(GameEvent::GameOver(outcome));
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("last_was_pass", &self.last_was_pass)
            .field("legal", &self.legal)
            .field("observers", &self.observers.len())
            .finish()?;
        write!(f, "\n{}", self.board)
    }
}

impl Default for Game {
    fn default() -> Self {
        let config = GameConfig::default();
        Self::build(config, Board::initial(config.board_size), Piece::Black)
    }
}
