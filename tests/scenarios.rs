use std::cell::RefCell;
use std::rc::Rc;

use reversi_engine::{
    Board, Coord, Game, GameEvent, GameOutcome, GameStatus, InvalidMove, Piece, Rules,
};

fn c(x: u8, y: u8) -> Coord {
    Coord::new(x, y)
}

fn record(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(Box::new(move |event: &GameEvent| {
        sink.borrow_mut().push(event.clone())
    }));
    events
}

fn turn_or_over_events(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::TurnChanged { .. } | GameEvent::GameOver(_)))
        .count()
}

#[test]
fn opening_position_and_moves() {
    let game = Game::default();
    let snapshot = game.board_snapshot();

    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot[&c(3, 3)], Piece::White);
    assert_eq!(snapshot[&c(4, 3)], Piece::Black);
    assert_eq!(snapshot[&c(3, 4)], Piece::Black);
    assert_eq!(snapshot[&c(4, 4)], Piece::White);
    assert_eq!(game.current_turn(), Some(Piece::Black));
    assert_eq!(game.legal_moves(), &[c(3, 2), c(2, 3), c(5, 4), c(4, 5)]);
}

#[test]
fn black_opening_move_flips_one_piece() {
    let mut game = Game::default();

    game.submit_move(Piece::Black, c(2, 3)).unwrap();

    let snapshot = game.board_snapshot();
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot[&c(2, 3)], Piece::Black);
    assert_eq!(snapshot[&c(3, 3)], Piece::Black);
    assert_eq!(snapshot[&c(4, 3)], Piece::Black);
    assert_eq!(snapshot[&c(3, 4)], Piece::Black);
    assert_eq!(snapshot[&c(4, 4)], Piece::White);
    assert_eq!(game.current_turn(), Some(Piece::White));
}

#[test]
fn white_reply_flips_along_the_row() {
    let mut game = Game::default();
    game.submit_move(Piece::Black, c(2, 3)).unwrap();

    // (2,4) east: (3,4) black, (4,4) white.
    assert!(game.legal_moves().contains(&c(2, 4)));
    game.submit_move(Piece::White, c(2, 4)).unwrap();

    assert_eq!(game.board().get(c(3, 4)), Some(Piece::White));
    assert_eq!(game.board().count(Piece::Black), 3);
    assert_eq!(game.board().count(Piece::White), 3);
    assert_eq!(game.current_turn(), Some(Piece::Black));
}

#[test]
fn rejected_move_leaves_everything_unchanged() {
    let mut game = Game::default();
    let events = record(&mut game);
    let before = game.board_snapshot();

    for (color, coord) in [
        (Piece::Black, c(0, 0)),
        (Piece::Black, c(4, 4)),
        (Piece::Black, c(9, 9)),
        (Piece::White, c(4, 2)),
    ] {
        assert!(game.submit_move(color, coord).is_err());
    }

    assert_eq!(game.board_snapshot(), before);
    assert_eq!(game.current_turn(), Some(Piece::Black));
    assert_eq!(game.legal_moves().len(), 4);
    assert!(events.borrow().is_empty());
}

#[test]
fn auto_pass_moves_the_turn_without_touching_the_board() {
    // After black plays (2,0) white has no reply, black still has (0,2).
    let board = Board::from_rows(&[
        "BW..", //
        "W...",
        "....",
        "....",
    ])
    .unwrap();
    let mut game = Game::from_position(board, Piece::Black).unwrap();
    let events = record(&mut game);

    assert_eq!(game.legal_moves(), &[c(2, 0), c(0, 2)]);
    game.submit_move(Piece::Black, c(2, 0)).unwrap();
    let after_move = game.board_snapshot();

    assert_eq!(game.current_turn(), Some(Piece::Black));
    assert!(game.previous_passed());
    assert!(game.to_view().is_pass);
    assert!(!game.is_game_over());
    assert_eq!(game.legal_moves(), &[c(0, 2)]);
    assert_eq!(game.board_snapshot(), after_move);
    assert_eq!(
        events.borrow().as_slice(),
        &[
            GameEvent::Placed {
                coord: c(2, 0),
                piece: Piece::Black
            },
            GameEvent::Flipped {
                coord: c(1, 0),
                piece: Piece::Black
            },
            GameEvent::TurnChanged {
                piece: Piece::White,
                after_pass: false
            },
            GameEvent::TurnChanged {
                piece: Piece::Black,
                after_pass: true
            },
        ]
    );

    // Black's last capture leaves white without a piece.
    game.submit_move(Piece::Black, c(0, 2)).unwrap();
    assert!(game.is_game_over());
    assert_eq!(game.outcome().unwrap().winner(), Some(Piece::Black));
}

#[test]
fn double_pass_ends_the_game_with_a_winner() {
    let board = Board::from_rows(&[
        "BB..", //
        "....",
        "....",
        "...W",
    ])
    .unwrap();

    let game = Game::from_position(board, Piece::White).unwrap();

    assert_eq!(
        game.status(),
        &GameStatus::GameOver(GameOutcome {
            winners: vec![Piece::Black],
            black_count: 2,
            white_count: 1,
        })
    );
    assert_eq!(game.current_turn(), None);
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.outcome().unwrap().to_string(), "BLACK wins!");
}

#[test]
fn double_pass_with_equal_counts_is_a_tie() {
    let board = Board::from_rows(&[
        "BB..", //
        "....",
        "....",
        "..WW",
    ])
    .unwrap();
    let game = Game::from_position(board, Piece::Black).unwrap();

    let outcome = game.outcome().unwrap();
    assert!(outcome.is_tie());
    assert_eq!(outcome.winners, vec![Piece::Black, Piece::White]);
    assert_eq!(outcome.to_string(), "BLACK and WHITE tie.");
}

#[test]
fn game_over_then_reset_starts_a_new_game() {
    let board = Board::from_rows(&["BBBB", "BBBB", "BBBB", "BBB."]).unwrap();
    let mut game = Game::from_position(board, Piece::White).unwrap();
    assert!(game.is_game_over());
    assert_eq!(game.submit_move(Piece::White, c(3, 3)), Err(InvalidMove::GameOver));

    game.reset();

    assert!(!game.is_game_over());
    assert_eq!(game.current_turn(), Some(Piece::Black));
    assert_eq!(game.board(), &Board::initial(4));
    assert_eq!(game.legal_moves(), &[c(1, 0), c(0, 1), c(3, 2), c(2, 3)]);
}

#[test]
fn every_accepted_move_produces_one_turn_or_game_over_event() {
    let mut game = Game::default();
    let events = record(&mut game);

    // Play the first legal move until the game ends.
    let mut moves: u16 = 0;
    while let Some(color) = game.current_turn() {
        let before = events.borrow().len();
        let coord = game.legal_moves()[0];
        let flips = Rules::new(8).captures(game.board(), color, coord);

        game.submit_move(color, coord).unwrap();
        moves += 1;

        let emitted = events.borrow()[before..].to_vec();
        let placed = emitted
            .iter()
            .filter(|e| matches!(e, GameEvent::Placed { .. }))
            .count();
        let flipped: Vec<Coord> = emitted
            .iter()
            .filter_map(|e| match e {
                GameEvent::Flipped { coord, .. } => Some(*coord),
                _ => None,
            })
            .collect();
        assert_eq!(placed, 1);
        assert_eq!(flipped, flips);

        let passes = emitted
            .iter()
            .filter(|e| matches!(e, GameEvent::TurnChanged { after_pass: true, .. }))
            .count();
        // One for the move itself, plus one per auto-pass (the final double pass
        // reports game over instead of a second turn change).
        assert_eq!(turn_or_over_events(&emitted), 1 + passes + usize::from(game.is_game_over()));
    }

    // Pieces are never removed, so every move adds exactly one.
    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.black_count + outcome.white_count, 4 + moves);
    assert_eq!(game.board().empty_count(), 60 - moves);
}
