use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{Game, GameEvent};
use crate::types::{Coord, Piece};

/// Browser-facing handle around [`Game`].
///
/// Events are queued as they are emitted; JS drains them after each call
/// with [`WasmGame::drain_events`] to drive rendering and animation.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    events: Rc<RefCell<Vec<GameEvent>>>,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(board_size: u8) -> Result<WasmGame, JsError> {
        let mut game = Game::new(GameConfig::with_board_size(board_size))?;
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        game.subscribe(Box::new(move |event: &GameEvent| {
            sink.borrow_mut().push(event.clone())
        }));
        Ok(Self { game, events })
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// 1=black, 2=white, 0 once the game is over.
    pub fn current_turn(&self) -> u8 {
        self.game.current_turn().map_or(0, Piece::to_cell)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.game.legal_moves())?)
    }

    pub fn submit_move(&mut self, color: u8, x: u8, y: u8) -> Result<(), JsError> {
        let color = Piece::from_cell(color)
            .ok_or_else(|| JsError::new(&format!("unknown piece color code {color}")))?;
        self.game.submit_move(color, Coord::new(x, y))?;
        Ok(())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_view())?)
    }

    /// Events emitted since the previous drain, oldest first.
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        let events: Vec<GameEvent> = self.events.borrow_mut().drain(..).collect();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }
}
