use js_sys::{Array, Uint8Array};
use tracing::warn;
use wasm_bindgen::prelude::*;

pub mod core;

use crate::core::{
    game_state::GameState,
    location,
    move_list::{self, MoveListOrder},
    player::PlayerRotation,
    rule_helper,
    view::GameView,
};

/// Browser-facing controller for one game. The page owns the move-list order
/// and passes it in; the handle only holds the game record.
#[wasm_bindgen]
pub struct GameHandle {
    game: GameState,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn summary(&self, indentation_level: usize) -> String {
        self.game.summary(indentation_level)
    }

    #[wasm_bindgen(js_name = "applyMove")]
    pub fn apply_move(&mut self, cell: usize) -> bool {
        self.game.apply_move(cell)
    }

    #[wasm_bindgen(js_name = "jumpTo")]
    pub fn jump_to(&mut self, move_index: usize) -> bool {
        self.game.jump_to(move_index).is_ok()
    }

    #[wasm_bindgen(js_name = "currentMove")]
    pub fn current_move(&self) -> usize {
        self.game.current_move()
    }

    #[wasm_bindgen(js_name = "lastMove")]
    pub fn last_move(&self) -> usize {
        self.game.last_move()
    }

    #[wasm_bindgen(js_name = "statusText")]
    pub fn status_text(&self) -> String {
        self.game.status().to_string()
    }

    #[wasm_bindgen(js_name = "isGameOver")]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Marks of the viewed board, `""` for empty cells.
    pub fn cells(&self) -> Vec<String> {
        self.game
            .current_board()
            .cells()
            .iter()
            .map(|mark| mark.as_ref().map(|symbol| symbol.to_string()).unwrap_or_default())
            .collect()
    }

    #[wasm_bindgen(js_name = "isWinningCell")]
    pub fn is_winning_cell(&self, cell: usize) -> bool {
        self.game
            .win()
            .is_some_and(|win| win.contains_cell(cell))
    }

    /// Array of `Uint8Array` index triples.
    #[wasm_bindgen(js_name = "winningLines")]
    pub fn winning_lines(&self) -> Array {
        self.game
            .winning_lines()
            .iter()
            .map(|line| {
                let cells = line.map(|cell| cell as u8);
                Uint8Array::from(&cells[..])
            })
            .collect()
    }

    #[wasm_bindgen(js_name = "moveDescriptions")]
    pub fn move_descriptions(&self, is_ascending: bool) -> Vec<String> {
        move_list::describe_moves(
            self.game.history(),
            self.game.current_move(),
            MoveListOrder::from_ascending(is_ascending),
        )
        .iter()
        .map(|desc| desc.to_string())
        .collect()
    }

    pub fn view(&self, is_ascending: bool) -> Result<JsValue, JsValue> {
        let view = GameView::project(&self.game, MoveListOrder::from_ascending(is_ascending));
        serde_wasm_bindgen::to_value(&view).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = "viewJson")]
    pub fn view_json(&self, is_ascending: bool) -> String {
        GameView::project(&self.game, MoveListOrder::from_ascending(is_ascending))
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Query string for `history.pushState`, or `""` if encoding failed. A
    /// failed encode leaves the game as it is.
    #[wasm_bindgen(js_name = "locationQuery")]
    pub fn location_query(&self) -> String {
        location::encode(&self.game).unwrap_or_else(|err| {
            warn!(%err, "could not encode location");
            String::new()
        })
    }

    /// Replaces the game with the one in `query`, as on `popstate`.
    #[wasm_bindgen(js_name = "restoreLocation")]
    pub fn restore_location(&mut self, query: &str) {
        self.game = location::restore_or_default(query);
    }
}

#[wasm_bindgen(js_name = "newGame")]
pub fn new_game(players: Vec<String>) -> Result<GameHandle, JsValue> {
    let players = if players.is_empty() {
        PlayerRotation::default()
    } else {
        PlayerRotation::from_texts(players).map_err(|err| JsValue::from_str(&err.to_string()))?
    };
    Ok(GameHandle {
        game: GameState::new(players),
    })
}

#[wasm_bindgen(js_name = "gameFromLocation")]
pub fn game_from_location(query: &str) -> GameHandle {
    GameHandle {
        game: location::restore_or_default(query),
    }
}

#[wasm_bindgen(js_name = "cellCount")]
pub fn cell_count() -> usize {
    rule_helper::NUM_CELLS
}
