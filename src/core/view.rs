use crate::core::{
    game_state::{GameState, GameStatus},
    move_list::{self, MoveListOrder},
};
use serde::Serialize;
use tsify::Tsify;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub index: usize,
    pub mark: Option<String>,
    pub is_winning: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntryView {
    pub move_index: usize,
    pub description: String,
    pub is_current: bool,
}

/// Everything a renderer needs, computed from the game record and the
/// renderer's own list order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub cells: Vec<CellView>,
    pub status_text: String,
    pub winner: Option<String>,
    pub is_draw: bool,
    pub active_player: Option<String>,
    pub history: Vec<Vec<Option<String>>>,
    pub current_move: usize,
    pub winning_lines: Vec<Vec<usize>>,
    pub moves: Vec<MoveEntryView>,
    pub is_ascending: bool,
    pub order_label: String,
}

impl GameView {
    pub fn project(game: &GameState, order: MoveListOrder) -> Self {
        let win = game.win();
        let status = game.status();

        let cells = game
            .current_board()
            .cells()
            .iter()
            .enumerate()
            .map(|(index, mark)| CellView {
                index,
                mark: mark.as_ref().map(|symbol| symbol.to_string()),
                is_winning: win.as_ref().is_some_and(|win| win.contains_cell(index)),
            })
            .collect();

        let history = game
            .history()
            .iter()
            .map(|board| {
                board
                    .cells()
                    .iter()
                    .map(|mark| mark.as_ref().map(|symbol| symbol.to_string()))
                    .collect()
            })
            .collect();

        let moves = move_list::describe_moves(game.history(), game.current_move(), order)
            .into_iter()
            .map(|desc| MoveEntryView {
                move_index: desc.move_index,
                description: desc.to_string(),
                is_current: desc.is_current,
            })
            .collect();

        let (winner, is_draw, active_player) = match &status {
            GameStatus::Win(symbol) => (Some(symbol.to_string()), false, None),
            GameStatus::Draw => (None, true, None),
            GameStatus::Turn(symbol) => (None, false, Some(symbol.to_string())),
        };

        Self {
            cells,
            status_text: status.to_string(),
            winner,
            is_draw,
            active_player,
            history,
            current_move: game.current_move(),
            winning_lines: game
                .winning_lines()
                .iter()
                .map(|line| line.to_vec())
                .collect(),
            moves,
            is_ascending: order.is_ascending(),
            order_label: order.label().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
