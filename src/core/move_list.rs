use crate::core::{board::Board, player::Symbol, rule_helper};
use serde::Serialize;
use std::fmt;

/// Display order of the move list. Owned by whoever renders the list; the
/// game record never sees it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveListOrder {
    #[default]
    Ascending,
    Descending,
}

impl MoveListOrder {
    pub fn from_ascending(is_ascending: bool) -> Self {
        if is_ascending {
            MoveListOrder::Ascending
        } else {
            MoveListOrder::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == MoveListOrder::Ascending
    }

    pub fn toggled(self) -> Self {
        Self::from_ascending(!self.is_ascending())
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveListOrder::Ascending => "Ascending ^",
            MoveListOrder::Descending => "Descending v",
        }
    }
}

/// The mark a move added, with its one-based row and column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[readonly::make]
pub struct PlacedMark {
    pub player: Symbol,
    pub cell: usize,
    pub row: usize,
    pub col: usize,
}

impl PlacedMark {
    pub fn new(player: Symbol, cell: usize) -> Self {
        let (row, col) = rule_helper::to_display_row_col(cell);
        Self {
            player,
            cell,
            row,
            col,
        }
    }
}

impl fmt::Display for PlacedMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {} chose row {} col {}",
            self.player, self.row, self.col
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[readonly::make]
pub struct MoveDescription {
    pub move_index: usize,
    pub placed: Option<PlacedMark>,
    pub is_current: bool,
}

impl fmt::Display for MoveDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.placed {
            Some(placed) => write!(f, "{placed}"),
            None => f.write_str(rule_helper::GAME_START_TEXT),
        }
    }
}

/// First cell that is empty in `prev` and marked in `next`.
pub fn changed_cell(prev: &Board, next: &Board) -> Option<usize> {
    prev.cells()
        .iter()
        .zip(next.cells())
        .position(|(before, after)| before.is_none() && after.is_some())
}

/// The mark added by move `move_index`. Move 0 never has one.
pub fn placed_mark(history: &[Board], move_index: usize) -> Option<PlacedMark> {
    if move_index == 0 {
        return None;
    }

    let prev = history.get(move_index - 1)?;
    let next = history.get(move_index)?;
    let cell = changed_cell(prev, next)?;
    let player = next.cell(cell)?.clone();
    Some(PlacedMark::new(player, cell))
}

/// One entry per snapshot, ordered for display. Each entry keeps its real
/// move index whichever way the list is ordered.
pub fn describe_moves(
    history: &[Board],
    current_move: usize,
    order: MoveListOrder,
) -> Vec<MoveDescription> {
    let descriptions = (0..history.len()).map(|move_index| MoveDescription {
        move_index,
        placed: placed_mark(history, move_index),
        is_current: move_index == current_move,
    });

    match order {
        MoveListOrder::Ascending => descriptions.collect(),
        MoveListOrder::Descending => descriptions.rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::GameState;

    fn sample_game() -> GameState {
        let mut game = GameState::default();
        for cell in [4, 0, 5] {
            game.apply_move(cell);
        }
        game.jump_to(2).unwrap();
        game
    }

    fn texts(descriptions: &[MoveDescription]) -> Vec<String> {
        descriptions.iter().map(|desc| desc.to_string()).collect()
    }

    #[test]
    fn changed_cell_finds_first_new_mark() {
        let prev = Board::from_marks("X........");
        assert_eq!(changed_cell(&prev, &Board::from_marks("X...O....")), Some(4));
        assert_eq!(changed_cell(&prev, &Board::from_marks("XO..O....")), Some(1));
        assert_eq!(changed_cell(&prev, &prev), None);
    }

    #[test]
    fn ascending_list_describes_each_move() {
        let game = sample_game();
        let moves = describe_moves(game.history(), game.current_move(), MoveListOrder::Ascending);

        assert_eq!(
            texts(&moves),
            vec![
                "Go to game start",
                "Player X chose row 2 col 2",
                "Player O chose row 1 col 1",
                "Player X chose row 2 col 3",
            ]
        );
        assert_eq!(
            moves.iter().map(|desc| desc.move_index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            moves.iter().filter(|desc| desc.is_current).map(|desc| desc.move_index).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn descending_list_keeps_move_indices() {
        let game = sample_game();
        let ascending = describe_moves(game.history(), game.current_move(), MoveListOrder::Ascending);
        let descending = describe_moves(game.history(), game.current_move(), MoveListOrder::Descending);

        assert_eq!(descending.len(), ascending.len());
        assert_eq!(descending[0].move_index, 3);
        assert_eq!(descending[3].to_string(), "Go to game start");
        assert_eq!(
            descending.into_iter().rev().collect::<Vec<_>>(),
            ascending
        );
    }

    #[test]
    fn placed_mark_reports_symbol_and_position() {
        let game = sample_game();
        let placed = placed_mark(game.history(), 2).unwrap();
        assert_eq!(placed.player.as_str(), "O");
        assert_eq!((placed.cell, placed.row, placed.col), (0, 1, 1));
        assert_eq!(placed_mark(game.history(), 0), None);
        assert_eq!(placed_mark(game.history(), 9), None);
    }

    #[test]
    fn order_toggle_flips_label() {
        let order = MoveListOrder::default();
        assert_eq!(order.label(), "Ascending ^");
        assert_eq!(order.toggled().label(), "Descending v");
        assert_eq!(order.toggled().toggled(), order);
    }
}
