use crate::core::{board::Board, player::Symbol, rule_helper};
use serde::Serialize;
use tracing::instrument;

/// Three cell indices that win when uniformly marked.
pub type Line = [usize; 3];

/// Rows, then columns, then diagonals. Enumeration order decides which
/// symbol is reported when several lines complete at once.
pub const LINES: [Line; rule_helper::NUM_LINES] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[readonly::make]
pub struct WinResult {
    pub winner: Symbol,
    pub winning_lines: Vec<Line>,
}

impl WinResult {
    pub fn contains_cell(&self, cell: usize) -> bool {
        self.winning_lines.iter().any(|line| line.contains(&cell))
    }
}

/// Symbol filling every cell of `line`, if any.
pub fn line_owner<'a>(board: &'a Board, line: &Line) -> Option<&'a Symbol> {
    let [a, b, c] = *line;
    let symbol = board.cell(a)?;
    (board.cell(b) == Some(symbol) && board.cell(c) == Some(symbol)).then_some(symbol)
}

/// Every completed line on `board`; `None` when nothing is complete.
/// A full board without a completed line is still `None`.
#[instrument(level = "trace", skip_all)]
pub fn evaluate(board: &Board) -> Option<WinResult> {
    let mut winner: Option<&Symbol> = None;
    let mut winning_lines = Vec::new();

    for line in &LINES {
        if let Some(symbol) = line_owner(board, line) {
            winner.get_or_insert(symbol);
            winning_lines.push(*line);
        }
    }

    winner.map(|winner| WinResult {
        winner: winner.clone(),
        winning_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_win() {
        assert_eq!(evaluate(&Board::empty()), None);
    }

    #[test]
    fn incomplete_lines_are_not_wins() {
        assert_eq!(evaluate(&Board::from_marks("XX. OO. ...")), None);
        assert_eq!(evaluate(&Board::from_marks("XOX .X. O.O")), None);
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        assert_eq!(evaluate(&Board::from_marks("XXO ... ...")), None);
    }

    #[test]
    fn each_line_is_detected_alone() {
        for line in LINES {
            let mut marks = ['.'; rule_helper::NUM_CELLS];
            for cell in line {
                marks[cell] = 'O';
            }
            let board = Board::from_marks(&marks.iter().collect::<String>());

            let result = evaluate(&board).expect("line should win");
            assert_eq!(result.winner.as_str(), "O");
            assert_eq!(result.winning_lines, vec![line]);
        }
    }

    #[test]
    fn row_and_column_through_shared_corner_give_two_lines() {
        let board = Board::from_marks("XXX XOO XO.");
        let result = evaluate(&board).unwrap();

        assert_eq!(result.winner.as_str(), "X");
        assert_eq!(result.winning_lines, vec![[0, 1, 2], [0, 3, 6]]);
        assert!(result.contains_cell(6));
        assert!(!result.contains_cell(4));
    }

    #[test]
    fn winner_comes_from_first_line_in_enumeration_order() {
        // Not reachable through play, but evaluate is defined on any board.
        let board = Board::from_marks("OOO ... XXX");
        let result = evaluate(&board).unwrap();

        assert_eq!(result.winner.as_str(), "O");
        assert_eq!(result.winning_lines, vec![[0, 1, 2], [6, 7, 8]]);
    }

    #[test]
    fn full_board_without_line_is_not_a_win() {
        assert_eq!(evaluate(&Board::from_marks("XOX OXX OXO")), None);
    }
}
