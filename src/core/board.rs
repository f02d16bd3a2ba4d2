use crate::core::{player::Symbol, rule_helper};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One immutable 3x3 snapshot, cells in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Option<Symbol>; rule_helper::NUM_CELLS],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Symbol>; rule_helper::NUM_CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Symbol>; rule_helper::NUM_CELLS] {
        &self.cells
    }

    /// Mark at `cell`, or `None` when the cell is empty or off the board.
    pub fn cell(&self, cell: usize) -> Option<&Symbol> {
        self.cells.get(cell).and_then(Option::as_ref)
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        rule_helper::is_valid_cell(cell) && self.cells[cell].is_none()
    }

    pub fn num_marks(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Copy of this board with `symbol` placed on `cell`; `self` is left untouched.
    pub fn with_mark(&self, cell: usize, symbol: Symbol) -> Self {
        debug_assert!(self.is_empty_cell(cell), "cell {cell} must be empty");
        let mut next = self.clone();
        next.cells[cell] = Some(symbol);
        next
    }

    /// Builds a board from nine characters, `.` for empty, e.g. `"XXO.O...."`.
    #[cfg(test)]
    pub(crate) fn from_marks(marks: &str) -> Self {
        let chars = marks.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>();
        assert_eq!(chars.len(), rule_helper::NUM_CELLS, "need nine marks in {marks:?}");
        let mut board = Self::empty();
        for (cell, ch) in chars.into_iter().enumerate() {
            if ch != '.' {
                board.cells[cell] = Some(Symbol::new(ch.to_string()).unwrap());
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, row_cells) in self.cells.chunks(rule_helper::BOARD_SIDE).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            for (col, cell) in row_cells.iter().enumerate() {
                if col > 0 {
                    f.write_str("|")?;
                }
                match cell {
                    Some(symbol) => write!(f, "{symbol}")?,
                    None => write!(f, "{}", row * rule_helper::BOARD_SIDE + col + 1)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("X").unwrap()
    }

    #[test]
    fn empty_board_has_no_marks() {
        let board = Board::empty();
        assert_eq!(board.num_marks(), 0);
        assert!(!board.is_full());
        assert!((0..rule_helper::NUM_CELLS).all(|cell| board.is_empty_cell(cell)));
        assert!(!board.is_empty_cell(rule_helper::NUM_CELLS));
    }

    #[test]
    fn with_mark_leaves_original_snapshot_alone() {
        let before = Board::empty();
        let after = before.with_mark(4, x());

        assert_eq!(before, Board::empty());
        assert_eq!(after.cell(4), Some(&x()));
        assert_eq!(after.num_marks(), 1);
        assert_eq!(after.cell(99), None);
    }

    #[test]
    fn full_board_detected() {
        assert!(Board::from_marks("XOXOXOOXO").is_full());
        assert!(!Board::from_marks("XOXOXOOX.").is_full());
    }

    #[test]
    fn display_numbers_empty_cells() {
        let board = Board::from_marks("X.. .O. ..X");
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|X");
    }

    #[test]
    fn serializes_as_array_of_nullable_strings() {
        let board = Board::from_marks("X...O....");
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X",null,null,null,"O",null,null,null,null]"#);

        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);

        assert!(serde_json::from_str::<Board>("[null,null]").is_err());
    }
}
