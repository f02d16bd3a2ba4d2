use num::Integer;

pub const BOARD_SIDE: usize = 3;
pub const NUM_CELLS: usize = BOARD_SIDE * BOARD_SIDE;
pub const NUM_LINES: usize = 8;

pub const DEFAULT_PLAYER_SYMBOLS: [&str; 2] = ["X", "O"];

pub const GAME_START_TEXT: &str = "Go to game start";
pub const DRAW_TEXT: &str = "Cats game!";

/// Zero-based (row, col) of a cell index.
pub fn to_row_col(cell: usize) -> (usize, usize) {
    cell.div_rem(&BOARD_SIDE)
}

/// One-based (row, col) of a cell index, as shown to players.
pub fn to_display_row_col(cell: usize) -> (usize, usize) {
    let (row, col) = to_row_col(cell);
    (row + 1, col + 1)
}

pub fn from_display_row_col(row: usize, col: usize) -> Option<usize> {
    if (1..=BOARD_SIDE).contains(&row) && (1..=BOARD_SIDE).contains(&col) {
        Some((row - 1) * BOARD_SIDE + (col - 1))
    } else {
        None
    }
}

pub fn is_valid_cell(cell: usize) -> bool {
    cell < NUM_CELLS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_follow_row_major_order() {
        assert_eq!(to_row_col(0), (0, 0));
        assert_eq!(to_row_col(5), (1, 2));
        assert_eq!(to_row_col(7), (2, 1));
        assert_eq!(to_display_row_col(8), (3, 3));
    }

    #[test]
    fn display_row_col_round_trips_every_cell() {
        for cell in 0..NUM_CELLS {
            let (row, col) = to_display_row_col(cell);
            assert_eq!(from_display_row_col(row, col), Some(cell));
        }
    }

    #[test]
    fn display_row_col_rejects_outside_board() {
        assert_eq!(from_display_row_col(0, 1), None);
        assert_eq!(from_display_row_col(1, 4), None);
        assert!(!is_valid_cell(NUM_CELLS));
    }
}
