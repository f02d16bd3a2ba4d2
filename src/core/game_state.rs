use crate::core::{
    board::Board,
    move_list,
    player::{PlayerRotation, Symbol},
    rule_helper,
    win_detector::{self, Line, WinResult},
};
use derive_more::{Display, Error};
use itertools::Itertools;
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("move index {requested} is out of range (history holds {len} snapshots)")]
    MoveIndexOutOfRange { requested: usize, len: usize },
    #[display("invalid player rotation: {reason}")]
    InvalidRotation { reason: String },
    #[display("invalid player symbol {symbol:?}")]
    InvalidSymbol { symbol: String },
    #[display("invalid history at snapshot {snapshot}: {reason}")]
    InvalidHistory { snapshot: usize, reason: String },
}

/// Derived from the board at the current move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Win(Symbol),
    Draw,
    Turn(Symbol),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Turn(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Win(symbol) => write!(f, "Winner: {symbol}"),
            GameStatus::Draw => f.write_str(rule_helper::DRAW_TEXT),
            GameStatus::Turn(symbol) => write!(f, "Player {symbol}, choose a square!"),
        }
    }
}

/// Authoritative game record: every snapshot since the empty board, the
/// snapshot being viewed, and the turn order.
///
/// `history[0]` is always empty and each later snapshot adds exactly one
/// mark to its predecessor. Snapshots are never edited once appended; a move
/// made while viewing an older snapshot drops everything after it first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    history: Vec<Board>,
    current_move: usize,
    players: PlayerRotation,
}

impl GameState {
    pub fn new(players: PlayerRotation) -> Self {
        Self {
            history: vec![Board::empty()],
            current_move: 0,
            players,
        }
    }

    /// Rebuilds a state from raw parts, replaying every snapshot transition
    /// so that only histories reachable through `apply_move` are accepted.
    pub fn from_parts(
        history: Vec<Board>,
        current_move: usize,
        players: PlayerRotation,
    ) -> Result<Self, GameError> {
        let mut replayed = Self::new(players);

        match history.first() {
            None => {
                return Err(GameError::InvalidHistory {
                    snapshot: 0,
                    reason: "history is empty".to_string(),
                });
            }
            Some(first) if *first != Board::empty() => {
                return Err(GameError::InvalidHistory {
                    snapshot: 0,
                    reason: "first snapshot is not the empty board".to_string(),
                });
            }
            Some(_) => {}
        }

        for (idx, (prev, next)) in history.iter().tuple_windows().enumerate() {
            let snapshot = idx + 1;
            let Some(cell) = move_list::changed_cell(prev, next) else {
                return Err(GameError::InvalidHistory {
                    snapshot,
                    reason: "no newly marked cell".to_string(),
                });
            };

            if !replayed.apply_move(cell) {
                return Err(GameError::InvalidHistory {
                    snapshot,
                    reason: format!("mark on cell {cell} is not a legal move"),
                });
            }

            if replayed.current_board() != next {
                return Err(GameError::InvalidHistory {
                    snapshot,
                    reason: format!(
                        "expected only {} on cell {cell}",
                        replayed.active_player_at(snapshot - 1)
                    ),
                });
            }
        }

        replayed.jump_to(current_move)?;
        Ok(replayed)
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    /// Index of the newest snapshot.
    pub fn last_move(&self) -> usize {
        self.history.len() - 1
    }

    pub fn players(&self) -> &PlayerRotation {
        &self.players
    }

    pub fn current_board(&self) -> &Board {
        &self.history[self.current_move]
    }

    pub fn active_player(&self) -> &Symbol {
        self.active_player_at(self.current_move)
    }

    fn active_player_at(&self, move_index: usize) -> &Symbol {
        self.players.active_for(move_index)
    }

    pub fn win(&self) -> Option<WinResult> {
        win_detector::evaluate(self.current_board())
    }

    pub fn winning_lines(&self) -> Vec<Line> {
        self.win()
            .map(|win| win.winning_lines.clone())
            .unwrap_or_default()
    }

    pub fn status(&self) -> GameStatus {
        if let Some(win) = self.win() {
            GameStatus::Win(win.winner.clone())
        } else if self.current_board().is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Turn(self.active_player().clone())
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    pub fn can_apply_move(&self, cell: usize) -> bool {
        self.current_board().is_empty_cell(cell) && self.win().is_none()
    }

    /// Places the active player's mark on `cell`. Returns `false` and leaves
    /// the state untouched when the cell is taken or off the board, or the
    /// viewed board is already won.
    pub fn apply_move(&mut self, cell: usize) -> bool {
        if !self.can_apply_move(cell) {
            debug!(cell, current_move = self.current_move, "ignoring illegal move");
            return false;
        }

        let symbol = self.active_player().clone();
        let next = self.current_board().with_mark(cell, symbol);
        self.history.truncate(self.current_move + 1);
        self.history.push(next);
        self.current_move = self.last_move();

        debug!(
            cell,
            current_move = self.current_move,
            "applied move"
        );
        true
    }

    /// Views snapshot `move_index` without touching the history. Targets past
    /// the newest snapshot are rejected and the state stays as it was.
    pub fn jump_to(&mut self, move_index: usize) -> Result<(), GameError> {
        if move_index >= self.history.len() {
            warn!(move_index, len = self.history.len(), "rejecting out-of-range jump");
            return Err(GameError::MoveIndexOutOfRange {
                requested: move_index,
                len: self.history.len(),
            });
        }

        self.current_move = move_index;
        debug!(current_move = move_index, "jumped");
        Ok(())
    }

    pub fn summary(&self, indentation_level: usize) -> String {
        let leading_text = " ".repeat(indentation_level);
        let mut sb = format!(
            "{leading_text}Move {} of {}, players {}: {}",
            self.current_move,
            self.last_move(),
            self.players,
            self.status()
        );

        for line in self.current_board().to_string().lines() {
            sb.push_str(&format!("\n{leading_text}  {line}"));
        }

        sb
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PlayerRotation::default())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(0))
    }
}
