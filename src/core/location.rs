//! Game state carried in the page address.
//!
//! A location query holds three parameters, each the percent-encoded base64
//! of a JSON value:
//!
//! ```text
//! history=<[[null|"X", ...9 cells], ...]>&move_i=<integer>&players=<["X","O"]>
//! ```
//!
//! Decoding replays the history through [`GameState::from_parts`], so any
//! token that decodes describes a state reachable by play.

use crate::core::{
    board::Board,
    game_state::{GameError, GameState},
    player::PlayerRotation,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use derive_more::{Display, Error, From};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

pub const HISTORY_PARAM: &str = "history";
pub const MOVE_PARAM: &str = "move_i";
pub const PLAYERS_PARAM: &str = "players";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Display, Error, From)]
pub enum DecodeError {
    #[display("parameter {param} is not valid base64: {source}")]
    Base64 {
        param: &'static str,
        source: base64::DecodeError,
    },
    #[display("parameter {param} is not valid JSON: {source}")]
    Json {
        param: &'static str,
        source: serde_json::Error,
    },
    #[display("decoded state is not reachable: {_0}")]
    #[from]
    Game(GameError),
}

/// Raw parameters of a location query. Any of them may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[readonly::make]
pub struct LocationParams {
    pub history: Option<Vec<Board>>,
    pub move_index: Option<usize>,
    pub players: Option<PlayerRotation>,
}

impl LocationParams {
    /// Parses a query string. A leading `?` and whitespace are ignored, as are
    /// unknown parameters; when a parameter repeats the last one wins.
    pub fn parse(query: &str) -> Result<Self, DecodeError> {
        let compact = query
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>();
        let compact = compact.strip_prefix('?').unwrap_or(&compact);

        let mut params = Self::default();
        for pair in compact.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                HISTORY_PARAM => params.history = Some(decode_param(HISTORY_PARAM, value)?),
                MOVE_PARAM => params.move_index = Some(decode_param(MOVE_PARAM, value)?),
                PLAYERS_PARAM => params.players = Some(decode_param(PLAYERS_PARAM, value)?),
                _ => {}
            }
        }

        Ok(params)
    }

    /// Fills missing parameters with the starting values and validates the
    /// result.
    pub fn into_game_state(self) -> Result<GameState, GameError> {
        GameState::from_parts(
            self.history.unwrap_or_else(|| vec![Board::empty()]),
            self.move_index.unwrap_or(0),
            self.players.unwrap_or_default(),
        )
    }
}

/// Query string (without `?`) describing `game` exactly.
#[instrument(level = "debug", skip_all, fields(current_move = game.current_move()))]
pub fn encode(game: &GameState) -> Result<String, serde_json::Error> {
    Ok(format!(
        "{HISTORY_PARAM}={}&{MOVE_PARAM}={}&{PLAYERS_PARAM}={}",
        encode_param(game.history())?,
        encode_param(&game.current_move())?,
        encode_param(game.players())?,
    ))
}

#[instrument(level = "debug", skip_all)]
pub fn decode(query: &str) -> Result<GameState, DecodeError> {
    Ok(LocationParams::parse(query)?.into_game_state()?)
}

/// Decodes `query`, falling back to `fallback()` when it is malformed or
/// describes an impossible game. Missing parameters are not malformed.
pub fn restore_or_else(query: &str, fallback: impl FnOnce() -> GameState) -> GameState {
    match decode(query) {
        Ok(game) => game,
        Err(err) => {
            warn!(%err, "discarding location state");
            fallback()
        }
    }
}

pub fn restore_or_default(query: &str) -> GameState {
    restore_or_else(query, GameState::default)
}

fn encode_param<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let base64 = STANDARD.encode(json);
    Ok(utf8_percent_encode(&base64, URI_COMPONENT).to_string())
}

fn decode_param<T: DeserializeOwned>(param: &'static str, value: &str) -> Result<T, DecodeError> {
    let base64 = percent_decode_str(value).collect::<Vec<u8>>();
    let json = STANDARD
        .decode(base64)
        .map_err(|source| DecodeError::Base64 { param, source })?;
    serde_json::from_slice(&json).map_err(|source| DecodeError::Json { param, source })
}
