use crate::core::{game_state::GameError, rule_helper};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's mark, e.g. `X`. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Result<Self, GameError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GameError::InvalidSymbol { symbol: text });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = GameError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cyclic turn order. The player to act at move index `m` is
/// `symbols[m % symbols.len()]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct PlayerRotation {
    symbols: Vec<Symbol>,
}

impl PlayerRotation {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, GameError> {
        let symbols = symbols.into_iter().collect::<Vec<_>>();

        if symbols.is_empty() {
            return Err(GameError::InvalidRotation {
                reason: "at least one player is required".to_string(),
            });
        }

        if !symbols.iter().all_unique() {
            return Err(GameError::InvalidRotation {
                reason: format!("duplicate symbols in [{}]", symbols.iter().join(", ")),
            });
        }

        Ok(Self { symbols })
    }

    pub fn from_texts<S: AsRef<str>>(texts: impl IntoIterator<Item = S>) -> Result<Self, GameError> {
        let symbols = texts
            .into_iter()
            .map(|text| Symbol::new(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbols)
    }

    /// Parses a comma-separated list such as `X,O` or `A, B, C`.
    pub fn parse_list(text: &str) -> Result<Self, GameError> {
        Self::from_texts(text.split(',').map(str::trim))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn active_for(&self, move_index: usize) -> &Symbol {
        &self.symbols[move_index % self.symbols.len()]
    }
}

impl Default for PlayerRotation {
    fn default() -> Self {
        Self {
            symbols: rule_helper::DEFAULT_PLAYER_SYMBOLS
                .iter()
                .map(|text| Symbol((*text).to_string()))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Symbol>> for PlayerRotation {
    type Error = GameError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<PlayerRotation> for Vec<Symbol> {
    fn from(rotation: PlayerRotation) -> Self {
        rotation.symbols
    }
}

impl fmt::Display for PlayerRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rotation_is_x_then_o() {
        let rotation = PlayerRotation::default();
        assert_eq!(rotation.to_string(), "X,O");
        assert_eq!(rotation.active_for(0).as_str(), "X");
        assert_eq!(rotation.active_for(1).as_str(), "O");
        assert_eq!(rotation.active_for(8).as_str(), "X");
    }

    #[test]
    fn three_player_rotation_cycles_by_position() {
        let rotation = PlayerRotation::parse_list("A, B, C").unwrap();
        let order = (0..7)
            .map(|move_index| rotation.active_for(move_index).to_string())
            .collect::<String>();
        assert_eq!(order, "ABCABCA");
    }

    #[test]
    fn rotation_rejects_empty_and_duplicates() {
        assert!(matches!(
            PlayerRotation::new(Vec::new()),
            Err(GameError::InvalidRotation { .. })
        ));
        assert!(matches!(
            PlayerRotation::parse_list("X,X"),
            Err(GameError::InvalidRotation { .. })
        ));
        assert!(matches!(
            PlayerRotation::parse_list("X,,O"),
            Err(GameError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn symbols_serialize_as_plain_strings() {
        let rotation = PlayerRotation::default();
        assert_eq!(serde_json::to_string(&rotation).unwrap(), r#"["X","O"]"#);

        let parsed: PlayerRotation = serde_json::from_str(r#"["🐱","🐶"]"#).unwrap();
        assert_eq!(parsed.active_for(1).as_str(), "🐶");

        assert!(serde_json::from_str::<PlayerRotation>("[]").is_err());
        assert!(serde_json::from_str::<Symbol>(r#""""#).is_err());
    }
}
