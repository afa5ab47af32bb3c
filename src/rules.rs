use serde::{Deserialize, Serialize};

use crate::deck::STANDARD_DECK_SIZE;
use crate::error::{GameError, GameResult};

pub(crate) fn default_num_players() -> usize {
    2
}

pub(crate) fn default_hand_size() -> usize {
    3
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default = "default_num_players")]
    pub num_players: usize,
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    /// Fixed shuffle seed; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            num_players: default_num_players(),
            hand_size: default_hand_size(),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects tables that cannot be dealt from one deck. One card is kept
    /// back to start the discard pile.
    pub fn validate(&self) -> GameResult<()> {
        if self.num_players == 0 {
            return Err(GameError::InvalidConfig("at least one player is required".into()));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand size must be positive".into()));
        }
        let dealt = self.num_players.saturating_mul(self.hand_size);
        if dealt >= STANDARD_DECK_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "{} players with {} cards each need {} cards, the deck has {}",
                self.num_players, self.hand_size, dealt, STANDARD_DECK_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = TableConfig::from_json("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.num_players, 2);
        assert_eq!(config.hand_size, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn reads_camel_case_fields() {
        let config = TableConfig::from_json(r#"{"numPlayers": 4, "handSize": 3, "seed": 42}"#).unwrap();
        assert_eq!(config.num_players, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_tables_larger_than_the_deck() {
        let err = TableConfig::from_json(r#"{"numPlayers": 18}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_tables() {
        assert!(matches!(
            TableConfig::from_json(r#"{"numPlayers": 0}"#),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::from_json(r#"{"handSize": 0}"#),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(TableConfig::from_json("{"), Err(GameError::Config(_))));
    }
}
