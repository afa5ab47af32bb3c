use thiserror::Error;

/// Errors raised by the game core.
///
/// Conditions that are merely "not possible right now" (empty deck, bad
/// discard index) are reported as `None` by the operations themselves and
/// never show up here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown rank `{0}`")]
    UnknownRank(String),

    #[error("unknown suit `{0}`")]
    UnknownSuit(String),

    #[error("cannot resolve a round without players")]
    NoPlayers,

    #[error("player {index} does not exist at a table of {players}")]
    PlayerOutOfRange { index: usize, players: usize },

    #[error("invalid table config: {0}")]
    InvalidConfig(String),

    #[error("could not parse table config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
