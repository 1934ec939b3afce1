use thiserror::Error;

pub type Result<T> = std::result::Result<T, BolitaError>;

#[derive(Error, Debug)]
pub enum BolitaError {
    #[error("Invalid game mode: {0}")]
    InvalidGameMode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BolitaError {
    pub fn invalid_game_mode(msg: impl Into<String>) -> Self {
        Self::InvalidGameMode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
