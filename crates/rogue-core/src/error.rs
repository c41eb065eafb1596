use thiserror::Error;

#[derive(Debug, Error)]
pub enum RogueError {
    #[error("not initialized: run 'rogue init'")]
    NotInitialized,

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid decision type: {0}")]
    InvalidDecisionType(String),

    #[error("unknown trait: {0}")]
    UnknownTrait(String),

    #[error("corrupt saved state: {0}")]
    CorruptState(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RogueError>;
