use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeprodError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid session type: {0}")]
    InvalidSessionType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
