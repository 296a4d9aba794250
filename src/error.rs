use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypetrialError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource Error: {0}")]
    Resource(String),

    #[error("Roster Error: {0}")]
    Roster(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TypetrialError>;
