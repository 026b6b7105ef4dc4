use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProximityError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Matrix is singular")]
    SingularMatrix,

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for ProximityError {
    fn from(err: serde_json::Error) -> Self {
        ProximityError::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProximityError>;
