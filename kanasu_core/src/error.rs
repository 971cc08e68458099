use thiserror::Error;

/// Errors surfaced by the Kanasu domain layer.
#[derive(Error, Debug)]
pub enum KanasuError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("At most {max} interests can be selected")]
    InterestLimit { max: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("No user is signed in")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, KanasuError>;
