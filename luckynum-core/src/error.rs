use thiserror::Error;

pub type Result<T> = std::result::Result<T, LuckyError>;

#[derive(Error, Debug)]
pub enum LuckyError {
    #[error("Please enter a number")]
    EmptyInput,

    #[error("This number has already been added")]
    DuplicateNumber(String),

    #[error("Number not found: {0}")]
    NumberNotFound(String),

    #[error("Please add some numbers first")]
    EmptyPool,

    #[error("Not enough valid combinations possible with these digits. Please add different numbers.")]
    InsufficientCombinations {
        drawn: usize,
        needed: usize,
        attempts: u32,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LuckyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    /// Errors the user can fix by changing their input.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::DuplicateNumber(_)
                | Self::NumberNotFound(_)
                | Self::EmptyPool
                | Self::InsufficientCombinations { .. }
        )
    }
}
