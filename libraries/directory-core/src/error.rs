/// Core error types for the user directory
use thiserror::Error;

/// A filter value that is not one of the accepted spellings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFilterError {
    /// Gender other than `male` / `female`
    #[error("Unknown gender: {0}")]
    Gender(String),

    /// Role other than `admin` / `moderator` / `user`
    #[error("Unknown role: {0}")]
    Role(String),

    /// Filter key other than `gender` / `role`
    #[error("Unknown filter key: {0}")]
    Key(String),
}
