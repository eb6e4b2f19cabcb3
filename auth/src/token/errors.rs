use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token could not be parsed: {0}")]
    Malformed(String),

    #[error("Token carries no subject")]
    MissingSubject,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
