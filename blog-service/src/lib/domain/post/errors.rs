use thiserror::Error;

/// Error for post content validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostContentError {
    #[error("A post needs exactly one of text, files, or link")]
    ExactlyOneRequired,
}

/// Top-level error for post and like operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post content: {0}")]
    InvalidContent(#[from] PostContentError),

    #[error("Post not found: {0}")]
    NotFound(i64),

    #[error("Only the author may delete a post")]
    Forbidden,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        PostError::Unknown(err.to_string())
    }
}

/// Error for media storage operations
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("Media write failed: {0}")]
    Io(String),
}
