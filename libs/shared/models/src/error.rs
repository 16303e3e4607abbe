use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error ({status}): {message}")]
    ExternalService { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Maps a non-success HTTP status and its body onto the error taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => AppError::Auth(message),
            404 => AppError::NotFound(message),
            400 | 422 => AppError::BadRequest(message),
            409 => AppError::Conflict(message),
            _ => AppError::ExternalService { status, message },
        }
    }
}
