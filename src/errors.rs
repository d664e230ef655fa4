// errors.rs
use astra::Response;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, parameter validation) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    /// The per-request query deadline passed and SQLite interrupted the statement.
    #[error("Query timed out")]
    Timeout,

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::DbError(_) | ServerError::InternalError(_) => 500,
            ServerError::Timeout => 503,
        }
    }

    /// Message safe to hand back to the client. Store and internal details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::DbError(_) | ServerError::InternalError(_) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::OperationInterrupted) => ServerError::Timeout,
            _ => ServerError::DbError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::InternalError(format!("JSON encoding failed: {err}"))
    }
}
