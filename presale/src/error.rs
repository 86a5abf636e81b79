use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresaleError {
    #[error("request failed with HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("email already registered")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage failure: {0}")]
    StorageFailure(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no users found")]
    NoUsers,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),
}

impl PresaleError {
    /// HTTP status of a failed request, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            PresaleError::RequestFailed { status, .. } => Some(*status),
            PresaleError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for the errors a signed-out user can fix by re-entering details.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            PresaleError::DuplicateEmail
                | PresaleError::InvalidCredentials
                | PresaleError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PresaleError>;
