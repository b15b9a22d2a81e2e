use thiserror::Error;

/// Uniform error shape for every backend call. Services return this
/// unchanged; controllers fold it into their `last_error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("not authorized ({status})")]
    Unauthorized { status: u16 },
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Errors raised while wiring up the client, before any request is made.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("http client setup failed: {0}")]
    Http(#[from] ApiError),
    #[error("credential store unavailable: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("data directory unavailable: {0}")]
    Io(#[from] std::io::Error),
}
