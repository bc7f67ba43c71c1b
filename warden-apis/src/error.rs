use thiserror::Error;

/// Failures talking to an upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API reported failure: {0}")]
    Unsuccessful(String),

    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl ApiError {
    /// HTTP status to show users when the upstream rejected the request.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Http(source) => source.status(),
            _ => None,
        }
    }
}
