/// All errors that can occur while loading, validating or joining games.
#[derive(thiserror::Error, Debug)]
pub enum WgnError {
    /// A game record or config value failed validation.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The game catalog could not provide any data.
    #[error("game source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The feed or config payload is not valid JSON of the expected shape.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// No game with this id exists in the current catalog snapshot.
    #[error("game {game_id} not found")]
    GameNotFound { game_id: String },
}

impl WgnError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        WgnError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn unavailable(source_name: &str, reason: impl Into<String>) -> Self {
        WgnError::SourceUnavailable {
            source_name: source_name.to_owned(),
            reason: reason.into(),
        }
    }

    /// Whether this is a record/config validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, WgnError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, WgnError>;
