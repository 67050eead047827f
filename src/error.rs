use thiserror::Error;

/// Everything that can go wrong while fetching a forecast.
///
/// Both variants carry the underlying error untouched; neither is retried.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The HTTP round trip could not be completed: client construction, DNS, connection or the
    /// request timing out.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON, or a value had the wrong type for its field.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether the request gave up because the client timeout expired.
    pub fn is_timeout(&self) -> bool {
        match self {
            ForecastError::Transport(err) => err.is_timeout(),
            ForecastError::Decode(_) => false,
        }
    }
}
