use thiserror::Error;

/// Failures while decoding a backend response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unexpected response shape: {0}")]
    Malformed(#[from] serde_json::Error),
}
