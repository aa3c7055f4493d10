use thiserror::Error;

use lims_model::LimsError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or HTTP-status failure.
    #[error("request failed ({}): {text}", .status.map_or("no status".to_string(), |s| s.to_string()))]
    Network { status: Option<u16>, text: String },

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The download cookie never appeared within the bounded polling
    /// attempts.
    #[error("download {download_id} did not complete after {attempts} polls")]
    DownloadTimeout { download_id: u64, attempts: u32 },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network {
            status: err.status().map(|s| s.as_u16()),
            text: err.to_string(),
        }
    }
}

impl From<ApiError> for LimsError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network { status, text } => LimsError::NetworkFetch { status, text },
            other => LimsError::NetworkFetch {
                status: None,
                text: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
