use thiserror::Error;

#[derive(Debug, Error)]
pub enum LimsError {
    /// A resource key that is in neither the fixture nor the server registry.
    #[error("unknown resource: {key}")]
    UnknownResource { key: String },

    /// A vocabulary scope with no exact match and no regex match.
    #[error("unknown vocabulary scope: {scope}")]
    UnknownVocabulary { scope: String },

    /// HTTP-layer failure, carrying the status when one was received.
    #[error("network fetch failed ({}): {text}", .status.map_or("no status".to_string(), |s| s.to_string()))]
    NetworkFetch { status: Option<u16>, text: String },

    /// Malformed field metadata or fixture entry. Non-fatal: callers log and
    /// continue in a degraded mode.
    #[error("configuration warning: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, LimsError>;
