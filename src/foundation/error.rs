/// Crate-wide result alias.
pub type MasonryResult<T> = Result<T, MasonryError>;

/// Errors surfaced at the configuration and replay boundaries.
///
/// The layout algorithm itself never fails; degraded input collapses to a no-op instead.
#[derive(thiserror::Error, Debug)]
pub enum MasonryError {
    /// Rejected grid configuration (column count, gutter, width).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed scenario event stream.
    #[error("scenario error: {0}")]
    Scenario(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MasonryError {
    /// Build a [`MasonryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MasonryError::Scenario`].
    pub fn scenario(msg: impl Into<String>) -> Self {
        Self::Scenario(msg.into())
    }

    /// Build a [`MasonryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MasonryError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
