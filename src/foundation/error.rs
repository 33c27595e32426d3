/// Convenience result type used across tickerline.
pub type TickerResult<T> = Result<T, TickerError>;

/// Top-level error taxonomy used by engine and host APIs.
#[derive(thiserror::Error, Debug)]
pub enum TickerError {
    /// Invalid user-provided configuration or page data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Stale node handles or structurally invalid document operations.
    #[error("dom error: {0}")]
    Dom(String),

    /// Failures reported by the layout solver.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing page sources and reports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TickerError {
    /// Build a [`TickerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TickerError::Dom`] value.
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    /// Build a [`TickerError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`TickerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<taffy::TaffyError> for TickerError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Layout(err.to_string())
    }
}

impl From<serde_json::Error> for TickerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
