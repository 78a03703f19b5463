use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A math operation left its domain, e.g. normalizing a zero-length
    /// vector. Fatal to the render in progress; never retried.
    #[error("math domain error: {0}")]
    Domain(String),

    /// The scene description failed validation. Raised while building a
    /// scene, never during rendering.
    #[error("invalid scene description: {0}")]
    Config(String),

    /// The render was cancelled between scanlines.
    #[error("render cancelled")]
    Cancelled,
}

impl RenderError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
