/// Result alias that carries the custom [`OverlayError`] type.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Free-form failure with a readable message.
    #[error("{0}")]
    Message(String),
    /// The capture source could not be opened or stopped producing frames.
    #[error("capture source unavailable: {0}")]
    SourceUnavailable(String),
    /// The display window could not be created or updated.
    #[error("display failure: {0}")]
    Display(String),
    /// An overlay could not be composited onto the base image.
    #[error("cannot blend overlay: {0}")]
    InvalidBlend(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Image decoding or encoding failed.
    #[error("{0}")]
    Image(#[from] image::ImageError),
    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl OverlayError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for OverlayError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for OverlayError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
