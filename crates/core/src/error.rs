/// Result alias that carries the custom [`RenderError`] type.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Common error type for the rendering core.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Failure raised by a layout engine while measuring or drawing. The
    /// renderer never intercepts these; they surface to the caller as-is.
    #[error("layout `{layout}` failed: {message}")]
    Layout { layout: String, message: String },
    /// Settings that cannot be used for rendering.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around settings (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    /// Creates a layout failure tagged with the name of the failing engine.
    pub fn layout(layout: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Layout {
            layout: layout.into(),
            message: message.into(),
        }
    }
}
