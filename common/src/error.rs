use thiserror::Error;

/// Errors raised while talking to the server, the DOM or the image codec.
///
/// None of these are fatal to the page: callers turn them into a
/// disabled save gate, an alert or a console entry.
#[derive(Debug, Error)]
pub enum GlueError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("phone number widget is unavailable: {0}")]
    WidgetUnavailable(String),

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GlueError>;
