use crosspatch_render_lopdf::RenderError;
use thiserror::Error;

/// A comprehensive error type for pattern generation.
///
/// Missing or empty inputs are not errors; [`crate::PatternGenerator::generate`]
/// reports those as `Ok(None)`.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Font descriptor is invalid: {0}")]
    Font(String),

    #[error("Configuration is invalid: {0}")]
    Config(String),
}

impl From<lopdf::Error> for PatternError {
    fn from(err: lopdf::Error) -> Self {
        PatternError::Pdf(err.to_string())
    }
}
