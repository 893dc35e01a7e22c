//! Render error types

use thiserror::Error;

/// Failures while producing markup or turning it into an image
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template could not be rendered
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// Rasterizer binary could not be started or found
    #[error("rasterizer unavailable: {message}")]
    Unavailable { message: String },

    /// Rasterizer ran but reported a failure
    #[error("rasterizer failed ({status}): {stderr}")]
    Rasterize { status: String, stderr: String },

    /// Reading or writing rasterizer streams failed
    #[error("rasterizer I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rasterizer produced no image data
    #[error("rasterizer produced an empty image")]
    EmptyOutput,
}

impl crate::core::error_handling::ContextualError for RenderError {
    fn is_user_actionable(&self) -> bool {
        // a missing typst binary is fixed by installing it or setting typst-bin
        matches!(self, RenderError::Unavailable { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            RenderError::Unavailable { message } => Some(message),
            _ => None,
        }
    }
}

pub type FormatResult = Result<String, RenderError>;
