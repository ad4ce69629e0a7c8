//! Page generation error types.

use thiserror::Error;

/// Errors that can occur while rendering or writing pages.
#[derive(Debug, Error)]
pub enum PageError {
    /// Failed to read a template or write a page.
    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}
