//! Viewer error types.

use thiserror::Error;

/// Errors a viewer can report when handed a display request.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// No viewer window or backend is available.
    #[error("viewer unavailable")]
    Unavailable,

    /// The viewer refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A color map name that is not registered.
    #[error("color map '{0}' not found")]
    ColorMapNotFound(String),
}

/// A specialized Result type for viewer operations.
pub type ViewerResult<T> = std::result::Result<T, ViewerError>;
