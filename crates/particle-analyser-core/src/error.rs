//! Error types for particle-analyser.

use thiserror::Error;

/// The main error type for particle manager operations.
#[derive(Error, Debug)]
pub enum ParticleError {
    /// The manager has been closed.
    #[error("particle manager is closed")]
    Closed,

    /// A particle index outside `[0, len)`.
    #[error("particle index {index} out of range (particle count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A visible-particle index outside the current visible count.
    #[error("visible particle index {index} out of range (visible count {len})")]
    VisibleIndexOutOfRange { index: usize, len: usize },

    /// A particle range whose start lies after its end.
    #[error("invalid particle range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Volume bounds that would leave `min > max`, or a NaN bound.
    #[error("invalid volume range [{min}, {max}]: bounds must be numbers with min <= max")]
    InvalidVolumeRange { min: f64, max: f64 },

    /// Selecting a particle that is currently hidden.
    #[error("particle {0} is hidden and cannot be selected")]
    IllegalSelection(usize),

    /// Calibration with a non-positive or non-finite voxel size.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Invalid manager options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The rendering collaborator rejected a display request.
    #[error("render error: {0}")]
    RenderError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ParticleError {
    /// Returns true if this error comes from operating on a closed manager.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns true for any out-of-bounds index, including visible indices.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::VisibleIndexOutOfRange { .. }
        )
    }
}

/// A specialized Result type for particle-analyser operations.
pub type Result<T> = std::result::Result<T, ParticleError>;
