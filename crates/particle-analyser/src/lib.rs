//! particle-analyser: visibility, filtering and selection of segmented 3D particles.
//!
//! A [`ParticleManager`] takes the particles measured from a segmented image
//! and keeps track of which ones are currently shown. Particles can be hidden
//! for several independent reasons at once:
//!
//! - [`HideReason::ManuallyHidden`] - hidden by the user
//! - [`HideReason::OutOfVolumeRange`] - outside the `[min, max]` volume range
//! - [`HideReason::TouchesExcludedEdge`] - touching an excluded face of the volume
//!
//! A particle is visible while it has no hide reason. Turning one filter off
//! therefore never reveals a particle that another filter still hides.
//!
//! # Quick Start
//!
//! ```
//! use particle_analyser::*;
//!
//! fn main() -> Result<()> {
//!     let geometries = [1, 5, 10, 15, 20]
//!         .into_iter()
//!         .map(|voxels| ParticleGeometry::new(voxels, Vec3::ZERO))
//!         .collect();
//!     let mut manager = ParticleManager::new(geometries, Calibration::default());
//!
//!     manager.set_min_volume(5.0)?;
//!     manager.set_max_volume(15.0)?;
//!     assert_eq!(manager.visible_count()?, 3);
//!
//!     manager.display_centroids()?;
//!     manager.close()?;
//!     Ok(())
//! }
//! ```

mod display;
mod manager;

// Re-export core types
pub use particle_analyser_core::{
    calibration::Calibration,
    error::{ParticleError, Result},
    face::{Face, FaceSet},
    hide::{HideReason, HideReasons},
    options::{GradientAttribute, ManagerOptions},
    particle::{Ellipsoid, Particle, ParticleGeometry, ParticleId, PrincipalAxes, SurfaceMesh},
    Mat3, UVec3, Vec3,
};

// Re-export display types
pub use particle_analyser_display::{
    ColorMap, ColorMapRegistry, DisplayGeometry, DisplayItem, DisplayKind, DisplayRequest,
    LogViewer, RecordingViewer, Viewer, ViewerError, ViewerResult,
};

pub use display::ColorMode;
pub use manager::ParticleManager;

/// Initializes `env_logger` for binaries and tests.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
