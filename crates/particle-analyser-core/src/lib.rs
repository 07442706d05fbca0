//! Core types for particle-analyser.
//!
//! This crate provides the leaf types the particle manager is built from:
//! - [`Particle`] entities with read-only geometry and a set of [`HideReason`]s
//! - [`Face`] / [`FaceSet`] classification of the volume's bounding faces
//! - [`Calibration`] metadata for converting voxel counts to physical volume
//! - [`ManagerOptions`] configuration and the shared [`ParticleError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod calibration;
pub mod error;
pub mod face;
pub mod hide;
pub mod options;
pub mod particle;

pub use calibration::Calibration;
pub use error::{ParticleError, Result};
pub use face::{Face, FaceSet};
pub use hide::{HideReason, HideReasons};
pub use options::{GradientAttribute, ManagerOptions};
pub use particle::{
    Ellipsoid, Particle, ParticleGeometry, ParticleId, PrincipalAxes, SurfaceMesh,
};

// Re-export glam types for convenience
pub use glam::{Mat3, UVec3, Vec3};
