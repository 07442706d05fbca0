//! Display requests handed to a viewer.
//!
//! A request is plain data: the visible particles' geometry with an optional
//! color each. The viewer decides how to draw it.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use particle_analyser_core::{Calibration, Ellipsoid, ParticleId, PrincipalAxes, SurfaceMesh};

/// What a display request shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    Surfaces,
    Centroids,
    Axes,
    Ellipsoids,
    /// The original binary image; carries no particle items.
    OriginalImage,
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayKind::Surfaces => "surfaces",
            DisplayKind::Centroids => "centroids",
            DisplayKind::Axes => "axes",
            DisplayKind::Ellipsoids => "ellipsoids",
            DisplayKind::OriginalImage => "original image",
        };
        f.write_str(name)
    }
}

/// Geometry of one particle in a display request.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayGeometry {
    Surface(Arc<SurfaceMesh>),
    Centroid(Vec3),
    Axes { centroid: Vec3, axes: PrincipalAxes },
    Ellipsoid(Ellipsoid),
}

/// One particle's contribution to a display request.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub particle: ParticleId,
    pub geometry: DisplayGeometry,
    /// `None` leaves the color to the viewer.
    pub color: Option<Vec3>,
}

/// A complete display request.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequest {
    pub kind: DisplayKind,
    pub calibration: Calibration,
    pub items: Vec<DisplayItem>,
}

impl DisplayRequest {
    /// Creates an empty request.
    pub fn new(kind: DisplayKind, calibration: Calibration) -> Self {
        Self {
            kind,
            calibration,
            items: Vec::new(),
        }
    }

    /// Number of particle items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the request carries no particle items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total triangles over the surface items.
    pub fn triangle_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match &item.geometry {
                DisplayGeometry::Surface(mesh) => mesh.num_triangles(),
                _ => 0,
            })
            .sum()
    }

    /// Ids of the particles in the request, in order.
    pub fn particle_ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.items.iter().map(|item| item.particle)
    }
}
