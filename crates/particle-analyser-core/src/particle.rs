//! Particle entity and the geometry delivered by the measurement step.
//!
//! A [`Particle`] is one segmented object. Its geometry is read-only once
//! loaded; its hide reasons and selection flag change over the manager's
//! lifetime.

use std::fmt;
use std::sync::Arc;

use glam::{Mat3, UVec3, Vec3};

use crate::calibration::Calibration;
use crate::face::FaceSet;
use crate::hide::{HideReason, HideReasons};

/// Stable index of a particle within its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub usize);

impl ParticleId {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ParticleId {
    fn from(index: usize) -> Self {
        ParticleId(index)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Principal axes of inertia: unit eigenvectors as matrix columns with their
/// eigenvalues in the same order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    pub vectors: Mat3,
    pub values: Vec3,
}

impl PrincipalAxes {
    /// Creates principal axes from eigenvectors (columns) and eigenvalues.
    pub fn new(vectors: Mat3, values: Vec3) -> Self {
        Self { vectors, values }
    }

    /// Returns the `i`-th axis direction and its eigenvalue.
    pub fn axis(&self, i: usize) -> (Vec3, f32) {
        (self.vectors.col(i), self.values[i])
    }
}

impl Default for PrincipalAxes {
    fn default() -> Self {
        Self::new(Mat3::IDENTITY, Vec3::ZERO)
    }
}

/// Best-fit ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub center: Vec3,
    /// Semi-axis lengths along the rotation's columns.
    pub radii: Vec3,
    pub rotation: Mat3,
}

impl Ellipsoid {
    /// Creates an ellipsoid.
    pub fn new(center: Vec3, radii: Vec3, rotation: Mat3) -> Self {
        Self {
            center,
            radii,
            rotation,
        }
    }

    /// Enclosed volume, `4/3 * pi * a * b * c`.
    pub fn volume(&self) -> f32 {
        4.0 / 3.0 * std::f32::consts::PI * self.radii.x * self.radii.y * self.radii.z
    }
}

/// Triangulated particle surface in calibrated coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<UVec3>,
}

impl SurfaceMesh {
    /// Creates a surface mesh.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<UVec3>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }
}

/// Geometry of one particle as supplied by the measurement step.
#[derive(Debug, Clone, Default)]
pub struct ParticleGeometry {
    /// Raw size in voxels; converted with the manager's calibration.
    pub voxel_count: u64,
    pub centroid: Vec3,
    pub axes: PrincipalAxes,
    pub ellipsoid: Option<Ellipsoid>,
    pub surface: Option<Arc<SurfaceMesh>>,
    pub touched_faces: FaceSet,
}

impl ParticleGeometry {
    /// Creates geometry with only a voxel count and centroid.
    pub fn new(voxel_count: u64, centroid: Vec3) -> Self {
        Self {
            voxel_count,
            centroid,
            ..Self::default()
        }
    }

    /// Sets the principal axes.
    #[must_use]
    pub fn with_axes(mut self, axes: PrincipalAxes) -> Self {
        self.axes = axes;
        self
    }

    /// Sets the best-fit ellipsoid.
    #[must_use]
    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = Some(ellipsoid);
        self
    }

    /// Sets the surface mesh.
    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceMesh) -> Self {
        self.surface = Some(Arc::new(surface));
        self
    }

    /// Sets the faces of the volume this particle touches.
    #[must_use]
    pub fn with_touched_faces(mut self, faces: FaceSet) -> Self {
        self.touched_faces = faces;
        self
    }
}

/// One segmented particle.
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    voxel_count: u64,
    volume: f64,
    centroid: Vec3,
    axes: PrincipalAxes,
    ellipsoid: Option<Ellipsoid>,
    surface: Option<Arc<SurfaceMesh>>,
    touched_faces: FaceSet,
    hide_reasons: HideReasons,
    selected: bool,
}

impl Particle {
    /// Creates a visible, unselected particle from measured geometry.
    pub fn new(id: ParticleId, geometry: ParticleGeometry, calibration: &Calibration) -> Self {
        Self {
            id,
            voxel_count: geometry.voxel_count,
            volume: calibration.volume_of(geometry.voxel_count),
            centroid: geometry.centroid,
            axes: geometry.axes,
            ellipsoid: geometry.ellipsoid,
            surface: geometry.surface,
            touched_faces: geometry.touched_faces,
            hide_reasons: HideReasons::new(),
            selected: false,
        }
    }

    /// Returns the particle's stable id.
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Returns the raw voxel count.
    pub fn voxel_count(&self) -> u64 {
        self.voxel_count
    }

    /// Returns the calibrated volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Returns the centroid.
    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Returns the principal axes.
    pub fn axes(&self) -> &PrincipalAxes {
        &self.axes
    }

    /// Returns the best-fit ellipsoid, if one was fitted.
    pub fn ellipsoid(&self) -> Option<&Ellipsoid> {
        self.ellipsoid.as_ref()
    }

    /// Returns the surface mesh, if one was generated.
    pub fn surface(&self) -> Option<&Arc<SurfaceMesh>> {
        self.surface.as_ref()
    }

    /// Returns the faces of the volume this particle touches.
    pub fn touched_faces(&self) -> FaceSet {
        self.touched_faces
    }

    /// Adds a hide reason. Returns true if it was not already active.
    pub fn add_hide_reason(&mut self, reason: HideReason) -> bool {
        self.hide_reasons.insert(reason)
    }

    /// Removes a hide reason. Returns true if it was active.
    pub fn remove_hide_reason(&mut self, reason: HideReason) -> bool {
        self.hide_reasons.remove(reason)
    }

    /// Returns true if any hide reason is active.
    pub fn is_hidden(&self) -> bool {
        !self.hide_reasons.is_empty()
    }

    /// Returns the active hide reasons.
    pub fn hide_reasons(&self) -> HideReasons {
        self.hide_reasons
    }

    /// Removes every hide reason.
    pub fn clear_hide_reasons(&mut self) {
        self.hide_reasons.clear();
    }

    /// Returns whether this particle is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the selection flag.
    ///
    /// The particle does not check its own visibility; the manager only
    /// selects visible particles and deselects particles as they get hidden.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Face;

    fn particle(voxels: u64) -> Particle {
        Particle::new(
            ParticleId(0),
            ParticleGeometry::new(voxels, Vec3::ZERO),
            &Calibration::default(),
        )
    }

    #[test]
    fn test_new_particle_is_visible() {
        let p = particle(10);
        assert!(!p.is_hidden());
        assert!(p.hide_reasons().is_empty());
        assert!(!p.is_selected());
        assert!(p.ellipsoid().is_none());
        assert!(p.surface().is_none());
    }

    #[test]
    fn test_volume_uses_calibration() {
        let cal = Calibration::new(2.0, 2.0, 2.0, "um").unwrap();
        let p = Particle::new(ParticleId(3), ParticleGeometry::new(5, Vec3::ONE), &cal);
        assert_eq!(p.voxel_count(), 5);
        assert_eq!(p.volume(), 40.0);
        assert_eq!(p.id().index(), 3);
    }

    #[test]
    fn test_hidden_iff_reasons() {
        let mut p = particle(1);
        p.add_hide_reason(HideReason::ManuallyHidden);
        p.add_hide_reason(HideReason::OutOfVolumeRange);
        assert!(p.is_hidden());

        p.remove_hide_reason(HideReason::OutOfVolumeRange);
        assert!(p.is_hidden());

        p.remove_hide_reason(HideReason::ManuallyHidden);
        assert!(!p.is_hidden());

        // removing an absent reason is a no-op
        assert!(!p.remove_hide_reason(HideReason::ManuallyHidden));
        assert!(!p.is_hidden());
    }

    #[test]
    fn test_geometry_builders() {
        let geometry = ParticleGeometry::new(8, Vec3::splat(1.5))
            .with_ellipsoid(Ellipsoid::new(Vec3::ZERO, Vec3::ONE, Mat3::IDENTITY))
            .with_surface(SurfaceMesh::new(
                vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                vec![UVec3::new(0, 1, 2)],
            ))
            .with_touched_faces(Face::Top.into());
        let p = Particle::new(ParticleId(1), geometry, &Calibration::default());

        assert_eq!(p.centroid(), Vec3::splat(1.5));
        assert!(p.touched_faces().contains(Face::Top));
        assert_eq!(p.surface().map(|s| s.num_triangles()), Some(1));
        let volume = p.ellipsoid().map(Ellipsoid::volume).unwrap();
        assert!((volume - 4.0 / 3.0 * std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_principal_axes() {
        let axes = PrincipalAxes::new(Mat3::IDENTITY, Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(axes.axis(1), (Vec3::Y, 2.0));
    }
}
