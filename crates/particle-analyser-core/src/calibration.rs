//! Image calibration metadata.
//!
//! The calibration belongs to the source image, not to the particle manager;
//! the manager keeps a read-only copy to express voxel counts in physical units.

use glam::Vec3;

use crate::error::{ParticleError, Result};

/// Physical size of one voxel along each axis, plus the unit name.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pixel_width: f64,
    pixel_height: f64,
    pixel_depth: f64,
    unit: String,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pixel_width: 1.0,
            pixel_height: 1.0,
            pixel_depth: 1.0,
            unit: "pixel".to_string(),
        }
    }
}

impl Calibration {
    /// Creates a calibration from per-axis voxel sizes.
    ///
    /// Every size must be finite and strictly positive.
    pub fn new(
        pixel_width: f64,
        pixel_height: f64,
        pixel_depth: f64,
        unit: impl Into<String>,
    ) -> Result<Self> {
        for (axis, size) in [
            ("width", pixel_width),
            ("height", pixel_height),
            ("depth", pixel_depth),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ParticleError::InvalidCalibration(format!(
                    "voxel {axis} must be positive and finite, got {size}"
                )));
            }
        }

        Ok(Self {
            pixel_width,
            pixel_height,
            pixel_depth,
            unit: unit.into(),
        })
    }

    /// Returns the voxel width (x).
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Returns the voxel height (y).
    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Returns the voxel depth (z).
    pub fn pixel_depth(&self) -> f64 {
        self.pixel_depth
    }

    /// Returns the length unit name (e.g. "mm").
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Volume of a single voxel in cubic units.
    pub fn voxel_volume(&self) -> f64 {
        self.pixel_width * self.pixel_height * self.pixel_depth
    }

    /// Converts a voxel count to a calibrated volume.
    #[allow(clippy::cast_precision_loss)]
    pub fn volume_of(&self, voxel_count: u64) -> f64 {
        voxel_count as f64 * self.voxel_volume()
    }

    /// Per-axis scale, for renderers that work in single precision.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.pixel_width as f32,
            self.pixel_height as f32,
            self.pixel_depth as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unit_voxel() {
        let cal = Calibration::default();
        assert_eq!(cal.voxel_volume(), 1.0);
        assert_eq!(cal.unit(), "pixel");
        assert_eq!(cal.volume_of(42), 42.0);
    }

    #[test]
    fn test_volume_of() {
        let cal = Calibration::new(0.5, 0.5, 2.0, "mm").unwrap();
        assert_eq!(cal.voxel_volume(), 0.5);
        assert_eq!(cal.volume_of(10), 5.0);
        assert_eq!(cal.scale(), Vec3::new(0.5, 0.5, 2.0));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(Calibration::new(0.0, 1.0, 1.0, "mm").is_err());
        assert!(Calibration::new(1.0, -1.0, 1.0, "mm").is_err());
        assert!(Calibration::new(1.0, 1.0, f64::NAN, "mm").is_err());
        assert!(Calibration::new(1.0, 1.0, f64::INFINITY, "mm").is_err());
    }
}
