//! Sending visible particles to the viewer.
//!
//! Every `display_*` call follows the same path: collect the visible
//! particles, pull one kind of geometry out of each, optionally color them,
//! and hand the finished request to the viewer. Nothing about the request is
//! remembered afterwards.

use glam::Vec3;
use particle_analyser_core::{GradientAttribute, Particle, ParticleError, Result};
use particle_analyser_display::{
    split_color, DisplayGeometry, DisplayItem, DisplayKind, DisplayRequest,
};

use crate::manager::ParticleManager;

/// How particle surfaces are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// A color ramp keyed by the configured gradient attribute.
    #[default]
    Gradient,
    /// A distinct color per particle.
    Split,
}

impl ParticleManager {
    /// Displays the surfaces of the visible particles.
    ///
    /// Particles without a surface mesh are skipped.
    pub fn display_surfaces(&mut self, mode: ColorMode) -> Result<()> {
        self.dispatch(DisplayKind::Surfaces, Some(mode), |p| {
            p.surface().cloned().map(DisplayGeometry::Surface)
        })
    }

    /// Displays the centroids of the visible particles.
    pub fn display_centroids(&mut self) -> Result<()> {
        self.dispatch(DisplayKind::Centroids, None, |p| {
            Some(DisplayGeometry::Centroid(p.centroid()))
        })
    }

    /// Displays the principal axes of the visible particles.
    pub fn display_axes(&mut self) -> Result<()> {
        self.dispatch(DisplayKind::Axes, None, |p| {
            Some(DisplayGeometry::Axes {
                centroid: p.centroid(),
                axes: *p.axes(),
            })
        })
    }

    /// Displays the best-fit ellipsoids of the visible particles.
    ///
    /// Particles without a fitted ellipsoid are skipped.
    pub fn display_ellipsoids(&mut self) -> Result<()> {
        self.dispatch(DisplayKind::Ellipsoids, None, |p| {
            p.ellipsoid().copied().map(DisplayGeometry::Ellipsoid)
        })
    }

    /// Asks the viewer to show the original image the particles came from.
    pub fn display_original_image(&mut self) -> Result<()> {
        self.dispatch(DisplayKind::OriginalImage, None, |_| None)
    }

    fn dispatch<F>(&mut self, kind: DisplayKind, mode: Option<ColorMode>, extract: F) -> Result<()>
    where
        F: Fn(&Particle) -> Option<DisplayGeometry>,
    {
        let request = self.build_request(kind, mode, extract)?;
        log::info!("sending {} {} to viewer", request.len(), kind);
        self.viewer
            .submit(request)
            .map_err(|e| ParticleError::RenderError(format!("failed to display {kind}: {e}")))
    }

    fn build_request<F>(
        &self,
        kind: DisplayKind,
        mode: Option<ColorMode>,
        extract: F,
    ) -> Result<DisplayRequest>
    where
        F: Fn(&Particle) -> Option<DisplayGeometry>,
    {
        let mut request = DisplayRequest::new(kind, self.calibration()?.clone());
        if kind == DisplayKind::OriginalImage {
            return Ok(request);
        }

        let visible: Vec<&Particle> = self.visible_iter().collect();
        let colors = match mode {
            Some(mode) => Some(self.assign_colors(mode, &visible)?),
            None => None,
        };

        let mut skipped = 0;
        for (i, &particle) in visible.iter().enumerate() {
            let Some(geometry) = extract(particle) else {
                skipped += 1;
                continue;
            };
            request.items.push(DisplayItem {
                particle: particle.id(),
                geometry,
                color: colors.as_ref().map(|c| c[i]),
            });
        }

        if skipped > 0 {
            log::warn!("{skipped} visible particle(s) have no {kind} geometry; skipped");
        }
        Ok(request)
    }

    /// One color per entry of `visible`, in the same order.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn assign_colors(&self, mode: ColorMode, visible: &[&Particle]) -> Result<Vec<Vec3>> {
        let options = &self.options;
        match mode {
            ColorMode::Split => Ok(visible
                .iter()
                .map(|p| split_color(p.id().index(), options.split_saturation, options.split_value))
                .collect()),
            ColorMode::Gradient => {
                let map = self
                    .color_maps
                    .require(&options.gradient_color_map)
                    .map_err(|e| ParticleError::RenderError(e.to_string()))?;

                let positions: Vec<f32> = match options.gradient_attribute {
                    GradientAttribute::Identity => {
                        let last = self.particles.len().saturating_sub(1).max(1) as f32;
                        visible
                            .iter()
                            .map(|p| p.id().index() as f32 / last)
                            .collect()
                    }
                    GradientAttribute::Volume => {
                        let (lo, hi) = visible.iter().fold(
                            (f64::INFINITY, f64::NEG_INFINITY),
                            |(lo, hi), p| (lo.min(p.volume()), hi.max(p.volume())),
                        );
                        let span = hi - lo;
                        visible
                            .iter()
                            .map(|p| {
                                if span > 0.0 {
                                    ((p.volume() - lo) / span) as f32
                                } else {
                                    0.0
                                }
                            })
                            .collect()
                    }
                };
                Ok(positions.into_iter().map(|t| map.sample(t)).collect())
            }
        }
    }
}
