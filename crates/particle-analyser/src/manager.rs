//! The particle manager.
//!
//! [`ParticleManager`] owns the particle collection and the filter settings.
//! Filters never write a boolean "visible" flag. Each one adds or removes its
//! own [`HideReason`], and a particle is visible while it has none. The
//! visible view is derived from the particles on every query.

use particle_analyser_core::{
    Calibration, Face, FaceSet, HideReason, ManagerOptions, Particle, ParticleError,
    ParticleGeometry, ParticleId, Result,
};
use particle_analyser_display::{ColorMap, ColorMapRegistry, LogViewer, Viewer};

/// Owner of a loaded particle set and its visibility state.
///
/// Single particles are addressed by index or by [`ParticleId`], so a
/// particle returned from a query can be passed back as `particle.id()`.
///
/// The manager is single-owner and does no internal locking. Once
/// [`close`](Self::close)d, every operation except [`is_closed`](Self::is_closed)
/// fails with [`ParticleError::Closed`].
pub struct ParticleManager {
    pub(crate) particles: Vec<Particle>,
    pub(crate) calibration: Calibration,
    min_volume: f64,
    max_volume: f64,
    excluded_faces: FaceSet,
    closed: bool,
    pub(crate) options: ManagerOptions,
    pub(crate) color_maps: ColorMapRegistry,
    pub(crate) viewer: Box<dyn Viewer>,
}

impl ParticleManager {
    /// Loads particles in the given order.
    ///
    /// Particle ids follow the input order. All particles start visible and
    /// unselected; the volume range is `[0, +inf)` and no face is excluded.
    pub fn new(geometries: Vec<ParticleGeometry>, calibration: Calibration) -> Self {
        let particles: Vec<Particle> = geometries
            .into_iter()
            .enumerate()
            .map(|(index, geometry)| Particle::new(ParticleId(index), geometry, &calibration))
            .collect();

        log::info!(
            "particle manager loaded {} particles (voxel {}x{}x{} {})",
            particles.len(),
            calibration.pixel_width(),
            calibration.pixel_height(),
            calibration.pixel_depth(),
            calibration.unit()
        );

        Self {
            particles,
            calibration,
            min_volume: 0.0,
            max_volume: f64::INFINITY,
            excluded_faces: FaceSet::new(),
            closed: false,
            options: ManagerOptions::default(),
            color_maps: ColorMapRegistry::new(),
            viewer: Box::new(LogViewer),
        }
    }

    /// Replaces the display options.
    pub fn with_options(mut self, options: ManagerOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Replaces the viewer display requests are sent to.
    #[must_use]
    pub fn with_viewer(mut self, viewer: impl Viewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Closes the manager and drops the particle collection.
    ///
    /// Irreversible. Closing an already closed manager fails.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        self.particles = Vec::new();
        log::info!("particle manager closed");
        Ok(())
    }

    /// Returns whether the manager has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(ParticleError::Closed)
        } else {
            Ok(())
        }
    }

    fn checked_index(&self, index: usize) -> Result<usize> {
        self.ensure_open()?;
        let len = self.particles.len();
        if index < len {
            Ok(index)
        } else {
            Err(ParticleError::IndexOutOfRange { index, len })
        }
    }

    /// Returns the calibration of the source image.
    pub fn calibration(&self) -> Result<&Calibration> {
        self.ensure_open()?;
        Ok(&self.calibration)
    }

    /// Returns the display options.
    pub fn options(&self) -> Result<&ManagerOptions> {
        self.ensure_open()?;
        Ok(&self.options)
    }

    /// Registers an additional color map for gradient display.
    pub fn register_color_map(&mut self, color_map: ColorMap) -> Result<()> {
        self.ensure_open()?;
        self.color_maps.register(color_map);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    /// Total number of particles, hidden or not.
    pub fn particle_count(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.particles.len())
    }

    /// Number of currently visible particles.
    pub fn visible_count(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.visible_iter().count())
    }

    /// Returns a particle regardless of its visibility.
    pub fn particle(&self, index: usize) -> Result<&Particle> {
        let index = self.checked_index(index)?;
        Ok(&self.particles[index])
    }

    /// Returns the `index`-th visible particle, counting in id order.
    pub fn visible_particle(&self, index: usize) -> Result<&Particle> {
        self.ensure_open()?;
        self.visible_iter()
            .nth(index)
            .ok_or_else(|| ParticleError::VisibleIndexOutOfRange {
                index,
                len: self.visible_iter().count(),
            })
    }

    /// Returns every particle in id order.
    pub fn all_particles(&self) -> Result<&[Particle]> {
        self.ensure_open()?;
        Ok(&self.particles)
    }

    /// Returns the visible particles in id order.
    ///
    /// Derived from the current hide reasons on every call.
    pub fn visible_particles(&self) -> Result<Vec<&Particle>> {
        self.ensure_open()?;
        Ok(self.visible_iter().collect())
    }

    /// Returns the selected particles in id order.
    pub fn selected_particles(&self) -> Result<Vec<&Particle>> {
        self.ensure_open()?;
        Ok(self.particles.iter().filter(|p| p.is_selected()).collect())
    }

    pub(crate) fn visible_iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| !p.is_hidden())
    }

    // ------------------------------------------------------------------
    // Hide / show
    // ------------------------------------------------------------------

    /// Hides a particle for `reason`.
    ///
    /// Adding a reason that is already active changes nothing. A selected
    /// particle loses its selection.
    pub fn hide_particle(
        &mut self,
        particle: impl Into<ParticleId>,
        reason: HideReason,
    ) -> Result<()> {
        let index = self.checked_index(particle.into().index())?;
        let particle = &mut self.particles[index];
        if particle.add_hide_reason(reason) {
            log::debug!("particle {} hidden: {reason}", particle.id());
        }
        deselect_if_hidden(particle);
        Ok(())
    }

    /// Hides every particle in the inclusive range `[start, end]`.
    ///
    /// The range is validated before any particle changes.
    pub fn hide_particles(&mut self, start: usize, end: usize, reason: HideReason) -> Result<()> {
        self.ensure_open()?;
        if start > end {
            return Err(ParticleError::InvalidRange { start, end });
        }
        self.checked_index(end)?;

        for particle in &mut self.particles[start..=end] {
            particle.add_hide_reason(reason);
            deselect_if_hidden(particle);
        }
        log::debug!("particles {start}..={end} hidden: {reason}");
        Ok(())
    }

    /// Withdraws a single hide reason from a particle.
    ///
    /// The particle becomes visible only if no other reason remains.
    pub fn show_particle(
        &mut self,
        particle: impl Into<ParticleId>,
        reason: HideReason,
    ) -> Result<()> {
        let index = self.checked_index(particle.into().index())?;
        let particle = &mut self.particles[index];
        if particle.remove_hide_reason(reason) {
            log::debug!(
                "particle {} no longer {reason} (still hidden: {})",
                particle.id(),
                particle.is_hidden()
            );
        }
        Ok(())
    }

    /// Makes every particle visible again.
    ///
    /// Volume bounds and excluded faces are left as they are; they reapply on
    /// the next change to either setting.
    pub fn reset_particles(&mut self) -> Result<()> {
        self.ensure_open()?;
        for particle in &mut self.particles {
            particle.clear_hide_reasons();
        }
        log::debug!("all {} particles reset to visible", self.particles.len());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects a visible particle.
    pub fn select_particle(&mut self, particle: impl Into<ParticleId>) -> Result<()> {
        let index = self.checked_index(particle.into().index())?;
        let particle = &mut self.particles[index];
        if particle.is_hidden() {
            return Err(ParticleError::IllegalSelection(index));
        }
        particle.set_selected(true);
        Ok(())
    }

    /// Deselects every particle. Visibility is unaffected.
    pub fn deselect_all_particles(&mut self) -> Result<()> {
        self.ensure_open()?;
        for particle in &mut self.particles {
            particle.set_selected(false);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Volume filter
    // ------------------------------------------------------------------

    /// Lower volume bound, in calibrated units.
    pub fn min_volume(&self) -> Result<f64> {
        self.ensure_open()?;
        Ok(self.min_volume)
    }

    /// Upper volume bound, in calibrated units.
    pub fn max_volume(&self) -> Result<f64> {
        self.ensure_open()?;
        Ok(self.max_volume)
    }

    /// Sets the lower volume bound and re-evaluates every particle.
    ///
    /// Fails without effect if `min` is NaN or exceeds the upper bound.
    pub fn set_min_volume(&mut self, min: f64) -> Result<()> {
        self.ensure_open()?;
        if min.is_nan() || min > self.max_volume {
            return Err(ParticleError::InvalidVolumeRange {
                min,
                max: self.max_volume,
            });
        }
        self.min_volume = min;
        self.apply_volume_filter();
        Ok(())
    }

    /// Sets the upper volume bound and re-evaluates every particle.
    ///
    /// Fails without effect if `max` is NaN or below the lower bound.
    pub fn set_max_volume(&mut self, max: f64) -> Result<()> {
        self.ensure_open()?;
        if max.is_nan() || max < self.min_volume {
            return Err(ParticleError::InvalidVolumeRange {
                min: self.min_volume,
                max,
            });
        }
        self.max_volume = max;
        self.apply_volume_filter();
        Ok(())
    }

    fn apply_volume_filter(&mut self) {
        let (min, max) = (self.min_volume, self.max_volume);
        let mut outside = 0;
        for particle in &mut self.particles {
            let volume = particle.volume();
            // NaN volumes count as outside
            if min <= volume && volume <= max {
                particle.remove_hide_reason(HideReason::OutOfVolumeRange);
            } else {
                particle.add_hide_reason(HideReason::OutOfVolumeRange);
                deselect_if_hidden(particle);
                outside += 1;
            }
        }
        log::debug!("volume range [{min}, {max}]: {outside} particle(s) outside");
    }

    // ------------------------------------------------------------------
    // Edge exclusion
    // ------------------------------------------------------------------

    /// Includes (`show == true`) or excludes particles touching `face`.
    ///
    /// Faces toggle independently. A particle stays hidden for
    /// [`HideReason::TouchesExcludedEdge`] while it touches any excluded face.
    pub fn exclude_on_edge(&mut self, show: bool, face: Face) -> Result<()> {
        self.ensure_open()?;
        if show {
            self.excluded_faces.remove(face);
        } else {
            self.excluded_faces.insert(face);
        }
        self.apply_edge_filter();
        log::debug!(
            "{} edge {}; excluded faces: {:?}",
            if show { "including" } else { "excluding" },
            face,
            self.excluded_faces.iter().collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Returns the currently excluded faces.
    pub fn excluded_faces(&self) -> Result<FaceSet> {
        self.ensure_open()?;
        Ok(self.excluded_faces)
    }

    /// Returns whether particles touching `face` are excluded.
    pub fn is_edge_excluded(&self, face: Face) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.excluded_faces.contains(face))
    }

    fn apply_edge_filter(&mut self) {
        let excluded = self.excluded_faces;
        for particle in &mut self.particles {
            if particle.touched_faces().intersects(excluded) {
                particle.add_hide_reason(HideReason::TouchesExcludedEdge);
                deselect_if_hidden(particle);
            } else {
                particle.remove_hide_reason(HideReason::TouchesExcludedEdge);
            }
        }
    }
}

impl std::fmt::Debug for ParticleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleManager")
            .field("particles", &self.particles.len())
            .field("min_volume", &self.min_volume)
            .field("max_volume", &self.max_volume)
            .field("excluded_faces", &self.excluded_faces)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Selection implies visibility.
fn deselect_if_hidden(particle: &mut Particle) {
    if particle.is_hidden() && particle.is_selected() {
        particle.set_selected(false);
        log::debug!("particle {} deselected on hide", particle.id());
    }
}
