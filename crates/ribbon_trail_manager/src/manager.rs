use ribbon_render_models::surface::TrailSurface;
use ribbon_trail_models::{ShiftCadence, TrailConfiguration, TrailError, TrailState};
use tracing::{debug, info, trace};

use crate::{Anchor, TrailGrid};

/// Drives one trail: follows the anchors every frame, records their history at the configured
/// cadence and pushes the resulting geometry to the surface.
///
/// The host maps its own lifecycle on the methods of the manager:
/// - [`TrailManager::initialize`] when the trail object is created
/// - [`TrailManager::reset`] when it becomes visible
/// - [`TrailManager::tick`] once per frame
/// - [`TrailManager::freeze`] / [`TrailManager::deactivate`] when it should go away
/// - [`TrailManager::teardown`] when the trail object is destroyed
pub struct TrailManager<S: TrailSurface> {
    configuration: TrailConfiguration,
    grid: TrailGrid,
    state: TrailState,
    surface: S,
    /// seconds left before the next history shift, timer cadence only
    shift_countdown: f32,
    last_tick: Option<f64>,
    /// anchor positions of the current frame
    heads: Vec<glam::Vec3>,
}

impl<S: TrailSurface> TrailManager<S> {
    /// Validates the configuration, sizes every buffer and uploads the index buffer.
    /// The trail stays [`TrailState::Inactive`] until the first [`TrailManager::reset`].
    #[tracing::instrument(skip(configuration, surface))]
    pub fn initialize(
        configuration: TrailConfiguration,
        node_count: usize,
        mut surface: S,
    ) -> Result<Self, TrailError> {
        let layout = configuration.layout(node_count)?;
        let grid = TrailGrid::new(layout, configuration.color);
        surface.upload_indices(grid.indices());
        surface.set_visible(false);
        info!(
            vertices = layout.vertex_count(),
            triangles = layout.index_count() / 3,
            "trail initialized"
        );
        Ok(Self {
            shift_countdown: shift_interval(&configuration),
            configuration,
            grid,
            state: TrailState::Inactive,
            surface,
            last_tick: None,
            heads: vec![glam::Vec3::ZERO; node_count],
        })
    }

    pub fn configuration(&self) -> &TrailConfiguration {
        &self.configuration
    }
    pub fn grid(&self) -> &TrailGrid {
        &self.grid
    }
    pub fn state(&self) -> TrailState {
        self.state
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Activates the trail with every history vertex collapsed onto the current anchors.
    pub fn reset<A: Anchor>(&mut self, latest_time: f64, anchors: &[A]) -> Result<(), TrailError> {
        self.sample_anchors(anchors)?;
        self.grid.reset(&self.heads);
        self.shift_countdown = shift_interval(&self.configuration);
        self.last_tick = Some(latest_time);
        self.state = TrailState::Active;
        debug!(latest_time, "trail reset on its anchors");
        self.surface.set_visible(true);
        self.push_geometry();
        Ok(())
    }

    /// Stops following the anchors. The last geometry stays displayed until `deadline`.
    pub fn freeze(&mut self, deadline: f64) {
        if self.state == TrailState::Inactive {
            return;
        }
        debug!(deadline, "trail frozen");
        self.state = TrailState::Frozen { deadline };
    }

    pub fn deactivate(&mut self) {
        if self.state == TrailState::Inactive {
            return;
        }
        debug!("trail deactivated");
        self.state = TrailState::Inactive;
        self.last_tick = None;
        self.surface.set_visible(false);
    }

    /// Hides and releases the surface, then hands it back to the host.
    pub fn teardown(mut self) -> S {
        self.deactivate();
        self.surface.release();
        info!("trail torn down");
        self.surface
    }

    /// Updates the trail for the frame at `latest_time` (seconds).
    ///
    /// Anchors are checked before anything is modified: on error the frame is skipped and the
    /// surface keeps displaying the previous geometry.
    pub fn tick<A: Anchor>(&mut self, latest_time: f64, anchors: &[A]) -> Result<(), TrailError> {
        match self.state {
            TrailState::Inactive => return Ok(()),
            TrailState::Frozen { deadline } => {
                if latest_time >= deadline {
                    self.deactivate();
                } else {
                    self.push_geometry();
                }
                return Ok(());
            }
            TrailState::Active => {}
        }
        self.sample_anchors(anchors)?;

        let elapsed = match self.last_tick {
            Some(previous) => (latest_time - previous).max(0.0) as f32,
            None => 0.0,
        };
        self.last_tick = Some(latest_time);

        let shifted = self.should_shift(elapsed);
        if shifted {
            debug!(latest_time, "history shifted");
            self.grid.shift();
        }
        let kind = self.configuration.spline;
        self.grid
            .track_head(&self.heads, self.configuration.head_interpolation, kind);
        if shifted {
            self.grid.fill_history(kind);
        } else if self.grid.layout().segments() > 1 {
            // its previous control point is the live head
            self.grid.fill_interval(1, kind);
        }
        self.grid.recompute_uvs();
        trace!(latest_time, shifted, "trail updated");
        self.push_geometry();
        Ok(())
    }

    fn sample_anchors<A: Anchor>(&mut self, anchors: &[A]) -> Result<(), TrailError> {
        let expected = self.grid.layout().node_count();
        if anchors.len() != expected {
            return Err(TrailError::AnchorCountMismatch {
                expected,
                actual: anchors.len(),
            });
        }
        for (rail, anchor) in anchors.iter().enumerate() {
            let position = anchor.position();
            if !position.is_finite() {
                return Err(TrailError::NonFiniteAnchor { rail, position });
            }
        }
        for (head, anchor) in self.heads.iter_mut().zip(anchors) {
            *head = anchor.position();
        }
        Ok(())
    }

    fn should_shift(&mut self, elapsed: f32) -> bool {
        match self.configuration.cadence {
            ShiftCadence::Timer { updates_per_second } => {
                self.shift_countdown -= elapsed;
                if self.shift_countdown <= 0.0 {
                    self.shift_countdown = 1.0 / updates_per_second;
                    true
                } else {
                    false
                }
            }
            ShiftCadence::Distance { threshold } => (0..self.grid.layout().node_count())
                .any(|rail| self.grid.segment_length(0, rail) > threshold),
        }
    }

    fn push_geometry(&mut self) {
        self.surface.upload_geometry(
            self.grid.positions(),
            self.grid.uvs(),
            self.grid.colors(),
        );
    }
}

fn shift_interval(configuration: &TrailConfiguration) -> f32 {
    match configuration.cadence {
        ShiftCadence::Timer { updates_per_second } => 1.0 / updates_per_second,
        ShiftCadence::Distance { .. } => 0.0,
    }
}
