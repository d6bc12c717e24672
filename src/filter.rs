//! Histogram filter orchestration.
//!
//! [`LaneFilter`] owns the belief grid and composes the two halves of the
//! Bayes filter cycle:
//!
//! ```text
//! EncoderTicks                    Segments
//!       │                             │
//!       ▼                             ▼
//! ┌─────────────┐              ┌──────────────┐
//! │   Predict   │              │    Update    │
//! │ kinematics  │              │ vote         │
//! │ + scatter   │              │ histogram    │
//! │ + diffusion │              │ × belief     │
//! └──────┬──────┘              └──────┬───────┘
//!        │                           │
//!        └────────► belief ◄─────────┘
//! ```
//!
//! Predict and update must be driven in strict alternation by the caller;
//! the filter holds no scheduler and never blocks. The belief is owned
//! exclusively by the filter and mutated in place each cycle.
//!
//! ## Degenerate cycles
//!
//! Three numeric edge cases are handled deliberately rather than as errors:
//!
//! - Predict diffuses all mass off the grid → the pre-predict belief is kept
//! - No usable segments → the update is a no-op and reports no likelihood
//! - Belief and likelihood have disjoint support → the belief is reset to
//!   the likelihood, discarding the prior history

use log::{debug, warn};

use crate::config::LaneFilterConfig;
use crate::core::{EncoderTicks, LaneDisplacement, LanePose, RobotSpec, Segment};
use crate::error::Result;
use crate::grid::{gaussian_blur, BeliefGrid, BoundaryPolicy, Gaussian2D, GridSpec};
use crate::measurement::{measurement_likelihood, prepare_segments, RoadSpec};

/// Outcome of one predict step.
#[derive(Clone, Copy, Debug)]
pub struct PredictResult {
    /// Displacement applied to every cell centroid
    pub displacement: LaneDisplacement,
    /// True when propagation plus diffusion produced zero mass and the
    /// pre-predict belief was kept instead
    pub fallback: bool,
}

/// Outcome of one measurement update.
#[derive(Clone, Debug)]
pub struct UpdateResult {
    /// Normalized vote histogram, `None` when no usable segments voted.
    /// Exposed for diagnostics and visualization.
    pub likelihood: Option<BeliefGrid>,
    /// True when the posterior had zero mass and the belief was reset to
    /// the likelihood
    pub reset: bool,
}

/// Histogram filter for lane-relative pose estimation.
///
/// # Example
///
/// ```
/// use marga_filter::{EncoderTicks, LaneFilter, LaneFilterConfig};
///
/// let config = LaneFilterConfig::default();
/// let mut filter = LaneFilter::new(&config).unwrap();
///
/// filter.predict(EncoderTicks::new(12, 14));
/// let pose = filter.estimate();
/// assert!(pose.d.abs() < 0.3);
/// ```
pub struct LaneFilter {
    grid_spec: GridSpec,
    road: RoadSpec,
    robot: RobotSpec,
    prior: Gaussian2D,
    sigma_d: f32,
    sigma_phi: f32,
    boundary_policy: BoundaryPolicy,
    belief: BeliefGrid,
}

impl LaneFilter {
    /// Build a filter from a configuration, initializing the belief from
    /// the configured Gaussian prior.
    pub fn new(config: &LaneFilterConfig) -> Result<Self> {
        Ok(Self::from_parts(
            config.to_grid_spec(),
            config.road,
            config.robot,
            config.prior.to_gaussian()?,
            config.process_noise.sigma_d(),
            config.process_noise.sigma_phi(),
            config.boundary_policy,
        ))
    }

    /// Build a filter from already-constructed parts.
    pub fn from_parts(
        grid_spec: GridSpec,
        road: RoadSpec,
        robot: RobotSpec,
        prior: Gaussian2D,
        sigma_d: f32,
        sigma_phi: f32,
        boundary_policy: BoundaryPolicy,
    ) -> Self {
        let mut belief = BeliefGrid::from_prior(&grid_spec, &prior);
        belief.normalize();

        Self {
            grid_spec,
            road,
            robot,
            prior,
            sigma_d,
            sigma_phi,
            boundary_policy,
            belief,
        }
    }

    /// Current belief over (d, phi).
    #[inline]
    pub fn belief(&self) -> &BeliefGrid {
        &self.belief
    }

    /// Grid discretization in use.
    #[inline]
    pub fn grid_spec(&self) -> &GridSpec {
        &self.grid_spec
    }

    /// Maximum a posteriori pose estimate (argmax cell center).
    pub fn estimate(&self) -> LanePose {
        self.belief.argmax_pose(&self.grid_spec)
    }

    /// Re-initialize the belief from the configured prior.
    pub fn reset(&mut self) {
        self.belief = BeliefGrid::from_prior(&self.grid_spec, &self.prior);
        self.belief.normalize();
    }

    /// Propagate the belief through the motion model.
    ///
    /// Converts the encoder reading into a per-cell displacement, scatters
    /// every cell's mass to its displaced centroid, then diffuses the result
    /// with the process-noise Gaussian and renormalizes. If the combination
    /// leaves zero total mass (everything propagated or diffused off the
    /// grid), the pre-predict belief is kept unchanged.
    pub fn predict(&mut self, ticks: EncoderTicks) -> PredictResult {
        let displacement = self.robot.displacement(ticks);

        let propagated = self
            .belief
            .propagate(&self.grid_spec, displacement, self.boundary_policy);
        let mut smoothed = gaussian_blur(&propagated, self.sigma_d, self.sigma_phi);

        if !smoothed.normalize() {
            debug!("predict produced zero mass, keeping previous belief");
            return PredictResult {
                displacement,
                fallback: true,
            };
        }

        self.belief = smoothed;
        PredictResult {
            displacement,
            fallback: false,
        }
    }

    /// Fuse a batch of detected segments into the belief.
    ///
    /// Segments are filtered (white/yellow only, ahead of the robot) and
    /// voted into a likelihood histogram. With no usable votes the belief is
    /// left untouched. A posterior with zero mass means the measurement and
    /// the prior belief disagree completely; the filter then resets to the
    /// likelihood rather than keeping a belief the evidence rules out.
    pub fn update(&mut self, segments: &[Segment]) -> UpdateResult {
        let prepared = prepare_segments(segments);
        let Some(likelihood) = measurement_likelihood(&prepared, &self.road, &self.grid_spec)
        else {
            debug!("no usable segments, skipping measurement update");
            return UpdateResult {
                likelihood: None,
                reset: false,
            };
        };

        let mut posterior = self.belief.product(&likelihood);
        let reset = !posterior.normalize();
        if reset {
            warn!("belief and measurement have disjoint support, resetting to measurement");
            self.belief = likelihood.clone();
        } else {
            self.belief = posterior;
        }

        UpdateResult {
            likelihood: Some(likelihood),
            reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point2D, SegmentColor};

    fn filter() -> LaneFilter {
        LaneFilter::new(&LaneFilterConfig::default()).unwrap()
    }

    fn centered_white(road: &RoadSpec) -> Segment {
        let y = -road.lanewidth / 2.0;
        Segment::new(Point2D::new(0.2, y), Point2D::new(0.5, y), SegmentColor::White)
    }

    #[test]
    fn test_prior_is_normalized() {
        let filter = filter();
        assert!((filter.belief().sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_prior_peaks_at_mean() {
        let filter = filter();
        let pose = filter.estimate();
        // Default prior is centered; the argmax cell center straddles zero
        assert!(pose.d.abs() <= filter.grid_spec().delta_d);
        assert!(pose.phi.abs() <= filter.grid_spec().delta_phi);
    }

    #[test]
    fn test_predict_keeps_unit_sum() {
        let mut filter = filter();
        let result = filter.predict(EncoderTicks::new(20, 24));
        assert!(!result.fallback);
        assert!((filter.belief().sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_keeps_unit_sum() {
        let mut filter = filter();
        let seg = centered_white(&RoadSpec::default());
        let result = filter.update(&[seg]);
        assert!(result.likelihood.is_some());
        assert!(!result.reset);
        assert!((filter.belief().sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_without_segments_is_noop() {
        let mut filter = filter();
        let before = filter.belief().clone();

        let result = filter.update(&[]);
        assert!(result.likelihood.is_none());
        assert!(!result.reset);
        // Exact equality: the belief must not be touched at all
        assert_eq!(filter.belief(), &before);
    }

    #[test]
    fn test_update_ignores_red_segments() {
        let mut filter = filter();
        let before = filter.belief().clone();

        let mut red = centered_white(&RoadSpec::default());
        red.color = SegmentColor::Red;
        let result = filter.update(&[red]);
        assert!(result.likelihood.is_none());
        assert_eq!(filter.belief(), &before);
    }

    #[test]
    fn test_reset_restores_prior() {
        let mut filter = filter();
        let initial = filter.belief().clone();

        filter.predict(EncoderTicks::new(40, 10));
        assert_ne!(filter.belief(), &initial);

        filter.reset();
        assert_eq!(filter.belief(), &initial);
    }
}
