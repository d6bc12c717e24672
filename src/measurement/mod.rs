//! Vision measurement model.
//!
//! Turns a batch of detected lane-boundary segments into a normalized vote
//! histogram over the belief grid:
//!
//! ```text
//! Segments ──► prepare_segments ──► vote_for (each) ──► vote histogram
//!              (color + behind-     (road geometry       (floor-mapped,
//!               robot filtering)     projection)          normalized)
//! ```
//!
//! The histogram is a voting tally, not a density: every surviving segment
//! contributes exactly one unit of mass to the cell its vote lands in.

mod likelihood;
mod vote;

pub use likelihood::{measurement_likelihood, prepare_segments};
pub use vote::{vote_for, Vote};

use serde::{Deserialize, Serialize};

/// Static road geometry constants.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RoadSpec {
    /// Lane width in meters (centerline of white line to centerline of yellow line)
    pub lanewidth: f32,

    /// Width of the white boundary line in meters
    pub linewidth_white: f32,

    /// Width of the yellow boundary line in meters
    pub linewidth_yellow: f32,
}

impl Default for RoadSpec {
    fn default() -> Self {
        // Standard small-scale road geometry
        Self {
            lanewidth: 0.23,
            linewidth_white: 0.05,
            linewidth_yellow: 0.025,
        }
    }
}

impl RoadSpec {
    /// Create a new road spec with explicit parameters
    pub fn new(lanewidth: f32, linewidth_white: f32, linewidth_yellow: f32) -> Self {
        Self {
            lanewidth,
            linewidth_white,
            linewidth_yellow,
        }
    }
}
