//! # MargaFilter
//!
//! Histogram (discrete Bayes) filter for lane-relative pose estimation.
//!
//! ## Overview
//!
//! The filter tracks a probability mass histogram over a 2D grid of lane
//! poses (lateral offset `d` × heading `phi`) and fuses two inputs:
//!
//! - **Predict**: wheel encoder ticks, run through differential drive
//!   kinematics, displace every cell's centroid; the scattered mass is then
//!   diffused with a Gaussian blur to model process noise.
//! - **Update**: lane-boundary line segments from a vision pipeline each
//!   vote for one (d, phi) hypothesis; the vote histogram multiplies the
//!   belief in a standard Bayesian measurement update.
//!
//! Segment acquisition, encoder counting, and the control loop consuming
//! the pose estimate all live outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_filter::{EncoderTicks, LaneFilter, LaneFilterConfig, Point2D, Segment, SegmentColor};
//!
//! let config = LaneFilterConfig::default();
//! let mut filter = LaneFilter::new(&config).unwrap();
//!
//! // One odometry cycle
//! filter.predict(EncoderTicks::new(12, 14));
//!
//! // One vision cycle: a white segment seen half a lane width to the right
//! let segment = Segment::new(
//!     Point2D::new(0.2, -0.115),
//!     Point2D::new(0.5, -0.115),
//!     SegmentColor::White,
//! );
//! filter.update(&[segment]);
//!
//! let pose = filter.estimate();
//! println!("d = {:.3} m, phi = {:.3} rad", pose.d, pose.phi);
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention in the robot frame:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//!
//! The lane state is `d` (meters, positive left of the centerline) and
//! `phi` (radians, CCW positive relative to the lane direction).

#![warn(missing_docs)]

// Core types
pub mod core;

// Belief grid and diffusion
pub mod grid;

// Vision measurement model
pub mod measurement;

// Unified configuration
pub mod config;

// Error types
pub mod error;

// Filter orchestration
pub mod filter;

// Re-export commonly used types
pub use self::core::{
    EncoderTicks, LaneDisplacement, LanePose, Point2D, RobotSpec, Segment, SegmentColor,
};

pub use config::{ConfigLoadError, GridSection, LaneFilterConfig, NoiseSection, PriorSection};

pub use error::{FilterError, Result};

pub use filter::{LaneFilter, PredictResult, UpdateResult};

pub use grid::{gaussian_blur, BeliefGrid, BoundaryPolicy, Gaussian2D, GridSpec};

pub use measurement::{measurement_likelihood, prepare_segments, RoadSpec, Vote};
