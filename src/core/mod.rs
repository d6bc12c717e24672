//! Core types for the lane filter.
//!
//! All types follow the ROS REP-103 coordinate convention in the robot frame:
//! - **X-axis**: Forward (positive ahead of robot)
//! - **Y-axis**: Left (positive to robot's left)
//!
//! The lane-relative state is two-dimensional:
//! - **d**: lateral offset from the lane centerline (meters)
//! - **phi**: heading relative to the lane direction (radians, CCW positive)
//!
//! ## Type Categories
//!
//! ### Geometry
//! - [`Point2D`]: Robot-frame point/vector in meters
//! - [`Segment`]: Detected lane-boundary line segment with a [`SegmentColor`]
//!
//! ### Robot State
//! - [`LanePose`]: Lane-relative pose (d, phi)
//! - [`RobotSpec`]: Differential drive kinematic constants
//! - [`EncoderTicks`]: Raw wheel encoder reading
//! - [`LaneDisplacement`]: Per-cell displacement produced by the motion model

mod motion;
mod point;
mod pose;
mod segment;

pub use motion::{EncoderTicks, LaneDisplacement, RobotSpec};
pub use point::Point2D;
pub use pose::LanePose;
pub use segment::{Segment, SegmentColor};
