//! Odometry motion model for the lane filter.
//!
//! Converts raw wheel encoder ticks into a lane-frame displacement using
//! differential drive kinematics. The displacement is applied additively to
//! every belief cell's own centroid during the predict step.

use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/// Static kinematic constants of the robot.
///
/// # Example
///
/// ```
/// use marga_filter::RobotSpec;
///
/// // Default spec for a standard differential drive robot
/// let robot = RobotSpec::default();
/// assert!(robot.wheel_radius > 0.0);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RobotSpec {
    /// Wheel radius in meters
    pub wheel_radius: f32,

    /// Distance between the wheel contact points in meters
    pub wheel_baseline: f32,

    /// Encoder ticks per full wheel revolution
    pub encoder_resolution: f32,
}

impl Default for RobotSpec {
    fn default() -> Self {
        // Typical values for a small differential drive robot
        Self {
            wheel_radius: 0.0318,   // 31.8mm wheels
            wheel_baseline: 0.1,    // 10cm between wheels
            encoder_resolution: 135.0,
        }
    }
}

impl RobotSpec {
    /// Create a new robot spec with explicit parameters
    pub fn new(wheel_radius: f32, wheel_baseline: f32, encoder_resolution: f32) -> Self {
        Self {
            wheel_radius,
            wheel_baseline,
            encoder_resolution,
        }
    }

    /// Convert an encoder reading into a lane-frame displacement.
    ///
    /// Differential drive kinematics: each wheel's rotation angle is
    /// `2π · ticks / encoder_resolution`, its travel is the angle times the
    /// wheel radius, and the forward/angular components are
    ///
    /// ```text
    /// v = (d_left + d_right) / 2
    /// w = (d_right - d_left) / wheel_baseline
    /// ```
    pub fn displacement(&self, ticks: EncoderTicks) -> LaneDisplacement {
        let alpha = TAU / self.encoder_resolution;
        let d_left = alpha * ticks.left as f32 * self.wheel_radius;
        let d_right = alpha * ticks.right as f32 * self.wheel_radius;

        LaneDisplacement {
            d: (d_left + d_right) / 2.0,
            phi: (d_right - d_left) / self.wheel_baseline,
        }
    }
}

/// Raw wheel encoder reading for one predict cycle.
///
/// Positive tick counts mean forward wheel rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncoderTicks {
    /// Left wheel tick count since the last predict
    pub left: i32,
    /// Right wheel tick count since the last predict
    pub right: i32,
}

impl EncoderTicks {
    /// Create a new encoder reading
    #[inline]
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Did either wheel move?
    #[inline]
    pub fn any_motion(&self) -> bool {
        self.left != 0 || self.right != 0
    }
}

/// Displacement applied to every belief cell centroid during predict.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LaneDisplacement {
    /// Offset displacement in meters
    pub d: f32,
    /// Heading displacement in radians
    pub phi: f32,
}
