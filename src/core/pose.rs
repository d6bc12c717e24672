//! Lane-relative pose.

use serde::{Deserialize, Serialize};

/// Robot pose relative to the lane centerline.
///
/// - `d`: lateral offset in meters, positive when the robot is left of center
/// - `phi`: heading error in radians, positive when rotated counter-clockwise
///   relative to the lane direction
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LanePose {
    /// Lateral offset from the lane centerline (meters)
    pub d: f32,
    /// Heading relative to the lane direction (radians)
    pub phi: f32,
}

impl LanePose {
    /// Create a new lane pose
    #[inline]
    pub fn new(d: f32, phi: f32) -> Self {
        Self { d, phi }
    }
}
