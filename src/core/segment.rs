//! Detected lane-boundary line segments.
//!
//! Segments are produced by an external vision pipeline and consumed for one
//! measurement update only. Each segment carries two endpoints in the robot
//! frame and the color of the lane marking it was detected on.
//!
//! ## Segment Coordinate Frame
//!
//! ```text
//!          +X (Forward)
//!           ↑
//!           │   ╱ segment
//!           │  ╱
//!  +Y ──────┤
//!   Left    │
//! ```
//!
//! Segments with any endpoint at negative X are behind the robot and are
//! rejected before voting.

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// Color of the lane marking a segment was detected on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentColor {
    /// Right lane boundary (solid white line)
    White,
    /// Left lane boundary (dashed yellow line)
    Yellow,
    /// Stop line (ignored by the lane filter)
    Red,
}

/// A detected line segment in the robot frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment endpoints, in detection order
    pub points: [Point2D; 2],
    /// Detected marking color
    pub color: SegmentColor,
}

impl Segment {
    /// Create a new segment from two endpoints.
    #[inline]
    pub fn new(p1: Point2D, p2: Point2D, color: SegmentColor) -> Self {
        Self {
            points: [p1, p2],
            color,
        }
    }

    /// Segment length in meters.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.points[1] - self.points[0]).length()
    }

    /// Is any endpoint behind the robot (negative X)?
    #[inline]
    pub fn is_behind_robot(&self) -> bool {
        self.points[0].x < 0.0 || self.points[1].x < 0.0
    }

    /// Distance of the segment midpoint from the robot center.
    ///
    /// Useful for range-sorting segments before the update; the filter
    /// itself treats all segments equally.
    #[inline]
    pub fn distance_to_origin(&self) -> f32 {
        let mid = Point2D::new(
            (self.points[0].x + self.points[1].x) * 0.5,
            (self.points[0].y + self.points[1].y) * 0.5,
        );
        mid.length()
    }
}
