//! Single-segment pose vote.
//!
//! Each lane-boundary segment pins down one (d, phi) hypothesis: its
//! direction fixes the heading error, its perpendicular distance fixes the
//! lateral offset once the color and edge orientation tell us which painted
//! line (and which side of it) we are looking at.

use crate::core::{Segment, SegmentColor};

use super::RoadSpec;

/// A single (offset, heading) hypothesis derived from one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vote {
    /// Lateral offset estimate (meters)
    pub d: f32,
    /// Heading estimate (radians)
    pub phi: f32,
    /// Along-track length estimate (meters); carried for diagnostics only
    pub length: f32,
}

/// Project one segment into a lane pose vote.
///
/// The segment tangent `t̂` and left-hand normal `n̂` give the signed
/// perpendicular distances and along-track positions of both endpoints; the
/// heading estimate is `asin(t̂_y)`. The color- and orientation-dependent
/// corrections then place the robot relative to the lane centerline:
///
/// - **White** (right boundary): a right-to-left segment is the line's right
///   edge, so the line width is subtracted; a left-to-right segment is the
///   left edge, which mirrors both estimates. Half a lane width is
///   subtracted either way.
/// - **Yellow** (left boundary): a left-to-right segment is the line's left
///   edge (line width subtracted, heading mirrored); a right-to-left segment
///   is the right edge (offset mirrored). The result is reflected about half
///   a lane width.
///
/// The edge-orientation branches are deliberately asymmetric between the two
/// colors; they encode which way the detector traverses each painted line.
///
/// Red segments get no correction and are expected to be filtered out before
/// voting. Zero-length segments have no direction and yield `None`.
pub fn vote_for(segment: &Segment, road: &RoadSpec) -> Option<Vote> {
    let p1 = segment.points[0];
    let p2 = segment.points[1];
    if (p2 - p1).length_squared() == 0.0 {
        return None;
    }

    let t_hat = (p2 - p1).normalize();
    let n_hat = t_hat.perpendicular();

    let d1 = n_hat.dot(&p1);
    let d2 = n_hat.dot(&p2);
    let l1 = t_hat.dot(&p1).abs();
    let l2 = t_hat.dot(&p2).abs();

    let length = (l1 + l2) / 2.0;
    let mut d_i = (d1 + d2) / 2.0;
    let mut phi_i = t_hat.y.asin();

    match segment.color {
        SegmentColor::White => {
            if p1.x > p2.x {
                // Right edge of the white line
                d_i -= road.linewidth_white;
            } else {
                // Left edge of the white line
                d_i = -d_i;
                phi_i = -phi_i;
            }
            d_i -= road.lanewidth / 2.0;
        }
        SegmentColor::Yellow => {
            if p2.x > p1.x {
                // Left edge of the yellow line
                d_i -= road.linewidth_yellow;
                phi_i = -phi_i;
            } else {
                // Right edge of the yellow line
                d_i = -d_i;
            }
            d_i = road.lanewidth / 2.0 - d_i;
        }
        SegmentColor::Red => {}
    }

    Some(Vote {
        d: d_i,
        phi: phi_i,
        length,
    })
}
