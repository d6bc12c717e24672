//! Measurement likelihood from segment votes.

use crate::core::{Segment, SegmentColor};
use crate::grid::{BeliefGrid, GridSpec};

use super::vote::vote_for;
use super::RoadSpec;

/// Filter a segment batch down to the ones worth voting on.
///
/// Keeps white and yellow segments with both endpoints ahead of the robot.
/// Red segments mark stop lines and carry no lane-pose information.
pub fn prepare_segments(segments: &[Segment]) -> Vec<&Segment> {
    segments
        .iter()
        .filter(|s| matches!(s.color, SegmentColor::White | SegmentColor::Yellow))
        .filter(|s| !s.is_behind_robot())
        .collect()
}

/// Accumulate segment votes into a normalized histogram over the grid.
///
/// Every segment contributes one unit of mass to the cell its vote lands
/// in (floor mapping, same as the predict scatter); votes outside the grid
/// bounds are discarded. Returns `None` when nothing voted, so callers can
/// tell "no measurement available" apart from a valid histogram.
pub fn measurement_likelihood(
    segments: &[&Segment],
    road: &RoadSpec,
    spec: &GridSpec,
) -> Option<BeliefGrid> {
    let mut histogram = BeliefGrid::zeros(spec);

    for segment in segments {
        let Some(vote) = vote_for(segment, road) else {
            continue;
        };
        if let Some((i, j)) = spec.cell_of(vote.d, vote.phi) {
            histogram.add(i, j, 1.0);
        }
    }

    if histogram.sum() == 0.0 {
        return None;
    }
    histogram.normalize();
    Some(histogram)
}
