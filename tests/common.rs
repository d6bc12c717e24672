//! Test utilities for lane filter integration tests.
//!
//! Provides segment builders that invert the measurement model: given a true
//! lane pose, they place boundary segments where the vision pipeline would
//! see them in the robot frame.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marga_filter::{Point2D, RoadSpec, Segment, SegmentColor};

/// Rotate a point by `angle` radians CCW.
fn rotate(p: Point2D, angle: f32) -> Point2D {
    let (sin_a, cos_a) = angle.sin_cos();
    Point2D::new(p.x * cos_a - p.y * sin_a, p.x * sin_a + p.y * cos_a)
}

/// White line left edge as seen by a robot at lane pose (d, phi).
///
/// The segment runs in the lane direction (endpoint x increasing before
/// rotation), which is the left-edge traversal order for white.
pub fn white_segment(d: f32, phi: f32, road: &RoadSpec, x1: f32, x2: f32) -> Segment {
    let y = -road.lanewidth / 2.0 - d;
    Segment::new(
        rotate(Point2D::new(x1, y), -phi),
        rotate(Point2D::new(x2, y), -phi),
        SegmentColor::White,
    )
}

/// Yellow line right edge as seen by a robot at lane pose (d, phi).
///
/// Traversed against the lane direction, the right-edge order for yellow.
pub fn yellow_segment(d: f32, phi: f32, road: &RoadSpec, x1: f32, x2: f32) -> Segment {
    let y = road.lanewidth / 2.0 - d;
    Segment::new(
        rotate(Point2D::new(x2, y), -phi),
        rotate(Point2D::new(x1, y), -phi),
        SegmentColor::Yellow,
    )
}

/// A mixed batch of boundary segments consistent with one lane pose.
pub fn lane_segments(d: f32, phi: f32, road: &RoadSpec, count: usize) -> Vec<Segment> {
    (0..count)
        .map(|k| {
            let x1 = 0.2 + 0.05 * k as f32;
            let x2 = x1 + 0.2;
            if k % 2 == 0 {
                white_segment(d, phi, road, x1, x2)
            } else {
                yellow_segment(d, phi, road, x1, x2)
            }
        })
        .collect()
}

/// Perturb segment endpoints with uniform noise (deterministic seed).
pub fn add_noise(segments: &[Segment], amplitude: f32, seed: u64) -> Vec<Segment> {
    let mut rng = StdRng::seed_from_u64(seed);
    segments
        .iter()
        .map(|s| {
            let jitter = |p: Point2D, rng: &mut StdRng| {
                Point2D::new(
                    p.x + rng.gen_range(-amplitude..amplitude),
                    p.y + rng.gen_range(-amplitude..amplitude),
                )
            };
            Segment::new(
                jitter(s.points[0], &mut rng),
                jitter(s.points[1], &mut rng),
                s.color,
            )
        })
        .collect()
}
