//! Belief grid over the lane-relative state space.
//!
//! The filter state is a probability mass histogram over a fixed 2D grid:
//! axis 0 is the lateral offset `d`, axis 1 the heading `phi`. [`GridSpec`]
//! defines the discretization; [`BeliefGrid`] holds the mass array and the
//! propagation scatter used by the predict step.
//!
//! ## Grid Layout
//!
//! ```text
//!        phi_min                phi_max
//!  d_min ┌────┬────┬────┬────┬────┐
//!        │    │    │    │    │    │   cell (i, j) center:
//!        ├────┼────┼────┼────┼────┤   d   = d_min   + (i + 0.5) * delta_d
//!        │    │    │    │    │    │   phi = phi_min + (j + 0.5) * delta_phi
//!  d_max └────┴────┴────┴────┴────┘
//! ```
//!
//! Storage is a flat row-major `Vec<f32>` (`index = i * n_phi + j`). All
//! operations take the [`GridSpec`] explicitly; the grid itself carries only
//! its dimensions.

mod gaussian;

pub use gaussian::{gaussian_blur, Gaussian2D};

use serde::{Deserialize, Serialize};

use crate::core::{LaneDisplacement, LanePose};

/// Discretization of the (d, phi) state space.
///
/// Cell sizes are derived from the bounds and cell counts, so
/// `delta_d == (d_max - d_min) / n_d` holds by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Lower bound of the offset axis (meters)
    pub d_min: f32,
    /// Upper bound of the offset axis (meters)
    pub d_max: f32,
    /// Offset cell size (meters)
    pub delta_d: f32,
    /// Lower bound of the heading axis (radians)
    pub phi_min: f32,
    /// Upper bound of the heading axis (radians)
    pub phi_max: f32,
    /// Heading cell size (radians)
    pub delta_phi: f32,
}

impl GridSpec {
    /// Create a grid spec from axis bounds and cell counts.
    pub fn new(d_min: f32, d_max: f32, n_d: usize, phi_min: f32, phi_max: f32, n_phi: usize) -> Self {
        Self {
            d_min,
            d_max,
            delta_d: (d_max - d_min) / n_d as f32,
            phi_min,
            phi_max,
            delta_phi: (phi_max - phi_min) / n_phi as f32,
        }
    }

    /// Number of cells along the offset axis.
    #[inline]
    pub fn n_d(&self) -> usize {
        ((self.d_max - self.d_min) / self.delta_d).round() as usize
    }

    /// Number of cells along the heading axis.
    #[inline]
    pub fn n_phi(&self) -> usize {
        ((self.phi_max - self.phi_min) / self.delta_phi).round() as usize
    }

    /// Offset value at the center of row `i`.
    #[inline]
    pub fn d_at(&self, i: usize) -> f32 {
        self.d_min + (i as f32 + 0.5) * self.delta_d
    }

    /// Heading value at the center of column `j`.
    #[inline]
    pub fn phi_at(&self, j: usize) -> f32 {
        self.phi_min + (j as f32 + 0.5) * self.delta_phi
    }

    /// Is the state inside the grid bounds (inclusive)?
    #[inline]
    pub fn contains(&self, d: f32, phi: f32) -> bool {
        !(d > self.d_max || d < self.d_min || phi > self.phi_max || phi < self.phi_min)
    }

    /// Map a state to its cell indices, or `None` when outside the bounds.
    ///
    /// Uses the floor mapping `(d - d_min) / delta_d`; a state exactly on the
    /// upper boundary lands in the last cell.
    #[inline]
    pub fn cell_of(&self, d: f32, phi: f32) -> Option<(usize, usize)> {
        if !self.contains(d, phi) {
            return None;
        }
        let i = (((d - self.d_min) / self.delta_d) as usize).min(self.n_d() - 1);
        let j = (((phi - self.phi_min) / self.delta_phi) as usize).min(self.n_phi() - 1);
        Some((i, j))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        // 2cm offset cells over +/-30cm, ~5.7 degree heading cells over +/-86 degrees
        Self::new(-0.3, 0.3, 30, -1.5, 1.5, 30)
    }
}

/// Policy for belief mass whose displaced centroid leaves the grid.
///
/// The source-faithful behavior is [`Drop`](BoundaryPolicy::Drop): mass that
/// propagates past the grid boundary is discarded, so the total mass is not
/// conserved across a predict step near the boundary. [`Clamp`](BoundaryPolicy::Clamp)
/// instead pins the displaced centroid to the nearest in-range state, which
/// conserves mass at the cost of piling it up on the border rows/columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Discard mass that leaves the grid (source-faithful default)
    #[default]
    Drop,
    /// Clamp displaced centroids to the grid bounds
    Clamp,
}

/// Probability mass histogram over a [`GridSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct BeliefGrid {
    data: Vec<f32>,
    n_d: usize,
    n_phi: usize,
}

impl BeliefGrid {
    /// Create an all-zero grid matching the spec's dimensions.
    pub fn zeros(spec: &GridSpec) -> Self {
        let n_d = spec.n_d();
        let n_phi = spec.n_phi();
        Self {
            data: vec![0.0; n_d * n_phi],
            n_d,
            n_phi,
        }
    }

    /// Discretize a continuous Gaussian prior onto the grid.
    ///
    /// Each cell receives the bivariate normal density evaluated at its
    /// center. The result is a raw density sample, not normalized; callers
    /// that need a unit-sum belief must call [`normalize`](Self::normalize).
    pub fn from_prior(spec: &GridSpec, prior: &Gaussian2D) -> Self {
        let mut grid = Self::zeros(spec);
        for i in 0..grid.n_d {
            for j in 0..grid.n_phi {
                grid.data[i * grid.n_phi + j] = prior.pdf(spec.d_at(i), spec.phi_at(j));
            }
        }
        grid
    }

    /// Rows (offset cells).
    #[inline]
    pub fn n_d(&self) -> usize {
        self.n_d
    }

    /// Columns (heading cells).
    #[inline]
    pub fn n_phi(&self) -> usize {
        self.n_phi
    }

    /// Mass at cell (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n_phi + j]
    }

    /// Set the mass at cell (i, j).
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        self.data[i * self.n_phi + j] = value;
    }

    /// Add mass to cell (i, j).
    #[inline]
    pub fn add(&mut self, i: usize, j: usize, mass: f32) {
        self.data[i * self.n_phi + j] += mass;
    }

    /// Raw mass array, row-major over (d, phi).
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Total mass.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Divide every cell by the total mass.
    ///
    /// Returns `false` (leaving the grid untouched) when the total is zero.
    pub fn normalize(&mut self) -> bool {
        let total = self.sum();
        if total == 0.0 {
            return false;
        }
        for v in &mut self.data {
            *v /= total;
        }
        true
    }

    /// Indices of the cell with the largest mass (first maximum wins).
    pub fn argmax(&self) -> (usize, usize) {
        let mut best = 0;
        for (idx, &v) in self.data.iter().enumerate() {
            if v > self.data[best] {
                best = idx;
            }
        }
        (best / self.n_phi, best % self.n_phi)
    }

    /// State at the center of the cell with the largest mass.
    pub fn argmax_pose(&self, spec: &GridSpec) -> LanePose {
        let (i, j) = self.argmax();
        LanePose::new(spec.d_at(i), spec.phi_at(j))
    }

    /// Scatter every cell's mass to the cell containing its displaced centroid.
    ///
    /// For each cell with strictly positive mass, the centroid `(d, phi)` is
    /// displaced by the motion model output and the full mass is deposited
    /// into the destination cell under the floor mapping; masses meeting at
    /// the same destination sum. No interpolation across neighbors is
    /// performed. Out-of-range centroids are handled per the
    /// [`BoundaryPolicy`].
    pub fn propagate(
        &self,
        spec: &GridSpec,
        displacement: LaneDisplacement,
        policy: BoundaryPolicy,
    ) -> BeliefGrid {
        let mut out = BeliefGrid::zeros(spec);

        for i in 0..self.n_d {
            for j in 0..self.n_phi {
                let mass = self.get(i, j);
                if mass <= 0.0 {
                    continue;
                }

                let mut d_t = spec.d_at(i) + displacement.d;
                let mut phi_t = spec.phi_at(j) + displacement.phi;

                if !spec.contains(d_t, phi_t) {
                    match policy {
                        BoundaryPolicy::Drop => continue,
                        BoundaryPolicy::Clamp => {
                            d_t = d_t.clamp(spec.d_min, spec.d_max);
                            phi_t = phi_t.clamp(spec.phi_min, spec.phi_max);
                        }
                    }
                }

                if let Some((i_new, j_new)) = spec.cell_of(d_t, phi_t) {
                    out.add(i_new, j_new, mass);
                }
            }
        }

        out
    }

    /// Elementwise product with another grid of the same shape.
    pub fn product(&self, other: &BeliefGrid) -> BeliefGrid {
        debug_assert_eq!(self.n_d, other.n_d);
        debug_assert_eq!(self.n_phi, other.n_phi);

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .collect();
        BeliefGrid {
            data,
            n_d: self.n_d,
            n_phi: self.n_phi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GridSpec {
        GridSpec::new(-0.3, 0.3, 30, -1.5, 1.5, 30)
    }

    #[test]
    fn test_spec_dimensions() {
        let spec = spec();
        assert_eq!(spec.n_d(), 30);
        assert_eq!(spec.n_phi(), 30);
        assert!((spec.delta_d - 0.02).abs() < 1e-6);
        assert!((spec.delta_phi - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_cell_centers() {
        let spec = spec();
        assert!((spec.d_at(0) - (-0.29)).abs() < 1e-6);
        assert!((spec.phi_at(29) - 1.45).abs() < 1e-6);
    }

    #[test]
    fn test_cell_of_round_trip() {
        let spec = spec();
        for i in 0..spec.n_d() {
            for j in 0..spec.n_phi() {
                assert_eq!(spec.cell_of(spec.d_at(i), spec.phi_at(j)), Some((i, j)));
            }
        }
    }

    #[test]
    fn test_cell_of_out_of_range() {
        let spec = spec();
        assert_eq!(spec.cell_of(0.31, 0.0), None);
        assert_eq!(spec.cell_of(0.0, -1.51), None);
    }

    #[test]
    fn test_cell_of_upper_boundary_lands_in_last_cell() {
        let spec = spec();
        assert_eq!(spec.cell_of(spec.d_max, spec.phi_max), Some((29, 29)));
    }

    #[test]
    fn test_normalize() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(3, 4, 2.0);
        grid.set(10, 10, 2.0);
        assert!(grid.normalize());
        assert!((grid.sum() - 1.0).abs() < 1e-6);
        assert!((grid.get(3, 4) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_grid() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        assert!(!grid.normalize());
        assert_eq!(grid.sum(), 0.0);
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(2, 5, 1.0);
        grid.set(20, 7, 1.0);
        assert_eq!(grid.argmax(), (2, 5));
    }

    #[test]
    fn test_propagate_zero_displacement_is_identity() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(5, 5, 0.25);
        grid.set(15, 20, 0.75);

        let out = grid.propagate(&spec, LaneDisplacement::default(), BoundaryPolicy::Drop);
        assert_eq!(out, grid);
    }

    #[test]
    fn test_propagate_shifts_mass_by_one_cell() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(5, 5, 1.0);

        let disp = LaneDisplacement {
            d: spec.delta_d,
            phi: 0.0,
        };
        let out = grid.propagate(&spec, disp, BoundaryPolicy::Drop);
        assert!((out.get(6, 5) - 1.0).abs() < 1e-6);
        assert_eq!(out.get(5, 5), 0.0);
    }

    #[test]
    fn test_propagate_drops_mass_out_of_bounds() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(29, 5, 1.0);

        // Push the top row past d_max
        let disp = LaneDisplacement { d: 0.1, phi: 0.0 };
        let out = grid.propagate(&spec, disp, BoundaryPolicy::Drop);
        assert_eq!(out.sum(), 0.0);
    }

    #[test]
    fn test_propagate_clamp_keeps_mass_on_border() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(29, 5, 1.0);

        let disp = LaneDisplacement { d: 0.1, phi: 0.0 };
        let out = grid.propagate(&spec, disp, BoundaryPolicy::Clamp);
        assert!((out.get(29, 5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_propagate_clamp_merges_colliding_mass() {
        // Two rows pushed past the boundary clamp into the same border cell
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(28, 5, 0.5);
        grid.set(29, 5, 0.5);

        let disp = LaneDisplacement { d: 0.1, phi: 0.0 };
        let out = grid.propagate(&spec, disp, BoundaryPolicy::Clamp);
        assert!((out.get(29, 5) - 1.0).abs() < 1e-6);
        assert!((out.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_product() {
        let spec = spec();
        let mut a = BeliefGrid::zeros(&spec);
        let mut b = BeliefGrid::zeros(&spec);
        a.set(1, 1, 0.5);
        a.set(2, 2, 0.5);
        b.set(1, 1, 1.0);

        let p = a.product(&b);
        assert!((p.get(1, 1) - 0.5).abs() < 1e-6);
        assert_eq!(p.get(2, 2), 0.0);
    }
}
