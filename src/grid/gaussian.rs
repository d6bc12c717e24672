//! Bivariate normal density and Gaussian diffusion for the belief grid.
//!
//! Two numeric helpers live here:
//!
//! - [`Gaussian2D`]: the continuous prior evaluated at cell centers by
//!   [`BeliefGrid::from_prior`](super::BeliefGrid::from_prior)
//! - [`gaussian_blur`]: separable 2D convolution used to model process noise
//!   after the propagation scatter

use std::f32::consts::TAU;

use crate::error::FilterError;

use super::BeliefGrid;

/// Kernel support in standard deviations, matching the common
/// scipy `gaussian_filter` truncation.
const TRUNCATE: f32 = 4.0;

/// A bivariate normal distribution over (d, phi).
#[derive(Clone, Copy, Debug)]
pub struct Gaussian2D {
    mean: [f32; 2],
    /// Inverse covariance, row-major
    inv_cov: [[f32; 2]; 2],
    /// 1 / (2π √det)
    norm: f32,
}

impl Gaussian2D {
    /// Build the distribution from a mean and a 2x2 covariance matrix.
    ///
    /// Fails with [`FilterError::SingularCovariance`] when the covariance
    /// determinant is not strictly positive.
    pub fn new(mean: [f32; 2], cov: [[f32; 2]; 2]) -> Result<Self, FilterError> {
        let det = cov[0][0] * cov[1][1] - cov[0][1] * cov[1][0];
        if det <= 0.0 {
            return Err(FilterError::SingularCovariance { det });
        }

        let inv_cov = [
            [cov[1][1] / det, -cov[0][1] / det],
            [-cov[1][0] / det, cov[0][0] / det],
        ];

        Ok(Self {
            mean,
            inv_cov,
            norm: 1.0 / (TAU * det.sqrt()),
        })
    }

    /// Density at (d, phi).
    pub fn pdf(&self, d: f32, phi: f32) -> f32 {
        let dx = d - self.mean[0];
        let dy = phi - self.mean[1];
        let quad = dx * (self.inv_cov[0][0] * dx + self.inv_cov[0][1] * dy)
            + dy * (self.inv_cov[1][0] * dx + self.inv_cov[1][1] * dy);
        self.norm * (-0.5 * quad).exp()
    }
}

/// Normalized 1D Gaussian kernel with radius `truncate * sigma`.
fn kernel_1d(sigma: f32) -> Vec<f32> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    let inv_two_var = 1.0 / (2.0 * sigma * sigma);

    let mut total = 0.0;
    for k in 0..=(2 * radius) {
        let x = k as f32 - radius as f32;
        let w = (-x * x * inv_two_var).exp();
        kernel.push(w);
        total += w;
    }
    for w in &mut kernel {
        *w /= total;
    }
    kernel
}

/// Convolve along one axis with zero padding at the borders.
///
/// `axis` 0 smears mass across offset rows, `axis` 1 across heading columns.
fn blur_axis(grid: &BeliefGrid, sigma: f32, axis: usize) -> BeliefGrid {
    if sigma <= 0.0 {
        return grid.clone();
    }

    let kernel = kernel_1d(sigma);
    let radius = (kernel.len() / 2) as isize;
    let (n_d, n_phi) = (grid.n_d(), grid.n_phi());

    let mut out = grid.clone();
    for i in 0..n_d {
        for j in 0..n_phi {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let off = k as isize - radius;
                let (si, sj) = if axis == 0 {
                    (i as isize + off, j as isize)
                } else {
                    (i as isize, j as isize + off)
                };
                // Zero padding: out-of-grid taps contribute nothing
                if si < 0 || sj < 0 || si >= n_d as isize || sj >= n_phi as isize {
                    continue;
                }
                acc += w * grid.get(si as usize, sj as usize);
            }
            out.set(i, j, acc);
        }
    }
    out
}

/// Separable 2D Gaussian blur with zero-padded borders.
///
/// The per-axis bandwidths are in cell units. Because the borders are
/// zero-padded, blurring leaks mass off the grid edges; callers renormalize
/// afterwards.
pub fn gaussian_blur(grid: &BeliefGrid, sigma_d: f32, sigma_phi: f32) -> BeliefGrid {
    let pass = blur_axis(grid, sigma_d, 0);
    blur_axis(&pass, sigma_phi, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    fn spec() -> GridSpec {
        GridSpec::new(-0.3, 0.3, 30, -1.5, 1.5, 30)
    }

    #[test]
    fn test_gaussian_rejects_singular_covariance() {
        let result = Gaussian2D::new([0.0, 0.0], [[1.0, 1.0], [1.0, 1.0]]);
        assert!(matches!(
            result,
            Err(FilterError::SingularCovariance { .. })
        ));
    }

    #[test]
    fn test_pdf_peaks_at_mean() {
        let g = Gaussian2D::new([0.1, -0.2], [[0.1, 0.0], [0.0, 0.1]]).unwrap();
        let at_mean = g.pdf(0.1, -0.2);
        assert!(at_mean > g.pdf(0.2, -0.2));
        assert!(at_mean > g.pdf(0.1, 0.0));
    }

    #[test]
    fn test_pdf_symmetric_around_mean() {
        let g = Gaussian2D::new([0.0, 0.0], [[0.05, 0.0], [0.0, 0.2]]).unwrap();
        assert!((g.pdf(0.1, 0.3) - g.pdf(-0.1, -0.3)).abs() < 1e-7);
    }

    #[test]
    fn test_kernel_sums_to_one() {
        let kernel = kernel_1d(1.5);
        let total: f32 = kernel.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_blur_spreads_mass_symmetrically() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(15, 15, 1.0);

        let blurred = gaussian_blur(&grid, 1.0, 1.0);
        assert!(blurred.get(15, 15) > blurred.get(14, 15));
        assert!((blurred.get(14, 15) - blurred.get(16, 15)).abs() < 1e-6);
        assert!((blurred.get(15, 14) - blurred.get(15, 16)).abs() < 1e-6);
    }

    #[test]
    fn test_blur_interior_preserves_mass() {
        // A peak far from the borders loses nothing to the zero padding
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(15, 15, 1.0);

        let blurred = gaussian_blur(&grid, 1.0, 1.0);
        assert!((blurred.sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_blur_border_leaks_mass() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(0, 0, 1.0);

        let blurred = gaussian_blur(&grid, 1.0, 1.0);
        assert!(blurred.sum() < 1.0);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let spec = spec();
        let mut grid = BeliefGrid::zeros(&spec);
        grid.set(3, 7, 0.5);

        let blurred = gaussian_blur(&grid, 0.0, 0.0);
        assert_eq!(blurred, grid);
    }
}
