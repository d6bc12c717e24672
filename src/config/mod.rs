//! Unified filter configuration.
//!
//! All tunable parameters live in one [`LaneFilterConfig`] loaded from YAML,
//! with per-section defaults so a partial file (or none at all) still yields
//! a working filter:
//!
//! ```yaml
//! grid:
//!   d_min: -0.3
//!   d_max: 0.3
//!   n_d: 30
//! road:
//!   lanewidth: 0.23
//! process_noise:
//!   cov_mask: [[1.0, 0.0], [0.0, 2.0]]
//! boundary_policy: drop
//! ```

mod error;

pub use error::ConfigLoadError;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::RobotSpec;
use crate::error::FilterError;
use crate::grid::{BoundaryPolicy, Gaussian2D, GridSpec};
use crate::measurement::RoadSpec;

/// Grid discretization settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Lower bound of the offset axis (meters)
    pub d_min: f32,
    /// Upper bound of the offset axis (meters)
    pub d_max: f32,
    /// Number of offset cells
    pub n_d: usize,
    /// Lower bound of the heading axis (radians)
    pub phi_min: f32,
    /// Upper bound of the heading axis (radians)
    pub phi_max: f32,
    /// Number of heading cells
    pub n_phi: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            d_min: -0.3,
            d_max: 0.3,
            n_d: 30,
            phi_min: -1.5,
            phi_max: 1.5,
            n_phi: 30,
        }
    }
}

impl GridSection {
    /// Convert to the runtime grid spec
    pub fn to_grid_spec(&self) -> GridSpec {
        GridSpec::new(
            self.d_min, self.d_max, self.n_d, self.phi_min, self.phi_max, self.n_phi,
        )
    }
}

/// Process noise settings for the predict diffusion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NoiseSection {
    /// Covariance mask for the Gaussian diffusion, row-major over (d, phi).
    /// The diagonal sets the blur bandwidth per axis in cell units; the
    /// off-diagonal entries are accepted for completeness but ignored by the
    /// separable blur.
    pub cov_mask: [[f32; 2]; 2],
}

impl Default for NoiseSection {
    fn default() -> Self {
        Self {
            // 1 cell of offset diffusion, 2 cells of heading diffusion
            cov_mask: [[1.0, 0.0], [0.0, 2.0]],
        }
    }
}

impl NoiseSection {
    /// Blur bandwidth along the offset axis (cells)
    #[inline]
    pub fn sigma_d(&self) -> f32 {
        self.cov_mask[0][0]
    }

    /// Blur bandwidth along the heading axis (cells)
    #[inline]
    pub fn sigma_phi(&self) -> f32 {
        self.cov_mask[1][1]
    }
}

/// Gaussian prior settings for belief initialization.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PriorSection {
    /// Prior mean (d, phi)
    pub mean: [f32; 2],
    /// Prior covariance, row-major over (d, phi)
    pub cov: [[f32; 2]; 2],
}

impl Default for PriorSection {
    fn default() -> Self {
        Self {
            // Start centered in the lane, pointing down it
            mean: [0.0, 0.0],
            cov: [[0.1, 0.0], [0.0, 0.1]],
        }
    }
}

impl PriorSection {
    /// Build the continuous prior distribution.
    ///
    /// Fails when the configured covariance is singular.
    pub fn to_gaussian(&self) -> Result<Gaussian2D, FilterError> {
        Gaussian2D::new(self.mean, self.cov)
    }
}

/// Full lane filter configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LaneFilterConfig {
    /// Grid discretization
    #[serde(default)]
    pub grid: GridSection,

    /// Road geometry
    #[serde(default)]
    pub road: RoadSpec,

    /// Robot kinematics
    #[serde(default)]
    pub robot: RobotSpec,

    /// Predict-step diffusion
    #[serde(default)]
    pub process_noise: NoiseSection,

    /// Belief initialization
    #[serde(default)]
    pub prior: PriorSection,

    /// What to do with belief mass displaced past the grid bounds
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
}

impl LaneFilterConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/lane_filter.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/lane_filter.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert the grid section to the runtime grid spec
    pub fn to_grid_spec(&self) -> GridSpec {
        self.grid.to_grid_spec()
    }
}
