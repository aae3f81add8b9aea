//! Feature standardization
//!
//! The fitted scaler is the single owner of standardization parameters: it
//! is fit once on the full feature matrix, persisted next to the split
//! partitions, and reused for any later transform with the same statistics.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature standard scaler (zero mean, unit variance)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    /// Fit the scaler on a feature matrix
    pub fn fit(x: &Array2<f64>) -> Self {
        let means = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(x.ncols()));
        let stds = x.std_axis(Axis(0), 0.0);
        Self { means, stds }
    }

    /// Standardize a matrix with the fitted statistics
    ///
    /// Zero-variance features map to 0 instead of dividing by zero.
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut result = Array2::zeros(x.raw_dim());
        for (j, mut col) in result.columns_mut().into_iter().enumerate() {
            let mean = self.means[j];
            let std = self.stds[j];
            for (i, val) in col.iter_mut().enumerate() {
                if std > 1e-10 {
                    *val = (x[[i, j]] - mean) / std;
                } else {
                    *val = 0.0;
                }
            }
        }
        result
    }

    /// Fit on a matrix and return its standardized form
    pub fn fit_transform(x: &Array2<f64>) -> (Self, Array2<f64>) {
        let scaler = Self::fit(x);
        let scaled = scaler.transform(x);
        (scaler, scaled)
    }

    /// Fitted per-feature means
    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Fitted per-feature standard deviations
    pub fn stds(&self) -> &Array1<f64> {
        &self.stds
    }
}
