//! Multinomial logistic regression
//!
//! Softmax classifier fit by batch gradient descent. Class labels are
//! learned from the training vector (sorted distinct values), so the model
//! handles the binary case and the general multiclass case with the same
//! code path.

use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors for the softmax classifier
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model has not been fitted yet")]
    NotFitted,

    #[error("dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("training set is empty")]
    EmptyTrainingSet,
}

/// Multinomial logistic regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    /// Fitted weights (n_classes x n_features)
    weights: Option<Array2<f64>>,
    /// Fitted intercepts (n_classes)
    intercepts: Option<Array1<f64>>,
    /// Class labels in code order
    classes: Vec<f64>,
    learning_rate: f64,
    max_iter: usize,
    tolerance: f64,
    seed: u64,
}

impl SoftmaxRegression {
    /// Create an unfitted model with the given hyperparameters
    pub fn new(learning_rate: f64, max_iter: usize, tolerance: f64, seed: u64) -> Self {
        Self {
            weights: None,
            intercepts: None,
            classes: Vec::new(),
            learning_rate,
            max_iter,
            tolerance,
            seed,
        }
    }

    /// Class labels learned during fitting, in code order
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    fn softmax_rows(mut z: Array2<f64>) -> Array2<f64> {
        for mut row in z.rows_mut() {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.mapv_inplace(|v| (v - max).exp());
            let sum = row.sum();
            if sum > 0.0 {
                row.mapv_inplace(|v| v / sum);
            }
        }
        z
    }

    fn class_index(&self, label: f64) -> Option<usize> {
        self.classes
            .iter()
            .position(|&c| (c - label).abs() < 1e-10)
    }

    /// Fit by batch gradient descent
    ///
    /// Weight initialization is drawn from a seeded normal, so a fixed seed
    /// reproduces the fit exactly.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();
        if n_samples == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if y.len() != n_samples {
            return Err(ModelError::DimensionMismatch {
                expected: n_samples,
                got: y.len(),
            });
        }

        let mut classes: Vec<f64> = y.iter().copied().collect();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup_by(|a, b| (*a - *b).abs() < 1e-10);
        self.classes = classes;
        let n_classes = self.classes.len();

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut weights = Array2::from_shape_fn((n_classes, n_features), |_| {
            let noise: f64 = StandardNormal.sample(&mut rng);
            noise * 0.01
        });
        let mut intercepts = Array1::<f64>::zeros(n_classes);

        let mut y_onehot = Array2::<f64>::zeros((n_samples, n_classes));
        for (i, &label) in y.iter().enumerate() {
            if let Some(c) = self.class_index(label) {
                y_onehot[[i, c]] = 1.0;
            }
        }

        let n = n_samples as f64;
        for iter in 0..self.max_iter {
            let weights_old = weights.clone();

            let linear = x.dot(&weights.t()) + &intercepts;
            let proba = Self::softmax_rows(linear);

            let errors = &proba - &y_onehot;
            let grad_w = errors.t().dot(x) / n;
            let grad_b = errors.sum_axis(Axis(0)) / n;

            weights = weights - grad_w * self.learning_rate;
            intercepts = intercepts - grad_b * self.learning_rate;

            let delta: f64 = weights
                .iter()
                .zip(weights_old.iter())
                .map(|(&a, &b)| (a - b).abs())
                .sum();
            if delta < self.tolerance {
                debug!("converged after {} iterations", iter + 1);
                break;
            }
        }

        self.weights = Some(weights);
        self.intercepts = Some(intercepts);
        Ok(())
    }

    /// Class probability matrix (n_samples x n_classes)
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let weights = self.weights.as_ref().ok_or(ModelError::NotFitted)?;
        let intercepts = self.intercepts.as_ref().ok_or(ModelError::NotFitted)?;

        if x.ncols() != weights.ncols() {
            return Err(ModelError::DimensionMismatch {
                expected: weights.ncols(),
                got: x.ncols(),
            });
        }

        let linear = x.dot(&weights.t()) + intercepts;
        Ok(Self::softmax_rows(linear))
    }

    /// Predicted class labels
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let proba = self.predict_proba(x)?;

        let labels: Vec<f64> = proba
            .rows()
            .into_iter()
            .map(|row| {
                let best = row
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| {
                        a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map_or(0, |(i, _)| i);
                self.classes[best]
            })
            .collect();

        Ok(Array1::from_vec(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    fn separable_two_class() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.2],
            [5.0, 5.1],
            [5.2, 4.9],
            [4.8, 5.0]
        ];
        let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_fit_separable_data() {
        let (x, y) = separable_two_class();
        let mut model = SoftmaxRegression::new(0.5, 2000, 1e-9, 42);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = SoftmaxRegression::new(0.1, 100, 1e-6, 42);
        let x = array![[1.0, 2.0]];
        assert!(matches!(model.predict(&x), Err(ModelError::NotFitted)));
    }

    #[test]
    fn test_feature_dimension_mismatch() {
        let (x, y) = separable_two_class();
        let mut model = SoftmaxRegression::new(0.5, 500, 1e-9, 42);
        model.fit(&x, &y).unwrap();

        let wrong = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            model.predict(&wrong),
            Err(ModelError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let (x, y) = separable_two_class();

        let mut a = SoftmaxRegression::new(0.5, 200, 1e-12, 42);
        let mut b = SoftmaxRegression::new(0.5, 200, 1e-12, 42);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        assert_eq!(
            a.predict_proba(&x).unwrap(),
            b.predict_proba(&x).unwrap()
        );
    }

    #[test]
    fn test_three_class_fit() {
        let x = array![
            [0.0, 0.0],
            [0.1, 0.1],
            [5.0, 0.0],
            [5.1, 0.1],
            [0.0, 5.0],
            [0.1, 5.1]
        ];
        let y = array![0.0, 0.0, 1.0, 1.0, 2.0, 2.0];

        let mut model = SoftmaxRegression::new(0.5, 3000, 1e-10, 7);
        model.fit(&x, &y).unwrap();

        assert_eq!(model.classes(), &[0.0, 1.0, 2.0]);
        assert_eq!(model.predict(&x).unwrap(), y);

        let proba = model.predict_proba(&x).unwrap();
        for row in proba.rows() {
            let sum: f64 = row.sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_training_set() {
        let mut model = SoftmaxRegression::new(0.1, 100, 1e-6, 42);
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        assert!(matches!(
            model.fit(&x, &y),
            Err(ModelError::EmptyTrainingSet)
        ));
    }
}
