//! Training and evaluation pipeline
//!
//! Consumes the persisted split artifacts, fits the classifier, persists the
//! model, and reports evaluation metrics. Stages run strictly in order; a
//! failure in any stage aborts the run and propagates its typed error,
//! including evaluation, which fails loudly rather than being swallowed.

use super::{MODEL_FILE, X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE, Y_TRAIN_FILE};
use crate::data::artifacts;
use crate::error::{PipelineError, PipelineResult};
use crate::ml::{Metrics, MetricsReport, SoftmaxRegression, SplitData};
use ndarray::{Array1, Array2};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Classifier hyperparameters; fixed at compile time, not tunable per run
const SEED: u64 = 42;
const MAX_ITER: usize = 1000;
const LEARNING_RATE: f64 = 0.1;
const TOLERANCE: f64 = 1e-6;

/// Batch pipeline fitting and evaluating the efficiency classifier
pub struct TrainEvalPipeline {
    processed_dir: PathBuf,
    model_dir: PathBuf,
}

impl TrainEvalPipeline {
    pub fn new(processed_dir: impl Into<PathBuf>, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            processed_dir: processed_dir.into(),
            model_dir: model_dir.into(),
        }
    }

    /// Load the four split partitions
    ///
    /// All four files are read before any fitting; a missing or unreadable
    /// one aborts the run here.
    pub fn load(&self) -> PipelineResult<SplitData> {
        let x_train: Array2<f64> = artifacts::load(&self.processed_dir.join(X_TRAIN_FILE))?;
        let x_test: Array2<f64> = artifacts::load(&self.processed_dir.join(X_TEST_FILE))?;
        let y_train: Array1<f64> = artifacts::load(&self.processed_dir.join(Y_TRAIN_FILE))?;
        let y_test: Array1<f64> = artifacts::load(&self.processed_dir.join(Y_TEST_FILE))?;

        info!(
            "loaded split artifacts: {} train rows, {} test rows",
            x_train.nrows(),
            x_test.nrows()
        );
        Ok(SplitData {
            x_train,
            x_test,
            y_train,
            y_test,
        })
    }

    /// Fit the classifier and persist it
    pub fn train(
        &self,
        x_train: &Array2<f64>,
        y_train: &Array1<f64>,
    ) -> PipelineResult<SoftmaxRegression> {
        let mut model = SoftmaxRegression::new(LEARNING_RATE, MAX_ITER, TOLERANCE, SEED);
        model.fit(x_train, y_train)?;

        fs::create_dir_all(&self.model_dir)
            .map_err(|e| PipelineError::io(self.model_dir.as_path(), e))?;
        let model_path = self.model_dir.join(MODEL_FILE);
        artifacts::save(&model, &model_path)?;

        info!(
            "fitted classifier over {} classes and saved to {:?}",
            model.classes().len(),
            model_path
        );
        Ok(model)
    }

    /// Compute evaluation metrics on the held-out partition
    pub fn evaluate(
        &self,
        model: &SoftmaxRegression,
        x_test: &Array2<f64>,
        y_test: &Array1<f64>,
    ) -> PipelineResult<MetricsReport> {
        let predictions = model.predict(x_test)?;
        let report = Metrics::report(y_test, &predictions);

        info!("accuracy: {:.4}", report.accuracy);
        info!("precision (weighted): {:.4}", report.precision);
        info!("recall (weighted): {:.4}", report.recall);
        info!("f1 score (weighted): {:.4}", report.f1);
        Ok(report)
    }

    /// Execute load -> train -> evaluate
    pub fn run(&self) -> PipelineResult<MetricsReport> {
        let data = self
            .load()
            .inspect_err(|e| error!("training pipeline failed while loading: {e}"))?;
        let model = self
            .train(&data.x_train, &data.y_train)
            .inspect_err(|e| error!("training pipeline failed while fitting: {e}"))?;
        self.evaluate(&model, &data.x_test, &data.y_test)
            .inspect_err(|e| error!("training pipeline failed while evaluating: {e}"))
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}
