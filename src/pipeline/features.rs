//! Feature preparation pipeline
//!
//! Transforms the raw telemetry log into the persisted training artifacts:
//! load -> preprocess -> split_scale_save. Stages run strictly in order and
//! any failure aborts the run; nothing is retried and no partial artifacts
//! are cleaned up.

use super::{SCALER_FILE, X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE, Y_TRAIN_FILE};
use crate::data::{artifacts, DataLoader, Frame, MachineRecord};
use crate::error::{PipelineError, PipelineResult};
use crate::features::transform;
use crate::ml::{stratified_split, StandardScaler};
use ndarray::Array1;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Columns fed to the model, in matrix order; the target is never a feature
pub const FEATURE_COLUMNS: [&str; 10] = [
    "Operation_Mode",
    "Temperature_C",
    "Vibration_Hz",
    "Power_Consumption_kW",
    "Network_Latency_ms",
    "Packet_Loss_%",
    "Quality_Control_Defect_Rate_%",
    "Production_Speed_units_per_hr",
    "Predictive_Maintenance_Score",
    "Error_Rate_%",
];

/// Column holding the encoded efficiency-status label
pub const TARGET_COLUMN: &str = "Efficiency_Status";

/// Held-out share of rows
const TEST_RATIO: f64 = 0.2;
/// Seed for the stratified split
const SPLIT_SEED: u64 = 42;

/// Row counts of the persisted partitions
#[derive(Debug, Clone, Copy)]
pub struct SplitSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_features: usize,
}

/// Batch pipeline turning the raw log into model-ready artifacts
pub struct FeaturePipeline {
    input_path: PathBuf,
    output_dir: PathBuf,
}

impl FeaturePipeline {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Load the raw telemetry log
    pub fn load(&self) -> PipelineResult<Vec<MachineRecord>> {
        let records = DataLoader::load_records(&self.input_path)?;
        info!("loaded {} raw records from {:?}", records.len(), self.input_path);
        Ok(records)
    }

    /// Run the ordered transform stages over the columnized records
    pub fn preprocess(&self, records: &[MachineRecord]) -> PipelineResult<Frame> {
        let mut frame = Frame::from_records(records);
        for stage in transform::stages() {
            frame = (stage.apply)(frame)?;
            info!("transform stage {:?} complete", stage.name);
        }
        Ok(frame)
    }

    /// Select features, fit and apply the scaler, split, and persist
    ///
    /// All in-memory work happens before the first write, so a schema
    /// failure leaves the output directory untouched.
    pub fn split_scale_save(&self, frame: &Frame) -> PipelineResult<SplitSummary> {
        let x = frame.select(&FEATURE_COLUMNS)?;
        let y = Array1::from_vec(frame.numeric_column(TARGET_COLUMN)?.to_vec());

        let (scaler, x_scaled) = StandardScaler::fit_transform(&x);
        let split = stratified_split(&x_scaled, &y, TEST_RATIO, SPLIT_SEED);
        let summary = SplitSummary {
            train_rows: split.x_train.nrows(),
            test_rows: split.x_test.nrows(),
            n_features: FEATURE_COLUMNS.len(),
        };

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| PipelineError::io(self.output_dir.as_path(), e))?;
        artifacts::save(&split.x_train, &self.output_dir.join(X_TRAIN_FILE))?;
        artifacts::save(&split.x_test, &self.output_dir.join(X_TEST_FILE))?;
        artifacts::save(&split.y_train, &self.output_dir.join(Y_TRAIN_FILE))?;
        artifacts::save(&split.y_test, &self.output_dir.join(Y_TEST_FILE))?;
        artifacts::save(&scaler, &self.output_dir.join(SCALER_FILE))?;

        info!(
            "persisted {} train / {} test rows and scaler to {:?}",
            summary.train_rows, summary.test_rows, self.output_dir
        );
        Ok(summary)
    }

    /// Execute load -> preprocess -> split_scale_save
    pub fn run(&self) -> PipelineResult<SplitSummary> {
        let records = self
            .load()
            .inspect_err(|e| error!("feature pipeline failed while loading: {e}"))?;
        let frame = self
            .preprocess(&records)
            .inspect_err(|e| error!("feature pipeline failed while preprocessing: {e}"))?;
        self.split_scale_save(&frame)
            .inspect_err(|e| error!("feature pipeline failed while persisting: {e}"))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
