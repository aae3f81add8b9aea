//! The two batch pipelines and their shared artifact names
//!
//! The pipelines communicate only through files in the processed-data
//! directory; FeaturePipeline must complete before TrainEvalPipeline starts.
//! Concurrent runs against the same directories race (last writer wins);
//! no locking is provided.

pub mod features;
pub mod training;

pub use features::{FeaturePipeline, SplitSummary, FEATURE_COLUMNS, TARGET_COLUMN};
pub use training::TrainEvalPipeline;

/// Artifact file names under the processed-data directory
pub const X_TRAIN_FILE: &str = "X_train.bin";
pub const X_TEST_FILE: &str = "X_test.bin";
pub const Y_TRAIN_FILE: &str = "y_train.bin";
pub const Y_TEST_FILE: &str = "y_test.bin";
pub const SCALER_FILE: &str = "scaler.bin";

/// Model file name under the models directory
pub const MODEL_FILE: &str = "model.bin";
