//! # ML Efficiency - Machine Efficiency Classification Pipeline
//!
//! This library turns a raw industrial telemetry log into a fitted
//! efficiency-status classifier through two batch pipelines that
//! communicate only through files:
//!
//! - Feature preparation: load, derive calendar fields, encode categoricals,
//!   scale, stratified split, persist
//! - Training and evaluation: load partitions, fit, persist, report metrics

pub mod data;
pub mod error;
pub mod features;
pub mod ml;
pub mod pipeline;

pub use data::{DataLoader, Frame, MachineRecord};
pub use error::{PipelineError, PipelineResult};
pub use features::LabelEncoder;
pub use ml::{Metrics, MetricsReport, SoftmaxRegression, StandardScaler};
pub use pipeline::{FeaturePipeline, TrainEvalPipeline};
