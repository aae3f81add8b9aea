//! Machine learning building blocks

pub mod logistic;
pub mod metrics;
pub mod scaler;
pub mod split;

pub use logistic::{ModelError, SoftmaxRegression};
pub use metrics::{Metrics, MetricsReport};
pub use scaler::StandardScaler;
pub use split::{stratified_split, SplitData};
