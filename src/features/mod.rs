//! Feature preparation: encoding and table transforms

pub mod encoding;
pub mod transform;

pub use encoding::LabelEncoder;
pub use transform::TransformStage;
