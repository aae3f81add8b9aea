//! Data structures and persistence for the telemetry pipeline

pub mod artifacts;
pub mod loader;
pub mod types;

pub use loader::DataLoader;
pub use types::{Column, Frame, MachineRecord};
