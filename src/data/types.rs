//! Core data types for the telemetry pipeline
//!
//! This module defines the two table representations the feature pipeline
//! works with:
//! - MachineRecord: one strictly-typed row of the raw telemetry log
//! - Frame: an ordered column table that preprocessing reshapes in place

use crate::error::{PipelineError, PipelineResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One snapshot of machine telemetry from the raw production log
///
/// Field names map 1:1 onto the source CSV headers; the header set is a
/// strict contract checked by the loader before any row is parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRecord {
    /// Observation instant; unparseable values degrade to missing calendar
    /// fields during preprocessing instead of failing the run
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Machine_ID")]
    pub machine_id: String,
    #[serde(rename = "Operation_Mode")]
    pub operation_mode: String,
    #[serde(rename = "Temperature_C")]
    pub temperature_c: f64,
    #[serde(rename = "Vibration_Hz")]
    pub vibration_hz: f64,
    #[serde(rename = "Power_Consumption_kW")]
    pub power_consumption_kw: f64,
    #[serde(rename = "Network_Latency_ms")]
    pub network_latency_ms: f64,
    #[serde(rename = "Packet_Loss_%")]
    pub packet_loss_pct: f64,
    #[serde(rename = "Quality_Control_Defect_Rate_%")]
    pub defect_rate_pct: f64,
    #[serde(rename = "Production_Speed_units_per_hr")]
    pub production_speed: f64,
    #[serde(rename = "Predictive_Maintenance_Score")]
    pub maintenance_score: f64,
    #[serde(rename = "Error_Rate_%")]
    pub error_rate_pct: f64,
    #[serde(rename = "Efficiency_Status")]
    pub efficiency_status: String,
}

impl MachineRecord {
    /// Every column the raw log must carry
    pub const REQUIRED_COLUMNS: [&'static str; 13] = [
        "Timestamp",
        "Machine_ID",
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
        "Efficiency_Status",
    ];
}

/// A single column of a [`Frame`]
#[derive(Debug, Clone)]
pub enum Column {
    /// Numeric values; NaN marks a missing entry
    Numeric(Vec<f64>),
    /// Categorical or free-form text values
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered column table derived from the raw records
///
/// Column order is stable across transforms, so repeated runs over the same
/// input observe columns (and therefore encodings and matrices) in the same
/// order.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columnize raw records in their source column order
    pub fn from_records(records: &[MachineRecord]) -> Self {
        let mut frame = Frame::new();
        frame.push_text(
            "Timestamp",
            records.iter().map(|r| Some(r.timestamp.clone())).collect(),
        );
        frame.push_text(
            "Machine_ID",
            records.iter().map(|r| Some(r.machine_id.clone())).collect(),
        );
        frame.push_text(
            "Operation_Mode",
            records
                .iter()
                .map(|r| Some(r.operation_mode.clone()))
                .collect(),
        );
        frame.push_numeric(
            "Temperature_C",
            records.iter().map(|r| r.temperature_c).collect(),
        );
        frame.push_numeric(
            "Vibration_Hz",
            records.iter().map(|r| r.vibration_hz).collect(),
        );
        frame.push_numeric(
            "Power_Consumption_kW",
            records.iter().map(|r| r.power_consumption_kw).collect(),
        );
        frame.push_numeric(
            "Network_Latency_ms",
            records.iter().map(|r| r.network_latency_ms).collect(),
        );
        frame.push_numeric(
            "Packet_Loss_%",
            records.iter().map(|r| r.packet_loss_pct).collect(),
        );
        frame.push_numeric(
            "Quality_Control_Defect_Rate_%",
            records.iter().map(|r| r.defect_rate_pct).collect(),
        );
        frame.push_numeric(
            "Production_Speed_units_per_hr",
            records.iter().map(|r| r.production_speed).collect(),
        );
        frame.push_numeric(
            "Predictive_Maintenance_Score",
            records.iter().map(|r| r.maintenance_score).collect(),
        );
        frame.push_numeric(
            "Error_Rate_%",
            records.iter().map(|r| r.error_rate_pct).collect(),
        );
        frame.push_text(
            "Efficiency_Status",
            records
                .iter()
                .map(|r| Some(r.efficiency_status.clone()))
                .collect(),
        );
        frame
    }

    /// Number of rows (0 for an empty frame)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Append a numeric column
    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.names.push(name.into());
        self.columns.push(Column::Numeric(values));
    }

    /// Append a text column
    pub fn push_text(&mut self, name: impl Into<String>, values: Vec<Option<String>>) {
        self.names.push(name.into());
        self.columns.push(Column::Text(values));
    }

    /// Borrow a numeric column by name
    pub fn numeric_column(&self, name: &str) -> PipelineResult<&[f64]> {
        match self.index_of(name).map(|i| &self.columns[i]) {
            Some(Column::Numeric(values)) => Ok(values),
            _ => Err(PipelineError::schema(name)),
        }
    }

    /// Borrow a text column by name
    pub fn text_column(&self, name: &str) -> PipelineResult<&[Option<String>]> {
        match self.index_of(name).map(|i| &self.columns[i]) {
            Some(Column::Text(values)) => Ok(values),
            _ => Err(PipelineError::schema(name)),
        }
    }

    /// Replace an existing column with numeric values, keeping its position
    pub fn replace_with_numeric(&mut self, name: &str, values: Vec<f64>) -> PipelineResult<()> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| PipelineError::schema(name))?;
        self.columns[idx] = Column::Numeric(values);
        Ok(())
    }

    /// Remove a column by name
    pub fn drop_column(&mut self, name: &str) -> PipelineResult<()> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| PipelineError::schema(name))?;
        self.names.remove(idx);
        self.columns.remove(idx);
        Ok(())
    }

    /// Assemble the named numeric columns into a feature matrix
    /// (n_rows x names.len()), in the given column order
    pub fn select(&self, names: &[&str]) -> PipelineResult<Array2<f64>> {
        let mut selected = Vec::with_capacity(names.len());
        for &name in names {
            selected.push(self.numeric_column(name)?);
        }
        let n_rows = self.n_rows();
        Ok(Array2::from_shape_fn((n_rows, names.len()), |(i, j)| {
            selected[j][i]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MachineRecord {
        MachineRecord {
            timestamp: "2024-03-01 08:00:00".to_string(),
            machine_id: "M-001".to_string(),
            operation_mode: "Active".to_string(),
            temperature_c: 68.5,
            vibration_hz: 2.4,
            power_consumption_kw: 5.1,
            network_latency_ms: 12.0,
            packet_loss_pct: 0.2,
            defect_rate_pct: 1.1,
            production_speed: 240.0,
            maintenance_score: 0.87,
            error_rate_pct: 0.4,
            efficiency_status: "High".to_string(),
        }
    }

    #[test]
    fn test_from_records_preserves_column_order() {
        let frame = Frame::from_records(&[sample_record()]);
        assert_eq!(frame.n_rows(), 1);
        assert_eq!(frame.n_columns(), 13);
        assert_eq!(frame.names()[0], "Timestamp");
        assert_eq!(frame.names()[12], "Efficiency_Status");
    }

    #[test]
    fn test_select_builds_matrix_in_order() {
        let mut frame = Frame::new();
        frame.push_numeric("a", vec![1.0, 2.0]);
        frame.push_numeric("b", vec![3.0, 4.0]);

        let x = frame.select(&["b", "a"]).unwrap();
        assert_eq!(x.shape(), &[2, 2]);
        assert_eq!(x[[0, 0]], 3.0);
        assert_eq!(x[[1, 1]], 2.0);
    }

    #[test]
    fn test_select_missing_column_is_schema_error() {
        let mut frame = Frame::new();
        frame.push_numeric("a", vec![1.0]);

        let err = frame.select(&["a", "missing"]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Schema { ref column } if column == "missing"
        ));
    }

    #[test]
    fn test_text_column_as_numeric_is_schema_error() {
        let mut frame = Frame::new();
        frame.push_text("mode", vec![Some("Active".to_string())]);

        assert!(frame.numeric_column("mode").is_err());
    }

    #[test]
    fn test_drop_column() {
        let mut frame = Frame::new();
        frame.push_numeric("a", vec![1.0]);
        frame.push_numeric("b", vec![2.0]);

        frame.drop_column("a").unwrap();
        assert!(!frame.has_column("a"));
        assert_eq!(frame.n_columns(), 1);
        assert!(frame.drop_column("a").is_err());
    }
}
