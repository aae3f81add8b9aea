//! Raw log loading and saving
//!
//! Loads the delimited telemetry log into typed records. The header row is
//! validated against the full required column set before any row is parsed,
//! so a truncated export fails as a schema violation rather than a row-level
//! parse error.

use super::types::MachineRecord;
use crate::error::{PipelineError, PipelineResult};
use csv::{Reader, Writer};
use std::fs::File;
use std::path::Path;

/// Loader for the raw telemetry CSV
pub struct DataLoader;

impl DataLoader {
    /// Load all records from a CSV file
    ///
    /// Fails with `Schema` if a required column is missing from the header,
    /// and with `DataLoad` if the file is unreadable or a row is malformed.
    pub fn load_records<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<MachineRecord>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::data_load(path, e))?;
        let mut reader = Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| PipelineError::data_load(path, e))?
            .clone();
        for column in MachineRecord::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PipelineError::schema(column));
            }
        }

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: MachineRecord =
                result.map_err(|e| PipelineError::data_load(path, e))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Save records to a CSV file
    pub fn save_records<P: AsRef<Path>>(
        records: &[MachineRecord],
        path: P,
    ) -> PipelineResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = Writer::from_writer(file);

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| PipelineError::io(path, e))?;
        }

        writer.flush().map_err(|e| PipelineError::io(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn sample_record(status: &str) -> MachineRecord {
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
            efficiency_status: status.to_string(),
        }
    }

    #[test]
    fn test_save_and_load_records() {
        let records = vec![sample_record("High"), sample_record("Low")];

        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        DataLoader::save_records(&records, &path).unwrap();
        let loaded = DataLoader::load_records(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].efficiency_status, "High");
        assert_eq!(loaded[1].efficiency_status, "Low");
        assert_eq!(loaded[0].temperature_c, 68.5);
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = DataLoader::load_records("no/such/file.csv").unwrap_err();
        assert!(matches!(err, PipelineError::DataLoad { .. }));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("truncated.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Timestamp,Machine_ID,Operation_Mode").unwrap();
        writeln!(file, "2024-03-01 08:00:00,M-001,Active").unwrap();

        let err = DataLoader::load_records(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Schema { ref column } if column == "Temperature_C"
        ));
    }

    #[test]
    fn test_malformed_row_is_data_load_error() {
        let records = vec![sample_record("High")];
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        DataLoader::save_records(&records, &path).unwrap();

        // Corrupt a numeric cell
        let text = std::fs::read_to_string(&path)
            .unwrap()
            .replace("68.5", "not-a-number");
        std::fs::write(&path, text).unwrap();

        let err = DataLoader::load_records(&path).unwrap_err();
        assert!(matches!(err, PipelineError::DataLoad { .. }));
    }
}
