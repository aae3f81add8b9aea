//! Ordered preprocessing stages
//!
//! Preprocessing is an explicit, ordered list of named stages, each a pure
//! function over the table:
//!
//! 1. derive_calendar_fields: decompose the timestamp into Year/Month/Day/Hour
//! 2. drop_non_predictive: remove the timestamp and machine identifier
//! 3. encode_categoricals: integer-encode operation mode and efficiency status
//!
//! Stage order matters: calendar fields must be derived before the timestamp
//! column is dropped.

use super::encoding::LabelEncoder;
use crate::data::Frame;
use crate::error::PipelineResult;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

/// Categorical columns encoded in place
pub const CATEGORICAL_COLUMNS: [&str; 2] = ["Operation_Mode", "Efficiency_Status"];

/// A named, pure transform over the table
pub struct TransformStage {
    pub name: &'static str,
    pub apply: fn(Frame) -> PipelineResult<Frame>,
}

/// The preprocessing stages, in execution order
pub fn stages() -> Vec<TransformStage> {
    vec![
        TransformStage {
            name: "derive_calendar_fields",
            apply: derive_calendar_fields,
        },
        TransformStage {
            name: "drop_non_predictive",
            apply: drop_non_predictive,
        },
        TransformStage {
            name: "encode_categoricals",
            apply: encode_categoricals,
        },
    ]
}

/// Parse one timestamp cell, accepting the formats the log is known to use
fn parse_instant(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(value, format) {
            return Some(instant);
        }
    }
    // Date-only values resolve to midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

/// Append Year/Month/Day/Hour columns derived from the timestamp
///
/// Unparseable timestamps produce NaN in all four derived columns rather
/// than failing the run.
pub fn derive_calendar_fields(mut frame: Frame) -> PipelineResult<Frame> {
    let instants: Vec<Option<NaiveDateTime>> = frame
        .text_column("Timestamp")?
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_instant))
        .collect();

    let missing = instants.iter().filter(|i| i.is_none()).count();
    if missing > 0 {
        debug!("{missing} timestamps could not be parsed; calendar fields marked missing");
    }

    frame.push_numeric(
        "Year",
        instants
            .iter()
            .map(|i| i.map_or(f64::NAN, |dt| f64::from(dt.year())))
            .collect(),
    );
    frame.push_numeric(
        "Month",
        instants
            .iter()
            .map(|i| i.map_or(f64::NAN, |dt| f64::from(dt.month())))
            .collect(),
    );
    frame.push_numeric(
        "Day",
        instants
            .iter()
            .map(|i| i.map_or(f64::NAN, |dt| f64::from(dt.day())))
            .collect(),
    );
    frame.push_numeric(
        "Hour",
        instants
            .iter()
            .map(|i| i.map_or(f64::NAN, |dt| f64::from(dt.hour())))
            .collect(),
    );

    Ok(frame)
}

/// Drop the timestamp and machine identifier columns
///
/// The identifier carries no predictive signal; the timestamp has been
/// decomposed into calendar fields by the previous stage.
pub fn drop_non_predictive(mut frame: Frame) -> PipelineResult<Frame> {
    frame.drop_column("Timestamp")?;
    frame.drop_column("Machine_ID")?;
    Ok(frame)
}

/// Integer-encode the categorical columns in place
///
/// Each encoder is fit on the column's full set of distinct values; missing
/// cells encode to NaN.
pub fn encode_categoricals(mut frame: Frame) -> PipelineResult<Frame> {
    for column in CATEGORICAL_COLUMNS {
        let values = frame.text_column(column)?;
        let encoder = LabelEncoder::fit(values.iter().filter_map(|v| v.as_deref()));
        let codes: Vec<f64> = values
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(|v| encoder.transform(v))
                    .unwrap_or(f64::NAN)
            })
            .collect();
        frame.replace_with_numeric(column, codes)?;
    }
    Ok(frame)
}
