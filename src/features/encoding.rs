//! Deterministic label encoding for categorical columns

use serde::{Deserialize, Serialize};

/// Maps distinct categorical values to integer codes
///
/// Distinct values are sorted lexicographically and numbered from 0, so the
/// same value set always produces the same codes regardless of row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder on a column's values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Code for a value, or `None` if it was not seen during fitting
    pub fn transform(&self, value: &str) -> Option<f64> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .map(|i| i as f64)
    }

    /// Value for a code, if in range
    pub fn inverse(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    /// Distinct values in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sorted_order() {
        let encoder = LabelEncoder::fit(["Low", "High", "Medium", "High"]);

        assert_eq!(encoder.classes(), ["High", "Low", "Medium"]);
        assert_eq!(encoder.transform("High"), Some(0.0));
        assert_eq!(encoder.transform("Low"), Some(1.0));
        assert_eq!(encoder.transform("Medium"), Some(2.0));
    }

    #[test]
    fn test_fit_is_order_independent() {
        let a = LabelEncoder::fit(["Idle", "Active", "Maintenance"]);
        let b = LabelEncoder::fit(["Maintenance", "Idle", "Active", "Idle"]);

        assert_eq!(a.classes(), b.classes());
        assert_eq!(a.transform("Active"), b.transform("Active"));
    }

    #[test]
    fn test_unseen_value() {
        let encoder = LabelEncoder::fit(["High", "Low"]);
        assert_eq!(encoder.transform("Medium"), None);
    }

    #[test]
    fn test_inverse() {
        let encoder = LabelEncoder::fit(["High", "Low"]);
        assert_eq!(encoder.inverse(0), Some("High"));
        assert_eq!(encoder.inverse(5), None);
    }
}
