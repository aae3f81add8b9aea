//! Evaluation metrics for the efficiency classifier
//!
//! Accuracy plus precision, recall and F1 averaged across classes weighted
//! by class frequency, matching the evaluation contract of the training
//! pipeline. Evaluation is observational: the report carries values, not
//! pass/fail verdicts.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metrics calculator
pub struct Metrics;

impl Metrics {
    /// Accuracy: correct predictions / total predictions
    pub fn accuracy(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "Arrays must have same length");

        if y_true.is_empty() {
            return 0.0;
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| (*t - *p).abs() < 1e-10)
            .count();

        correct as f64 / y_true.len() as f64
    }

    /// Precision for one class: TP / (TP + FP)
    pub fn precision(y_true: &Array1<f64>, y_pred: &Array1<f64>, class: f64) -> f64 {
        let (tp, fp, _) = Self::confusion_values(y_true, y_pred, class);
        if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        }
    }

    /// Recall for one class: TP / (TP + FN)
    pub fn recall(y_true: &Array1<f64>, y_pred: &Array1<f64>, class: f64) -> f64 {
        let (tp, _, fn_) = Self::confusion_values(y_true, y_pred, class);
        if tp + fn_ == 0 {
            0.0
        } else {
            tp as f64 / (tp + fn_) as f64
        }
    }

    /// F1 for one class: harmonic mean of precision and recall
    pub fn f1_score(y_true: &Array1<f64>, y_pred: &Array1<f64>, class: f64) -> f64 {
        let precision = Self::precision(y_true, y_pred, class);
        let recall = Self::recall(y_true, y_pred, class);
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }

    fn confusion_values(
        y_true: &Array1<f64>,
        y_pred: &Array1<f64>,
        class: f64,
    ) -> (usize, usize, usize) {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            let true_pos = (*t - class).abs() < 1e-10;
            let pred_pos = (*p - class).abs() < 1e-10;
            match (true_pos, pred_pos) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        (tp, fp, fn_)
    }

    fn distinct_classes(y_true: &Array1<f64>) -> Vec<f64> {
        let mut classes: Vec<f64> = y_true.iter().copied().collect();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup_by(|a, b| (*a - *b).abs() < 1e-10);
        classes
    }

    fn weighted<F>(y_true: &Array1<f64>, metric: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        if y_true.is_empty() {
            return 0.0;
        }
        let total = y_true.len() as f64;
        Self::distinct_classes(y_true)
            .into_iter()
            .map(|class| {
                let support = y_true
                    .iter()
                    .filter(|&&t| (t - class).abs() < 1e-10)
                    .count() as f64;
                metric(class) * support / total
            })
            .sum()
    }

    /// Precision averaged across classes, weighted by class frequency
    pub fn weighted_precision(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        Self::weighted(y_true, |class| Self::precision(y_true, y_pred, class))
    }

    /// Recall averaged across classes, weighted by class frequency
    pub fn weighted_recall(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        Self::weighted(y_true, |class| Self::recall(y_true, y_pred, class))
    }

    /// F1 averaged across classes, weighted by class frequency
    pub fn weighted_f1(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        Self::weighted(y_true, |class| Self::f1_score(y_true, y_pred, class))
    }

    /// Full evaluation report for predicted vs. true labels
    pub fn report(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> MetricsReport {
        MetricsReport {
            accuracy: Self::accuracy(y_true, y_pred),
            precision: Self::weighted_precision(y_true, y_pred),
            recall: Self::weighted_recall(y_true, y_pred),
            f1: Self::weighted_f1(y_true, y_pred),
        }
    }
}

/// Evaluation summary: accuracy plus weighted precision/recall/F1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy:  {:.4}", self.accuracy)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall:    {:.4}", self.recall)?;
        write!(f, "F1 Score:  {:.4}", self.f1)
    }
}
