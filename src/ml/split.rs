//! Seeded stratified train/test splitting

use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The four partitions produced by one split
#[derive(Debug, Clone)]
pub struct SplitData {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Stratified split preserving each class's proportion
///
/// Rows are pooled per label, each pool is shuffled with a rng seeded from
/// `seed`, and a rounded `test_ratio` share of each pool is held out. A
/// fixed seed reproduces the exact same partitions.
pub fn stratified_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_ratio: f64,
    seed: u64,
) -> SplitData {
    let mut classes: Vec<f64> = y.iter().copied().collect();
    classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    classes.dedup();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for &class in &classes {
        let mut pool: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, &label)| (label - class).abs() < 1e-10)
            .map(|(i, _)| i)
            .collect();
        pool.shuffle(&mut rng);

        let n_test = (pool.len() as f64 * test_ratio).round() as usize;
        test_indices.extend_from_slice(&pool[..n_test]);
        train_indices.extend_from_slice(&pool[n_test..]);
    }

    // Mix classes within each partition
    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    SplitData {
        x_train: x.select(Axis(0), &train_indices),
        x_test: x.select(Axis(0), &test_indices),
        y_train: Array1::from_vec(train_indices.iter().map(|&i| y[i]).collect()),
        y_test: Array1::from_vec(test_indices.iter().map(|&i| y[i]).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn labeled_data(counts: &[(f64, usize)]) -> (Array2<f64>, Array1<f64>) {
        let labels: Vec<f64> = counts
            .iter()
            .flat_map(|&(label, n)| std::iter::repeat(label).take(n))
            .collect();
        let n = labels.len();
        let x = Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64);
        (x, Array1::from_vec(labels))
    }

    fn class_count(y: &Array1<f64>, class: f64) -> usize {
        y.iter().filter(|&&l| (l - class).abs() < 1e-10).count()
    }

    #[test]
    fn test_row_conservation_and_sizes() {
        let (x, y) = labeled_data(&[(0.0, 600), (1.0, 400)]);
        let split = stratified_split(&x, &y, 0.2, 42);

        assert_eq!(split.x_train.nrows() + split.x_test.nrows(), 1000);
        assert_eq!(split.x_test.nrows(), 200);
        assert_eq!(split.y_test.len(), 200);
    }

    #[test]
    fn test_label_distribution_is_preserved() {
        let (x, y) = labeled_data(&[(0.0, 600), (1.0, 400)]);
        let split = stratified_split(&x, &y, 0.2, 42);

        assert_eq!(class_count(&split.y_test, 0.0), 120);
        assert_eq!(class_count(&split.y_test, 1.0), 80);
        assert_eq!(class_count(&split.y_train, 0.0), 480);
        assert_eq!(class_count(&split.y_train, 1.0), 320);
    }

    #[test]
    fn test_same_seed_reproduces_partitions() {
        let (x, y) = labeled_data(&[(0.0, 30), (1.0, 20), (2.0, 10)]);

        let a = stratified_split(&x, &y, 0.2, 7);
        let b = stratified_split(&x, &y, 0.2, 7);
        assert_eq!(a.x_train, b.x_train);
        assert_eq!(a.x_test, b.x_test);
        assert_eq!(a.y_train, b.y_train);
        assert_eq!(a.y_test, b.y_test);
    }

    #[test]
    fn test_different_seed_changes_partitions() {
        let (x, y) = labeled_data(&[(0.0, 50), (1.0, 50)]);

        let a = stratified_split(&x, &y, 0.2, 7);
        let b = stratified_split(&x, &y, 0.2, 8);
        assert_ne!(a.x_test, b.x_test);
    }

    #[test]
    fn test_rows_stay_aligned_with_labels() {
        let (x, y) = labeled_data(&[(0.0, 10), (1.0, 10)]);
        let split = stratified_split(&x, &y, 0.2, 1);

        // Row content encodes its original index; labels 0.0 came from rows 0..10
        for (row, &label) in split.x_train.rows().into_iter().zip(split.y_train.iter()) {
            let original = (row[0] / 2.0) as usize;
            let expected = if original < 10 { 0.0 } else { 1.0 };
            assert_eq!(label, expected);
        }
    }
}
