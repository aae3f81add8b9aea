//! Binary artifact persistence
//!
//! All matrices, the fitted scaler, and the fitted model are written as
//! bincode blobs, one file per artifact name. Artifacts are never mutated in
//! place; the next run supersedes them wholesale.

use crate::error::{PipelineError, PipelineResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialize a value to a bincode file
pub fn save<T: Serialize>(value: &T, path: &Path) -> PipelineResult<()> {
    let bytes = bincode::serialize(value).map_err(|e| PipelineError::io(path, e))?;
    fs::write(path, bytes).map_err(|e| PipelineError::io(path, e))?;
    Ok(())
}

/// Deserialize a value from a bincode file
///
/// An absent or undecodable file is an `ArtifactMissing` error.
pub fn load<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let bytes = fs::read(path).map_err(|e| PipelineError::artifact_missing(path, e))?;
    bincode::deserialize(&bytes).map_err(|e| PipelineError::artifact_missing(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray::Array2;
    use tempfile::tempdir;

    #[test]
    fn test_matrix_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.bin");

        let x = array![[1.0, 2.0], [3.0, 4.0]];
        save(&x, &path).unwrap();
        let loaded: Array2<f64> = load(&path).unwrap();

        assert_eq!(loaded, x);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempdir().unwrap();
        let err = load::<Array2<f64>>(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactMissing { .. }));
    }

    #[test]
    fn test_corrupt_artifact_is_missing_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.bin");
        fs::write(&path, b"\x01\x02").unwrap();

        let err = load::<Array2<f64>>(&path).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactMissing { .. }));
    }
}
