//! Serialized fixture batches.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use strata_erp_script::{RedeemScript, RedeemScriptRecord};

use crate::errors::{CorpusError, CorpusResult};

/// Exported records of a generated corpus, serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureBatch {
    records: Vec<RedeemScriptRecord>,
}

impl FixtureBatch {
    /// Exports every script, keeping their order.
    pub fn from_scripts(scripts: &[RedeemScript]) -> Self {
        Self {
            records: scripts.iter().map(RedeemScript::export).collect(),
        }
    }

    /// Gets the records.
    pub fn records(&self) -> &[RedeemScriptRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the batch as compact JSON.
    pub fn to_json(&self) -> CorpusResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a batch from JSON.
    pub fn from_json(s: &str) -> CorpusResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Writes the batch to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> CorpusResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::{CorpusGenerator, CorpusMode},
        source::FixtureSource,
    };

    fn sample_batch() -> FixtureBatch {
        let mut src = FixtureSource::from_seed(8);
        let scripts = CorpusGenerator::default().generate(CorpusMode::Valid, 3, &mut src);
        FixtureBatch::from_scripts(&scripts)
    }

    #[test]
    fn test_json_is_array_of_records() {
        let batch = sample_batch();
        let json = batch.to_json().unwrap();
        assert!(json.starts_with("[{"));
        assert!(json.contains("\"mainFed\""));

        assert_eq!(FixtureBatch::from_json(&json).unwrap(), batch);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scripts.json");
        fs::write(&path, "x".repeat(100_000)).unwrap();

        let batch = sample_batch();
        batch.write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(FixtureBatch::from_json(&written).unwrap(), batch);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("scripts.json");

        match sample_batch().write_to(&path) {
            Err(CorpusError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("test: expected Io error (got {other:?})"),
        }
    }
}
