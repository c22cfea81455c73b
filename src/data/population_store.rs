use crate::error::{Result, StormctlError};
use crate::types::{Individual, Policy, SETTING_MAX};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const POPULATION_FILE: &str = "population.json";

/// File-backed bridge between successive control-horizon runs.
///
/// One run writes the seeded population when it completes; the next run
/// reads it back at startup. Single writer, single reader: only one run
/// is ever active against a work directory. The write goes through a
/// sibling temp file and an atomic rename, so a reader can never observe
/// a partially written document.
pub struct PopulationStore {
    path: PathBuf,
}

impl PopulationStore {
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self {
            path: work_dir.as_ref().join(POPULATION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist a population as a JSON array of integer arrays,
    /// overwriting any previous content.
    pub fn write(&self, population: &[Policy]) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            serde_json::to_writer(&mut file, population)?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the persisted population back, checking document shape, gene
    /// range, and length consistency against the current encoding.
    pub fn read(&self, expected_len: usize) -> Result<Vec<Individual>> {
        let contents = fs::read_to_string(&self.path)?;
        let raw: Vec<Policy> = serde_json::from_str(&contents).map_err(|e| {
            StormctlError::Store(format!(
                "malformed population file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        for (row, policy) in raw.iter().enumerate() {
            if policy.len() != expected_len {
                return Err(StormctlError::Store(format!(
                    "individual {} in {} has {} genes, expected {}",
                    row,
                    self.path.display(),
                    policy.len(),
                    expected_len
                )));
            }
            if let Some(&gene) = policy.iter().find(|&&g| g > SETTING_MAX) {
                return Err(StormctlError::Store(format!(
                    "individual {} in {} carries an out-of-range setting {}",
                    row,
                    self.path.display(),
                    gene
                )));
            }
        }

        Ok(raw.into_iter().map(Individual::new).collect())
    }
}
