use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{core::utils::replace_file, ledger::Transaction};

use super::{codec, LoadReport, Result, StorageBackend};

/// Plain-text ledger file holding one comma-separated record per line.
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    path: PathBuf,
}

impl FlatFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FlatFileStorage {
    fn load_into(&self, into: &mut Vec<Transaction>) -> Result<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no ledger file found, starting fresh");
                return Ok(LoadReport::fresh_start());
            }
            Err(err) => return Err(err.into()),
        };
        let report = codec::read_transactions(BufReader::new(file), into)?;
        tracing::info!(
            path = %self.path.display(),
            loaded = report.loaded,
            rejected = report.rejected.len(),
            "loaded ledger file"
        );
        Ok(report)
    }

    /// Rewrites the whole file. Records are staged in a sibling temp file and moved into
    /// place, so a failed write leaves the previous file untouched.
    fn save(&self, transactions: &[Transaction], retained: &[String]) -> Result<()> {
        replace_file(&self.path, |tmp| write_staged(tmp, transactions, retained))?;
        tracing::info!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved ledger file"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_staged(path: &Path, transactions: &[Transaction], retained: &[String]) -> Result<()> {
    let file = File::create(path)?;
    codec::write_transactions(BufWriter::new(file), transactions, retained)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_is_a_fresh_start() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path().join("data.txt"));
        let mut loaded = Vec::new();

        let report = storage.load_into(&mut loaded).unwrap();

        assert!(report.fresh_start);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path().join("nested").join("data.txt"));

        storage.save(&[], &[]).unwrap();

        assert!(storage.path().exists());
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "");
    }
}
