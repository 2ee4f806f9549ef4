//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::{RepositoryError, Result, RunSnapshot, StateRepository};

/// File-based implementation of StateRepository.
///
/// Snapshots are stored as `state_{nonce}.json`. JSON keeps older snapshots
/// loadable after fields are added, since every snapshot struct fills missing
/// fields with defaults.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn state_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("state_{}.json", nonce))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, nonce: u64, snapshot: &RunSnapshot) -> Result<()> {
        let path = self.state_path(nonce);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::repository", "Saved snapshot[{}] to {}", nonce, path.display());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<RunSnapshot>> {
        let path = self.state_path(nonce);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot: RunSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(target: "runtime::repository", "Loaded snapshot[{}] from {}", nonce, path.display());
        Ok(Some(snapshot))
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.state_path(nonce);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", "Deleted snapshot[{}]", nonce);
        }
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(nonce_str) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(nonce) = nonce_str.parse::<u64>()
            {
                nonces.push(nonce);
            }
        }

        nonces.sort_unstable();
        Ok(nonces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("snapshots")).unwrap();

        let mut snapshot = RunSnapshot::default();
        snapshot.state.seed = 7;
        repo.save(3, &snapshot).unwrap();
        repo.save(1, &snapshot).unwrap();

        assert_eq!(repo.list_nonces().unwrap(), vec![1, 3]);
        assert_eq!(repo.load(3).unwrap(), Some(snapshot));
        assert_eq!(repo.load(2).unwrap(), None);
        assert!(!dir.path().join("snapshots/state_3.json.tmp").exists());

        repo.delete(1).unwrap();
        repo.delete(2).unwrap();
        assert_eq!(repo.list_nonces().unwrap(), vec![3]);
    }

    #[test]
    fn garbage_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("state_5.json"), b"{ not json").unwrap();

        assert!(matches!(
            repo.load(5),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
