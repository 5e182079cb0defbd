//! File-based ProgressRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::{PlayerProgress, ProgressRepository, RepositoryError};

/// File-based implementation of ProgressRepository.
///
/// Stores each actor's progress as an individual JSON file.
///
/// # File Format
///
/// Progress is stored as `progress_{actor}.json` in pretty-printed JSON:
/// the file is tiny and worth keeping hand-inspectable for save surgery.
pub struct FileProgressRepository {
    base_dir: PathBuf,
}

impl FileProgressRepository {
    /// Create a new file-based progress repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Get the path to an actor's progress file.
    fn progress_path(&self, actor: &str) -> PathBuf {
        let sanitized: String = actor
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
            .collect();
        self.base_dir.join(format!("progress_{}.json", sanitized))
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load(&self, actor: &str) -> Result<Option<PlayerProgress>, RepositoryError> {
        let path = self.progress_path(actor);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let progress: PlayerProgress = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded progress[{}] from {}", actor, path.display());

        Ok(Some(progress))
    }

    fn save(&self, actor: &str, progress: &PlayerProgress) -> Result<(), RepositoryError> {
        let path = self.progress_path(actor);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(progress)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Write to temp file, then atomic rename
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved progress[{}] to {}", actor, path.display());

        Ok(())
    }
}
