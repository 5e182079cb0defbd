//! In-memory ProgressRepository implementation for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{PlayerProgress, ProgressRepository, RepositoryError};

/// In-memory implementation of ProgressRepository.
///
/// Keeps every actor's progress in a map; nothing survives the process.
#[derive(Default)]
pub struct MemoryProgressRepository {
    entries: Mutex<HashMap<String, PlayerProgress>>,
}

impl MemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an actor's progress before wiring the repository in.
    pub fn seed(&self, actor: impl Into<String>, progress: PlayerProgress) {
        self.entries.lock().unwrap().insert(actor.into(), progress);
    }
}

impl ProgressRepository for MemoryProgressRepository {
    fn load(&self, actor: &str) -> Result<Option<PlayerProgress>, RepositoryError> {
        Ok(self.entries.lock().unwrap().get(actor).cloned())
    }

    fn save(&self, actor: &str, progress: &PlayerProgress) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap()
            .insert(actor.to_string(), progress.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_progress_is_loadable() {
        let repo = MemoryProgressRepository::new();
        let mut progress = PlayerProgress::new();
        progress.unlock("march");
        repo.seed("walker", progress.clone());

        assert_eq!(repo.load("walker").unwrap(), Some(progress));
    }

    #[test]
    fn save_then_load_round_trips() {
        let repo = MemoryProgressRepository::new();
        let mut progress = PlayerProgress::new();
        progress.record_distance(10);

        repo.save("walker", &progress).unwrap();
        assert_eq!(repo.load("walker").unwrap(), Some(progress));
    }
}
