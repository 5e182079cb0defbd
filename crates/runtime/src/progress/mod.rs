//! Player progress state and its persistence contracts.

mod file;
mod memory;

pub use file::FileProgressRepository;
pub use memory::MemoryProgressRepository;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Columns marched per level step.
const LEVEL_STRIDE: u64 = 50;

/// Persisted per-actor progression snapshot.
///
/// Loaded once at session start and saved on every mutation. The skill
/// gate only ever reads a clone, never a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Current level; starts at 1 and never decreases.
    pub level: u32,

    /// Cumulative columns marched across the account's lifetime.
    pub distance_moved: u64,

    /// Skills unlocked explicitly, bypassing level and flag requirements.
    #[serde(default)]
    pub unlocked_skills: BTreeSet<String>,

    /// Named boolean progression flags.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            level: 1,
            distance_moved: 0,
            unlocked_skills: BTreeSet::new(),
            flags: BTreeMap::new(),
        }
    }
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a named flag is set.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Add a skill to the explicit unlock set.
    pub fn unlock(&mut self, skill: impl Into<String>) {
        self.unlocked_skills.insert(skill.into());
    }

    /// Record marched columns; returns true when the level rose.
    ///
    /// The level follows total distance in fixed strides so the gate stays
    /// exercisable without a separate experience system.
    pub fn record_distance(&mut self, steps: u64) -> bool {
        self.distance_moved = self.distance_moved.saturating_add(steps);
        let earned = 1 + (self.distance_moved / LEVEL_STRIDE) as u32;
        if earned > self.level {
            self.level = earned;
            return true;
        }
        false
    }
}

/// Repository errors for progress persistence.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository for player progress persistence.
///
/// This is for DYNAMIC data that changes during gameplay:
/// - Load the actor's progress at session start
/// - Save it back on every mutation
pub trait ProgressRepository: Send + Sync {
    /// Load an actor's progress, or `None` for a fresh actor.
    fn load(&self, actor: &str) -> Result<Option<PlayerProgress>, RepositoryError>;

    /// Persist an actor's progress.
    fn save(&self, actor: &str, progress: &PlayerProgress) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_rise_with_distance_strides() {
        let mut progress = PlayerProgress::new();
        assert!(!progress.record_distance(49));
        assert_eq!(progress.level, 1);
        assert!(progress.record_distance(1));
        assert_eq!(progress.level, 2);
        assert!(progress.record_distance(100));
        assert_eq!(progress.level, 4);
    }

    #[test]
    fn levels_never_decrease() {
        let mut progress = PlayerProgress {
            level: 10,
            ..PlayerProgress::new()
        };
        progress.record_distance(5);
        assert_eq!(progress.level, 10);
    }

    #[test]
    fn flags_default_to_unset() {
        let mut progress = PlayerProgress::new();
        assert!(!progress.flag("scout"));
        progress.set_flag("scout", true);
        assert!(progress.flag("scout"));
    }
}
