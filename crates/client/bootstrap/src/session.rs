//! Save-location utilities for per-actor progress files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ClientConfig;

/// Platform-specific default directory for progress files.
///
/// Falls back to a dot-directory under the working directory when the
/// platform directories cannot be resolved (e.g. stripped containers).
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wayfare")
        .map(|dirs| dirs.data_dir().join("progress"))
        .unwrap_or_else(|| PathBuf::from(".wayfare/progress"))
}

/// Resolve the save directory: explicit configuration wins over defaults.
pub fn resolve_save_dir(config: &ClientConfig) -> PathBuf {
    config
        .save_data_dir
        .clone()
        .unwrap_or_else(default_save_dir)
}

/// List actors with a progress file in the save directory.
///
/// Progress files are named `progress_<actor>.json`; anything else in the
/// directory is ignored.
pub fn list_actors(base_dir: &Path) -> Result<Vec<String>> {
    if !base_dir.exists() {
        return Ok(Vec::new());
    }

    let mut actors = Vec::new();

    for entry in std::fs::read_dir(base_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let name = file_name
            .to_str()
            .context("Invalid UTF-8 in progress file name")?;

        if let Some(actor) = name
            .strip_prefix("progress_")
            .and_then(|rest| rest.strip_suffix(".json"))
        {
            actors.push(actor.to_string());
        }
    }

    actors.sort();
    Ok(actors)
}
