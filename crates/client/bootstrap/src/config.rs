//! Client configuration structures and loaders.
use std::env;
use std::time::Duration;

use runtime::NavConfig;

/// Configuration required to bootstrap a navigator and front-end.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Acting entity identifier as the transport knows it.
    pub actor: String,

    /// Directory for progress save files (default: platform-specific).
    pub save_data_dir: Option<std::path::PathBuf>,

    /// Fresh-scan wait in milliseconds.
    pub scan_wait_ms: Option<u64>,

    /// Rolling scan log capacity in lines.
    pub scan_log_capacity: Option<usize>,

    /// Command history capacity in entries.
    pub history_capacity: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            actor: "wayfarer".to_string(),
            save_data_dir: None,
            scan_wait_ms: None,
            scan_log_capacity: None,
            history_capacity: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WAYFARE_ACTOR` - Acting entity identifier (default: "wayfarer")
    /// - `SAVE_DATA_DIR` - Directory for save data (default: platform-specific)
    /// - `SCAN_WAIT_MS` - Fresh-scan wait in milliseconds (default: 1500)
    /// - `SCAN_LOG_CAPACITY` - Rolling scan log lines (default: 256)
    /// - `HISTORY_CAPACITY` - Command history entries (default: 128)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(actor) = env::var("WAYFARE_ACTOR")
            && !actor.trim().is_empty()
        {
            config.actor = actor;
        }

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(std::path::PathBuf::from);
        config.scan_wait_ms = read_env::<u64>("SCAN_WAIT_MS");
        config.scan_log_capacity = read_env::<usize>("SCAN_LOG_CAPACITY");
        config.history_capacity = read_env::<usize>("HISTORY_CAPACITY");

        config
    }

    /// Runtime tunables derived from this configuration.
    pub fn nav_config(&self) -> NavConfig {
        let mut nav = NavConfig::default();
        if let Some(ms) = self.scan_wait_ms {
            nav.scan_wait = Duration::from_millis(ms.max(1));
        }
        if let Some(capacity) = self.scan_log_capacity {
            nav.scan_log_capacity = capacity.max(1);
        }
        if let Some(capacity) = self.history_capacity {
            nav.history_capacity = capacity.max(1);
        }
        nav
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_flow_into_nav_config() {
        let config = ClientConfig::default();
        let nav = config.nav_config();
        assert_eq!(nav.scan_wait, Duration::from_millis(1500));
        assert_eq!(nav.scan_log_capacity, 256);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = ClientConfig {
            scan_wait_ms: Some(200),
            scan_log_capacity: Some(16),
            history_capacity: Some(8),
            ..ClientConfig::default()
        };
        let nav = config.nav_config();
        assert_eq!(nav.scan_wait, Duration::from_millis(200));
        assert_eq!(nav.scan_log_capacity, 16);
        assert_eq!(nav.history_capacity, 8);
    }
}
