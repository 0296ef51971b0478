//! Session configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_NOTICE_MILLIS: u64 = 3_000;

/// Tunable behavior for a `FilterSession`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a transient notice (e.g. a rejected color) stays visible.
    pub notice_millis: u64,
    /// Seed the free palette into the selection on the very first run.
    pub seed_free_palette: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notice_millis: DEFAULT_NOTICE_MILLIS,
            seed_free_palette: true,
        }
    }
}

impl SessionConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "notice_millis": 500 }"#).unwrap();
        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.notice_duration(), Duration::from_millis(500));
        assert!(config.seed_free_palette);
    }

    #[test]
    fn default_notice_is_three_seconds() {
        assert_eq!(SessionConfig::default().notice_duration(), Duration::from_secs(3));
    }
}
