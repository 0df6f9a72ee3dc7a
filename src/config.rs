// src/config.rs
//
// Runtime configuration. Every field has a default; the environment may
// override them at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "STREAMHUB_DB_PATH";
pub const ENV_FLUSH_INTERVAL_MS: &str = "STREAMHUB_FLUSH_INTERVAL_MS";
pub const ENV_CATALOG_PATH: &str = "STREAMHUB_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file holding the state snapshot. `None` uses the platform data dir.
    pub database_path: Option<PathBuf>,

    /// Minimum spacing between durable flushes caused by playback progress
    pub flush_interval_ms: u64,

    /// JSON catalog to load at startup. `None` uses the built-in seed catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            flush_interval_ms: 2000,
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_FLUSH_INTERVAL_MS) {
            config.flush_interval_ms = raw.trim().parse().map_err(|e| {
                AppError::Other(format!("Invalid {} '{}': {}", ENV_FLUSH_INTERVAL_MS, raw, e))
            })?;
        }

        if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    pub fn flush_window(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.flush_window(), Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/state.db"),
            (ENV_FLUSH_INTERVAL_MS, "250"),
            (ENV_CATALOG_PATH, "catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/state.db")));
        assert_eq!(config.flush_interval_ms, 250);
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/state.db")
        );
    }

    #[test]
    fn test_bad_interval_is_an_error() {
        assert!(StoreConfig::from_lookup(lookup(&[(ENV_FLUSH_INTERVAL_MS, "soon")])).is_err());
    }
}
