use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub round_secs: u32,
    pub time_up_delay_ms: u64,
    pub tick_rate_ms: u64,
    pub monitor_step_ms: u64,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: 60,
            time_up_delay_ms: 3_000,
            tick_rate_ms: 100,
            monitor_step_ms: 3_000,
            log_filter: "info".to_string(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typetrial") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typetrial_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config::default();
        fs::write(&path, serde_json::to_vec_pretty(&cfg).unwrap()).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "round_secs": 30 }"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.round_secs, 30);
        assert_eq!(loaded.time_up_delay_ms, 3_000);
        assert_eq!(loaded.log_filter, "info");
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn full_file_overrides_every_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config {
            round_secs: 45,
            time_up_delay_ms: 1_000,
            tick_rate_ms: 50,
            monitor_step_ms: 500,
            log_filter: "debug".into(),
        };
        fs::write(&path, serde_json::to_vec(&cfg).unwrap()).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), cfg);
    }
}
