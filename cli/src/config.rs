//! Application configuration.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults (`./data`, namespace `task_manager`)
//! 2. a YAML file given by `--config` or `TASKS_CONFIG`
//! 3. the `DB_DIR` and `DB_NAME` environment variables
//! 4. command-line flags (applied by `main`)
//!
//! # Example YAML
//!
//! ```yaml
//! database:
//!   data_dir: /var/lib/tasks
//!   namespace: work
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use task_manager_sqlite::ConnectionConfig;
use tracing::debug;

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "TASKS_CONFIG";
/// Environment variable overriding the data directory.
pub const DB_DIR_ENV: &str = "DB_DIR";
/// Environment variable overriding the namespace.
pub const DB_NAME_ENV: &str = "DB_NAME";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_NAMESPACE: &str = "task_manager";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Where the task database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Directory holding namespace database files.
    pub data_dir: PathBuf,
    /// Namespace (database) name.
    pub namespace: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Connection parameters for the schema initializer.
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.data_dir)
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| format!("Failed to read config '{}': {e}", path.display()))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| format!("Failed to parse config '{}': {e}", path.display()))
    }

    /// Builds the configuration from the file (if any) and the process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, String> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve), reading variables through `lookup`.
    pub fn resolve_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::load(path)?
            }
            None => Self::default(),
        };
        config.apply_env(lookup);
        Ok(config)
    }

    /// Overrides database settings from `DB_DIR` and `DB_NAME`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DB_DIR_ENV).filter(|v| !v.is_empty()) {
            self.database.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(DB_NAME_ENV).filter(|v| !v.is_empty()) {
            self.database.namespace = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve_with(None, env(&[])).unwrap();
        assert_eq!(config.database.data_dir, PathBuf::from("data"));
        assert_eq!(config.database.namespace, "task_manager");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config =
            AppConfig::resolve_with(None, env(&[("DB_DIR", "/tmp/t"), ("DB_NAME", "work")]))
                .unwrap();
        assert_eq!(config.database.data_dir, PathBuf::from("/tmp/t"));
        assert_eq!(config.database.namespace, "work");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = AppConfig::resolve_with(None, env(&[("DB_NAME", "")])).unwrap();
        assert_eq!(config.database.namespace, "task_manager");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("database:\n  namespace: home\n").unwrap();
        assert_eq!(config.database.namespace, "home");
        assert_eq!(config.database.data_dir, PathBuf::from("data"));

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.yml");
        std::fs::write(
            &path,
            "database:\n  data_dir: /srv/tasks\n  namespace: from_file\n",
        )
        .unwrap();

        let config =
            AppConfig::resolve_with(Some(path.as_path()), env(&[("DB_NAME", "from_env")]))
                .unwrap();
        assert_eq!(config.database.data_dir, PathBuf::from("/srv/tasks"));
        assert_eq!(config.database.namespace, "from_env");
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.yml");
        std::fs::write(&path, "database:\n  namespace: via_env_path\n").unwrap();

        let config =
            AppConfig::resolve_with(None, env(&[("TASKS_CONFIG", path.to_str().unwrap())]))
                .unwrap();
        assert_eq!(config.database.namespace, "via_env_path");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::load("/nonexistent/tasks.yml").unwrap_err();
        assert!(err.contains("Failed to read config"));
    }
}
