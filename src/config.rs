//! Configuration for eventwhisper.
//!
//! [`Config::resolve`] picks the file named by `--config`, then
//! `$EVENTWHISPER_CONFIG`, and falls back to [`Config::defaults`] when neither
//! is set. Keys missing from a file keep their built-in values.

use std::path::{Path, PathBuf};

use eventwhisper_types::Limits;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "EVENTWHISPER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// `[limits]` table
    #[serde(default)]
    pub limits: Limits,
}

impl Config {
    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Load a TOML file layered over the built-in defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the command-line path, else the environment, else defaults
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve_from(cli_path, env_path.as_deref())
    }

    fn resolve_from(cli_path: Option<&Path>, env_path: Option<&Path>) -> Result<Self, ConfigError> {
        match cli_path.or(env_path) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => Ok(Self::defaults()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.limits;
        if l.default_results_limit == 0 || l.default_scan_limit == 0 {
            return Err(ConfigError::Invalid("default limits must be positive".into()));
        }
        if l.max_results_limit < l.default_results_limit {
            return Err(ConfigError::Invalid(format!(
                "max_results_limit ({}) is below default_results_limit ({})",
                l.max_results_limit, l.default_results_limit
            )));
        }
        if l.max_scan_limit < l.default_scan_limit {
            return Err(ConfigError::Invalid(format!(
                "max_scan_limit ({}) is below default_scan_limit ({})",
                l.max_scan_limit, l.default_scan_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("eventwhisper.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_match_builtin_limits() {
        assert_eq!(Config::defaults().limits, Limits::default());
        assert!(Config::defaults().validate().is_ok());
    }

    #[test]
    fn test_full_file_round_trips_builtin_limits() {
        let dir = tempfile::tempdir().unwrap();
        let l = Limits::default();
        let body = format!(
            "[limits]\ndefault_results_limit = {}\nmax_results_limit = {}\n\
             default_scan_limit = {}\nmax_scan_limit = {}\n",
            l.default_results_limit, l.max_results_limit, l.default_scan_limit, l.max_scan_limit
        );
        let path = write(&dir, &body);
        assert_eq!(Config::load(&path).unwrap(), Config::defaults());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[limits]\nmax_results_limit = 50000\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.limits.max_results_limit, 50_000);
        assert_eq!(config.limits.default_results_limit, Limits::default().default_results_limit);
        assert_eq!(config.limits.max_scan_limit, Limits::default().max_scan_limit);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "");
        assert_eq!(Config::load(&path).unwrap(), Config::defaults());
    }

    #[test]
    fn test_ceiling_below_default_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[limits]\ndefault_scan_limit = 500\nmax_scan_limit = 100\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_default_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[limits]\ndefault_results_limit = 0\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_toml_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[limits\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        let missing = dir.path().join("missing.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_resolve_order() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write(&dir, "[limits]\nmax_results_limit = 2000\n");
        let env = dir.path().join("env.toml");
        std::fs::write(&env, "[limits]\nmax_results_limit = 3000\n").unwrap();

        let from_cli = Config::resolve_from(Some(cli.as_path()), Some(env.as_path())).unwrap();
        assert_eq!(from_cli.limits.max_results_limit, 2_000);

        let from_env = Config::resolve_from(None, Some(env.as_path())).unwrap();
        assert_eq!(from_env.limits.max_results_limit, 3_000);

        assert_eq!(Config::resolve_from(None, None).unwrap(), Config::defaults());
    }
}
