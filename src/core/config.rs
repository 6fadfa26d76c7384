use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Origin the rates API is served from when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5001";

/// Environment variable that overrides the configured origin.
pub const ORIGIN_ENV_VAR: &str = "RATESFETCH_ORIGIN";

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default)]
    pub year: Option<i64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            origin: default_origin(),
            year: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location. A missing file yields the defaults.
    /// [`ORIGIN_ENV_VAR`] overrides the origin read here.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };
        Ok(config.with_origin_override(std::env::var(ORIGIN_ENV_VAR).ok()))
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "ratesfetch", "ratesfetch")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Loads an explicitly chosen config file. [`ORIGIN_ENV_VAR`] is not
    /// consulted, so the file's origin always wins.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Replaces the origin when an override is present and non-blank.
    pub fn with_origin_override(mut self, origin: Option<String>) -> Self {
        if let Some(origin) = origin.filter(|o| !o.trim().is_empty()) {
            debug!("Origin overridden to {}", origin);
            self.origin = origin.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
origin: "http://rates.example.com:8080"
year: 2019
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.origin, "http://rates.example.com:8080");
        assert_eq!(config.year, Some(2019));
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert!(config.year.is_none());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_origin_override() {
        let config = AppConfig::default().with_origin_override(Some("http://other:9000".into()));
        assert_eq!(config.origin, "http://other:9000");

        let config = AppConfig::default().with_origin_override(Some("   ".into()));
        assert_eq!(config.origin, DEFAULT_ORIGIN);

        let config = AppConfig::default().with_origin_override(None);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "origin: \"http://127.0.0.1:5001\"")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.origin, "http://127.0.0.1:5001");
        assert!(config.year.is_none());
        Ok(())
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_load_from_invalid_yaml_fails() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "year: [not, a, year")?;

        let result = AppConfig::load_from_path(file.path());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config file")
        );
        Ok(())
    }
}
