//! Config persistence and path resolution for [`ScaffoldConfig`].
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)

use crate::config::ScaffoldConfig;
use crate::error::ConfigError;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

impl ScaffoldConfig {
    /// Load configuration from the default path, or defaults if absent.
    ///
    /// Unlike [`Self::load_from`], a missing file is not written back; the
    /// workspace engine runs fine on defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading existing config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: ScaffoldConfig =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("thalis-scaffold")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("thalis-scaffold")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ScaffoldConfig::load_from(&temp.path().join("absent.yaml")).unwrap();
        assert_eq!(config, ScaffoldConfig::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = ScaffoldConfig {
            default_tab_name: "Start".to_string(),
            tab_width: 96.0,
            ..ScaffoldConfig::default()
        };
        config.save_to(&path).unwrap();

        assert!(!path.with_extension("yaml.tmp").exists());
        let loaded = ScaffoldConfig::load_from(&path).unwrap();
        assert_eq!(loaded.default_tab_name, "Start");
        assert_eq!(loaded.tab_width, 96.0);
    }

    #[test]
    fn invalid_yaml_surfaces_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "tab_width: [not, a, number]\n").unwrap();

        let err = ScaffoldConfig::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn config_path_ends_with_yaml_file() {
        assert!(ScaffoldConfig::config_path().ends_with("config.yaml"));
    }
}
