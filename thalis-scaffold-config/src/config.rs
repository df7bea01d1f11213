//! The [`ScaffoldConfig`] struct and its validation.

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};

/// Workspace engine configuration.
///
/// Every field has a serde default so a partial (or empty) YAML file is
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Display name of the landing tab synthesized when a container empties
    #[serde(default = "defaults::default_tab_name")]
    pub default_tab_name: String,

    /// Path the landing page markup is fetched from
    #[serde(default = "defaults::home_page_path")]
    pub home_page_path: String,

    /// Plain text shown instead of the landing page when the fetch fails
    #[serde(default = "defaults::home_fallback_text")]
    pub home_fallback_text: String,

    /// Markup shown in the landing tab while its content is being fetched
    #[serde(default = "defaults::loading_placeholder")]
    pub loading_placeholder: String,

    /// Shell page of the iframe-hosted file browser program
    #[serde(default = "defaults::frame_program_path")]
    pub frame_program_path: String,

    /// Width of a tab button in the strip layout (logical pixels)
    #[serde(default = "defaults::tab_width")]
    pub tab_width: f32,

    /// Horizontal gap between tab buttons (logical pixels)
    #[serde(default = "defaults::tab_spacing")]
    pub tab_spacing: f32,

    /// Whether the right sidebar starts visible
    #[serde(default = "defaults::bool_true")]
    pub right_sidebar_visible: bool,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            default_tab_name: defaults::default_tab_name(),
            home_page_path: defaults::home_page_path(),
            home_fallback_text: defaults::home_fallback_text(),
            loading_placeholder: defaults::loading_placeholder(),
            frame_program_path: defaults::frame_program_path(),
            tab_width: defaults::tab_width(),
            tab_spacing: defaults::tab_spacing(),
            right_sidebar_visible: true,
            log_level: LogLevel::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_tab_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_tab_name must not be empty".to_string(),
            ));
        }
        if !(self.tab_width.is_finite() && self.tab_width > 0.0) {
            return Err(ConfigError::Validation(format!(
                "tab_width must be a positive number, got {}",
                self.tab_width
            )));
        }
        if !(self.tab_spacing.is_finite() && self.tab_spacing >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "tab_spacing must not be negative, got {}",
                self.tab_spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: ScaffoldConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, ScaffoldConfig::default());
        assert_eq!(config.default_tab_name, "Home");
    }

    #[test]
    fn partial_yaml_overrides_only_given_fields() {
        let config: ScaffoldConfig =
            serde_yaml_ng::from_str("tab_width: 80\nright_sidebar_visible: false\n").unwrap();
        assert_eq!(config.tab_width, 80.0);
        assert!(!config.right_sidebar_visible);
        assert_eq!(config.home_fallback_text, "Welcome to openThalis");
    }

    #[test]
    fn validate_rejects_bad_metrics() {
        let config = ScaffoldConfig {
            tab_width: 0.0,
            ..ScaffoldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        let config = ScaffoldConfig {
            default_tab_name: "  ".to_string(),
            ..ScaffoldConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ScaffoldConfig::default().validate().is_ok());
    }
}
