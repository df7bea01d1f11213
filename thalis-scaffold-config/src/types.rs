//! Small enums shared by the config file and the workspace engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two tab containers a tab lives in.
///
/// Serialized as `"center"` / `"right"`, which is also the tag carried in
/// drag payloads as `sourceComponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContainerTag {
    /// Main workspace area
    #[default]
    Center,
    /// Right sidebar
    Right,
}

impl ContainerTag {
    /// Both containers, center first
    pub fn all() -> [ContainerTag; 2] {
        [ContainerTag::Center, ContainerTag::Right]
    }

    /// The other container
    pub fn opposite(self) -> ContainerTag {
        match self {
            ContainerTag::Center => ContainerTag::Right,
            ContainerTag::Right => ContainerTag::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerTag::Center => "center",
            ContainerTag::Right => "right",
        }
    }
}

impl fmt::Display for ContainerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log verbosity for the debug log bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to the `log` crate's filter type
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Parse a user-supplied level name (case-insensitive)
    pub fn parse(value: &str) -> Option<LogLevel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "1" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            "trace" | "4" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_tag_serializes_as_component_key() {
        assert_eq!(
            serde_yaml_ng::to_string(&ContainerTag::Right).unwrap().trim(),
            "right"
        );
        assert_eq!(ContainerTag::Center.opposite(), ContainerTag::Right);
    }

    #[test]
    fn log_level_parse_accepts_names_and_numbers() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("4"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    }
}
