//! Messages embedded programs post to the shell window.
//!
//! Frames are sandboxed, so messages arrive as JSON objects carrying a
//! `__thalis__: true` marker. Anything unmarked belongs to someone else and is
//! ignored quietly.

use serde::Deserialize;
use serde_json::Value;

/// Marker field every shell message carries
pub const MESSAGE_MARKER: &str = "__thalis__";

/// Title used when an open-tab request names none
pub const DEFAULT_OPEN_TITLE: &str = "Tab";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProgramMessage {
    /// Open `src` in a new frame tab
    OpenTab {
        #[serde(default)]
        detail: OpenTabDetail,
    },
    /// Rename the tab hosting the sender frame
    UpdateTabTitle {
        #[serde(default)]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OpenTabDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

impl OpenTabDetail {
    /// Requested title, or the default for blank/missing ones
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_OPEN_TITLE)
    }
}

impl ProgramMessage {
    /// Decode a posted message.
    ///
    /// Returns `None` for unmarked messages, unknown types, and malformed
    /// bodies; the latter two are logged.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => return None,
        };
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Option<Self> {
        if value.get(MESSAGE_MARKER) != Some(&Value::Bool(true)) {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(message) => Some(message),
            Err(e) => {
                log::warn!("Ignoring program message: {}", e);
                None
            }
        }
    }
}
