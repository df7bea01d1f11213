//! Drag payload and the platform drag session it travels in.

use crate::error::TabError;
use crate::tab::ContainerTag;
use serde::{Deserialize, Serialize};

/// Data-transfer format the payload is stored under
pub const PAYLOAD_FORMAT: &str = "text/plain";

/// What a tab drag carries, as JSON `{tabId, tabName, sourceComponent}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub tab_id: String,
    pub tab_name: String,
    pub source_component: ContainerTag,
}

impl DragPayload {
    pub fn new(source: ContainerTag, index: usize, tab_name: impl Into<String>) -> Self {
        Self {
            tab_id: format!("tab-{source}-{index}"),
            tab_name: tab_name.into(),
            source_component: source,
        }
    }

    pub fn encode(&self) -> Result<String, TabError> {
        serde_json::to_string(self).map_err(|e| TabError::MalformedPayload(e.to_string()))
    }

    pub fn decode(raw: &str) -> Result<Self, TabError> {
        serde_json::from_str(raw).map_err(|e| TabError::MalformedPayload(e.to_string()))
    }
}

/// Platform drag session (the browser's `DataTransfer`): opaque strings
/// keyed by format, alive from drag start to drag end.
#[derive(Debug, Default, Clone)]
pub struct DragSession {
    format: Option<String>,
    data: Option<String>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: &str, data: String) {
        self.format = Some(format.to_string());
        self.data = Some(data);
    }

    /// Data stored under `format`, if any
    pub fn get_data(&self, format: &str) -> Option<&str> {
        match &self.format {
            Some(stored) if stored == format => self.data.as_deref(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.format = None;
        self.data = None;
    }

    /// Decode the tab payload carried by this session
    pub fn payload(&self) -> Result<DragPayload, TabError> {
        let raw = self
            .get_data(PAYLOAD_FORMAT)
            .ok_or_else(|| TabError::MalformedPayload("no drag data".to_string()))?;
        DragPayload::decode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_wire_names() {
        let payload = DragPayload::new(ContainerTag::Right, 2, "Chats");
        let json: serde_json::Value = serde_json::from_str(&payload.encode().unwrap()).unwrap();
        assert_eq!(json["tabName"], "Chats");
        assert_eq!(json["sourceComponent"], "right");
        assert_eq!(json["tabId"], "tab-right-2");
    }

    #[test]
    fn foreign_payloads_are_rejected() {
        assert!(matches!(
            DragPayload::decode("/home/user/notes.txt"),
            Err(TabError::MalformedPayload(_))
        ));
        assert!(DragPayload::decode(r#"{"tabName":"A","sourceComponent":"left","tabId":"x"}"#).is_err());
    }

    #[test]
    fn session_only_answers_for_its_format() {
        let mut session = DragSession::new();
        session.set_data(PAYLOAD_FORMAT, "{}".to_string());
        assert_eq!(session.get_data("text/paths"), None);
        assert!(session.payload().is_err());
        session.clear();
        assert_eq!(session.get_data(PAYLOAD_FORMAT), None);
    }
}
