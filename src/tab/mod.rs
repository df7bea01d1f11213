//! Tab management for the two-container workspace
//!
//! This module provides the core tab infrastructure including:
//! - `TabRecord`: one tab's name, markup, and lazily built content element
//! - `TabManager`: CRUD and activation over one container's tabs
//! - `TabStrip` / `ContentArea`: the render-facing state a host UI projects
//! - `Containers`: the center/right pair a workspace drives
//! - `TabContext`: shared state injected into both containers' managers

mod containers;
mod content;
mod context_menu;
mod manager;
mod strip;

pub use containers::Containers;
pub use content::{ContentArea, ContentElement, ContentId, Embedded};
pub use context_menu::TabContextAction;
pub use manager::TabManager;
pub use strip::{TabButton, TabRect, TabStrip};
pub use thalis_scaffold_config::ContainerTag;

use crate::lifecycle::{InstanceLifecycleBridge, SharedLifecycle};
use crate::namespace::{SharedNamespace, TabNamespace};
use uuid::Uuid;

/// One tab in a container
#[derive(Debug)]
pub struct TabRecord {
    /// Display name, unique across both containers
    pub name: String,
    /// Markup the content element is built from on first activation
    pub content: String,
    /// Built once, then shown/hidden; dropped when the tab is removed
    pub content_element: Option<ContentElement>,
    /// Pinned tabs survive the bulk-close context actions
    pub pinned: bool,
    /// Set on a default tab until its landing-page markup is applied
    pub default_request: Option<DefaultRequest>,
}

impl TabRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_element: None,
            pinned: false,
            default_request: None,
        }
    }

    /// Whether the tab's element is currently shown
    pub fn is_visible(&self) -> bool {
        self.content_element
            .as_ref()
            .is_some_and(|element| element.visible)
    }
}

/// Identity of one default-content request.
///
/// Late markup is matched against this token, never against the tab name: a
/// tab opened later under the same name carries no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultToken(Uuid);

impl DefaultToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DefaultToken {
    fn default() -> Self {
        Self::new()
    }
}

/// A default tab's outstanding request for its markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRequest {
    pub token: DefaultToken,
    /// Not yet handed to a fetcher
    pub queued: bool,
}

impl DefaultRequest {
    pub fn new() -> Self {
        Self {
            token: DefaultToken::new(),
            queued: true,
        }
    }
}

impl Default for DefaultRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Workspace-wide state shared by every tab manager
#[derive(Debug, Clone)]
pub struct TabContext {
    pub namespace: SharedNamespace,
    pub lifecycle: SharedLifecycle,
}

impl TabContext {
    /// Fresh, isolated namespace and lifecycle bridge
    pub fn new() -> Self {
        Self {
            namespace: TabNamespace::shared(),
            lifecycle: InstanceLifecycleBridge::shared(),
        }
    }
}

impl Default for TabContext {
    fn default() -> Self {
        Self::new()
    }
}
