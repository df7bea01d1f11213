//! Content nodes and the content container they are mounted in.

use crate::frame_program::{FrameHost, scan_iframe_src};
use crate::lifecycle::InstanceId;
use std::fmt;
use uuid::Uuid;

/// Identity of a content element, used for attachment tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(Uuid);

impl ContentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content-{}", self.0.simple())
    }
}

/// Program embedded in a content element
#[derive(Debug, Clone)]
pub enum Embedded {
    /// Program running in its own frame (separate browsing context)
    Frame(FrameHost),
    /// Instance-scoped mini-app whose root is this element
    Instance(InstanceId),
}

/// A tab's materialized content.
#[derive(Debug, Clone)]
pub struct ContentElement {
    pub id: ContentId,
    pub markup: String,
    pub visible: bool,
    pub embedded: Option<Embedded>,
}

impl ContentElement {
    /// Build an element from markup; a contained `<iframe src>` is recognized
    /// as a frame program.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let embedded = scan_iframe_src(&markup).map(|src| Embedded::Frame(FrameHost::new(src)));
        Self {
            id: ContentId::new(),
            markup,
            visible: false,
            embedded,
        }
    }

    /// Pre-built root of an instance-scoped mini-app
    pub fn for_instance(markup: impl Into<String>, instance: InstanceId) -> Self {
        Self {
            id: ContentId::new(),
            markup: markup.into(),
            visible: false,
            embedded: Some(Embedded::Instance(instance)),
        }
    }

    pub fn instance(&self) -> Option<InstanceId> {
        match &self.embedded {
            Some(Embedded::Instance(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn frame(&self) -> Option<&FrameHost> {
        match &self.embedded {
            Some(Embedded::Frame(host)) => Some(host),
            _ => None,
        }
    }

    pub fn frame_mut(&mut self) -> Option<&mut FrameHost> {
        match &mut self.embedded {
            Some(Embedded::Frame(host)) => Some(host),
            _ => None,
        }
    }
}

/// The content container: which elements are currently mounted, in order.
#[derive(Debug, Default)]
pub struct ContentArea {
    attached: Vec<ContentId>,
}

impl ContentArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ContentId) -> bool {
        self.attached.contains(&id)
    }

    /// Mount an element; returns false if it was already mounted
    pub fn attach(&mut self, id: ContentId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.attached.push(id);
        true
    }

    pub fn detach(&mut self, id: ContentId) -> bool {
        let before = self.attached.len();
        self.attached.retain(|attached| *attached != id);
        self.attached.len() != before
    }

    pub fn clear(&mut self) {
        self.attached.clear();
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
