//! Lifecycle bridge between the tab engine and instance-scoped mini-apps.
//!
//! A mini-app (one chat session, one task board) registers its teardown hook
//! and receives an [`InstanceId`]. The tab engine then:
//! - fires [`container_detached`] synchronously when
//!   the tab holding the instance's root is removed,
//! - emits a [`TabRemovedNotice`] before a user-initiated close,
//! - marks the instance as moving for the duration of a cross-container drag.
//!
//! Teardown (closing sockets, stopping pollers) runs exactly once and never
//! while the instance is in the moving set.
//!
//! The bridge itself only keeps books. Listeners and instance hooks are invoked
//! through the free functions below, after the bridge lock has been released,
//! so a callback may consult the bridge (e.g. [`InstanceLifecycleBridge::is_moving`])
//! through its own [`SharedLifecycle`] handle.

use crate::tab::ContainerTag;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle injected into every tab manager of one workspace
pub type SharedLifecycle = Arc<Mutex<InstanceLifecycleBridge>>;

/// Opaque identifier of a running mini-app instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance-{}", self.0.simple())
    }
}

/// Ephemeral UI state carried across a move (not persisted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Scroll offset of the instance's primary list (e.g. chat messages)
    pub scroll_top: Option<f64>,
}

/// Hooks a mini-app hands over when registering an instance.
pub trait InstanceHooks: Send {
    /// Release resources: close sockets, stop timers, drop caches.
    fn teardown(&mut self);

    /// Snapshot state worth keeping across a move
    fn capture_view_state(&self) -> ViewState {
        ViewState::default()
    }

    /// Re-apply a snapshot after the root is mounted in its new container
    fn restore_view_state(&mut self, _state: &ViewState) {}
}

/// "Tab about to be removed" notification, emitted before a close
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRemovedNotice {
    pub container: ContainerTag,
    pub tab_name: String,
    /// Instance whose root lives in the tab's content element, if any
    pub instance: Option<InstanceId>,
}

/// Result of a teardown request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// Hooks ran and the instance was evicted
    TornDown,
    /// The instance is mid-move; nothing happened
    Suppressed,
    /// No such instance (never registered or already torn down)
    Unknown,
}

type NoticeListener = Arc<dyn Fn(&TabRemovedNotice) + Send + Sync>;
type SharedHooks = Arc<Mutex<Box<dyn InstanceHooks>>>;

/// Registry of live instances plus the moving set.
#[derive(Default)]
pub struct InstanceLifecycleBridge {
    instances: HashMap<InstanceId, SharedHooks>,
    moving: HashSet<InstanceId>,
    listeners: Vec<NoticeListener>,
}

impl InstanceLifecycleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh bridge for injection
    pub fn shared() -> SharedLifecycle {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a new instance and return its generated id
    pub fn register(&mut self, hooks: Box<dyn InstanceHooks>) -> InstanceId {
        let id = InstanceId::new();
        self.instances.insert(id, Arc::new(Mutex::new(hooks)));
        log::info!("Registered {} (live: {})", id, self.instances.len());
        id
    }

    pub fn is_registered(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    /// Observe tab-removed notices (in addition to built-in teardown)
    pub fn subscribe_tab_removed(
        &mut self,
        listener: impl Fn(&TabRemovedNotice) + Send + Sync + 'static,
    ) {
        self.listeners.push(Arc::new(listener));
    }

    /// Mark an instance as being moved. Idempotent.
    pub fn mark_moving(&mut self, id: InstanceId) {
        if self.moving.insert(id) {
            log::debug!("{} marked as moving", id);
        }
    }

    /// End the suppression window for an instance. Idempotent.
    pub fn unmark_moving(&mut self, id: InstanceId) {
        if self.moving.remove(&id) {
            log::debug!("{} no longer moving", id);
        }
    }

    pub fn is_moving(&self, id: InstanceId) -> bool {
        self.moving.contains(&id)
    }

    fn hooks(&self, id: InstanceId) -> Option<SharedHooks> {
        self.instances.get(&id).cloned()
    }

    /// Evict an instance that is due for teardown and hand back its hooks
    fn claim_teardown(&mut self, id: InstanceId) -> Result<SharedHooks, TeardownOutcome> {
        if self.moving.contains(&id) {
            log::debug!("Skipping teardown of {}: instance is being moved", id);
            return Err(TeardownOutcome::Suppressed);
        }
        let hooks = self.instances.remove(&id).ok_or(TeardownOutcome::Unknown)?;
        log::info!("Tearing down {} (live: {})", id, self.instances.len());
        Ok(hooks)
    }
}

/// Deliver a close notice to listeners, then tear down its instance.
pub fn notify_tab_removed(
    lifecycle: &SharedLifecycle,
    notice: &TabRemovedNotice,
) -> TeardownOutcome {
    let listeners = lifecycle.lock().listeners.clone();
    for listener in &listeners {
        listener(notice);
    }
    match notice.instance {
        Some(id) => container_detached(lifecycle, id),
        None => TeardownOutcome::Unknown,
    }
}

/// The content element holding this instance's root was destroyed.
pub fn container_detached(lifecycle: &SharedLifecycle, id: InstanceId) -> TeardownOutcome {
    let claimed = lifecycle.lock().claim_teardown(id);
    match claimed {
        Ok(hooks) => {
            hooks.lock().teardown();
            TeardownOutcome::TornDown
        }
        Err(outcome) => outcome,
    }
}

pub fn capture_view_state(lifecycle: &SharedLifecycle, id: InstanceId) -> Option<ViewState> {
    let hooks = lifecycle.lock().hooks(id)?;
    let state = hooks.lock().capture_view_state();
    Some(state)
}

/// Returns false if the instance is gone
pub fn restore_view_state(
    lifecycle: &SharedLifecycle,
    id: InstanceId,
    state: &ViewState,
) -> bool {
    let Some(hooks) = lifecycle.lock().hooks(id) else {
        return false;
    };
    hooks.lock().restore_view_state(state);
    true
}

impl fmt::Debug for InstanceLifecycleBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceLifecycleBridge")
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .field("moving", &self.moving)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
