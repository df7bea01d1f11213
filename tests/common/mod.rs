//! Shared integration test helpers for thalis-scaffold.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{bare_workspace, assert_workspace_invariants};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thalis_scaffold::content_source::{ContentSource, FetchError, StaticContentSource};
use thalis_scaffold::lifecycle::{InstanceHooks, ViewState};
use thalis_scaffold::tab::{ContainerTag, ContentElement};
use thalis_scaffold::{ScaffoldConfig, Workspace};

/// Landing page markup served by [`home_source`]
pub const HOME_MARKUP: &str = r#"<div class="search-container">Home</div>"#;

/// Config with a 100px strip and no spacing, so slot `k` sits at `x = 100 * k`
pub fn test_config() -> ScaffoldConfig {
    ScaffoldConfig {
        tab_width: 100.0,
        tab_spacing: 0.0,
        ..ScaffoldConfig::default()
    }
}

/// Pointer x that resolves to drop slot `slot` under [`test_config`]
pub fn x_for_slot(slot: usize) -> f32 {
    slot as f32 * 100.0 + 10.0
}

pub fn home_source() -> StaticContentSource {
    StaticContentSource::new().with_page(test_config().home_page_path, HOME_MARKUP)
}

/// Workspace with both containers empty (not initialized)
pub fn bare_workspace() -> Workspace {
    Workspace::new(test_config(), Arc::new(home_source()))
}

/// Workspace whose content source has no pages at all
pub fn offline_workspace() -> Workspace {
    Workspace::new(test_config(), Arc::new(StaticContentSource::new()))
}

pub fn names(ws: &Workspace, tag: ContainerTag) -> Vec<String> {
    ws.container(tag).map(|m| m.tab_names()).unwrap_or_default()
}

pub fn active(ws: &Workspace, tag: ContainerTag) -> Option<String> {
    ws.container(tag)
        .and_then(|m| m.active_tab())
        .map(str::to_owned)
}

/// Open plain tabs in order; the last one ends up active
pub fn open_all(ws: &mut Workspace, tag: ContainerTag, titles: &[&str]) {
    for title in titles {
        ws.open_tab(tag, title, &format!("<p>{title}</p>"))
            .expect("container is mounted");
    }
}

/// Names unique across containers and in agreement with the namespace;
/// at most one visible element per container and it is the active tab's.
pub fn assert_workspace_invariants(ws: &Workspace) {
    let mut seen = HashSet::new();
    for manager in ws.containers().iter() {
        for name in manager.tab_names() {
            assert!(seen.insert(name.clone()), "duplicate tab name '{name}'");
        }
        let visible = manager.visible_tabs();
        assert!(visible.len() <= 1, "{} shows {:?}", manager.component(), visible);
        if let Some(shown) = visible.first() {
            assert_eq!(Some(*shown), manager.active_tab());
        }
    }
    let used: HashSet<String> = ws.context().namespace.lock().used_names().clone();
    assert_eq!(used, seen, "namespace out of sync with tab records");
}

/// Observable side of a [`FakeInstance`]
#[derive(Debug, Clone, Default)]
pub struct InstanceTracker {
    pub teardowns: Arc<AtomicUsize>,
    pub restores: Arc<AtomicUsize>,
    pub scroll_top: Arc<Mutex<f64>>,
}

impl InstanceTracker {
    pub fn teardowns(&self) -> usize {
        self.teardowns.load(Ordering::SeqCst)
    }

    pub fn restores(&self) -> usize {
        self.restores.load(Ordering::SeqCst)
    }
}

/// Mini-app stand-in (a chat session) that counts lifecycle calls
pub struct FakeInstance {
    tracker: InstanceTracker,
}

impl FakeInstance {
    pub fn new(scroll_top: f64) -> (Box<Self>, InstanceTracker) {
        let tracker = InstanceTracker::default();
        *tracker.scroll_top.lock() = scroll_top;
        (
            Box::new(Self {
                tracker: tracker.clone(),
            }),
            tracker,
        )
    }
}

impl InstanceHooks for FakeInstance {
    fn teardown(&mut self) {
        self.tracker.teardowns.fetch_add(1, Ordering::SeqCst);
    }

    fn capture_view_state(&self) -> ViewState {
        ViewState {
            scroll_top: Some(*self.tracker.scroll_top.lock()),
        }
    }

    fn restore_view_state(&mut self, state: &ViewState) {
        self.tracker.restores.fetch_add(1, Ordering::SeqCst);
        if let Some(top) = state.scroll_top {
            *self.tracker.scroll_top.lock() = top;
        }
    }
}

/// Content source that records every home initialization
#[derive(Debug, Default)]
pub struct RecordingSource {
    pub inner: StaticContentSource,
    pub initialized: Mutex<Vec<String>>,
    pub fail_initializer: bool,
}

#[async_trait]
impl ContentSource for RecordingSource {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        self.inner.fetch_markup(path).await
    }

    async fn initialize_home(&self, element: &mut ContentElement) -> Result<(), FetchError> {
        self.initialized.lock().push(element.markup.clone());
        if self.fail_initializer {
            return Err(FetchError::Initializer("module failed to load".to_string()));
        }
        Ok(())
    }
}
