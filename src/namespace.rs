//! Cross-container tab name registry.
//!
//! Both containers' [`TabManager`](crate::tab::TabManager)s share one
//! [`TabNamespace`] so a tab dragged between them never collides with a name
//! already present at the destination. It is injected at construction rather
//! than living in a global, so every test builds an isolated workspace.

use crate::tab::ContainerTag;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared handle injected into every tab manager of one workspace
pub type SharedNamespace = Arc<Mutex<TabNamespace>>;

/// Names in use across both containers plus collision counters.
#[derive(Debug, Default)]
pub struct TabNamespace {
    /// Every display name currently carried by a tab (or reserved mid-move)
    used_tab_names: HashSet<String>,
    /// Highest numeric suffix ever issued per base name
    tab_name_counters: HashMap<String, u32>,
    /// Container that last received focus; default destination for new tabs
    last_selected: ContainerTag,
}

impl TabNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh namespace for injection
    pub fn shared() -> SharedNamespace {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used_tab_names.contains(name)
    }

    pub fn used_names(&self) -> &HashSet<String> {
        &self.used_tab_names
    }

    pub fn counter(&self, base: &str) -> u32 {
        self.tab_name_counters.get(base).copied().unwrap_or(0)
    }

    pub fn last_selected(&self) -> ContainerTag {
        self.last_selected
    }

    pub fn set_last_selected(&mut self, tag: ContainerTag) {
        self.last_selected = tag;
    }

    /// Pick a free name for `base` and reserve it.
    ///
    /// The bare base is used when free. Otherwise the smallest `"base (n)"`
    /// not in use is chosen, scanning from one past the highest suffix ever
    /// issued for `base` (never below 2). Suffixes are never reused within a
    /// session, even after the tab that carried one is closed.
    pub fn allocate(&mut self, base: &str) -> String {
        if !self.used_tab_names.contains(base) {
            self.used_tab_names.insert(base.to_string());
            return base.to_string();
        }

        let mut n = self.counter(base).max(1) + 1;
        let mut candidate = suffixed(base, n);
        while self.used_tab_names.contains(&candidate) {
            n += 1;
            candidate = suffixed(base, n);
        }

        self.tab_name_counters.insert(base.to_string(), n);
        self.used_tab_names.insert(candidate.clone());
        candidate
    }

    /// Reserve an exact name (used when a moved tab keeps its spelling).
    /// Returns false if it was already reserved.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.used_tab_names.insert(name.to_string())
    }

    pub fn release(&mut self, name: &str) -> bool {
        self.used_tab_names.remove(name)
    }

    /// Move `old` to a collision-free spelling of `requested` in one step.
    ///
    /// The new name is reserved before the old one is released, so there is
    /// no point at which neither spelling is tracked.
    pub fn rename(&mut self, old: &str, requested: &str) -> String {
        if old == requested {
            self.used_tab_names.insert(old.to_string());
            return old.to_string();
        }
        let new_name = self.allocate(requested);
        self.used_tab_names.remove(old);
        new_name
    }
}

fn suffixed(base: &str, n: u32) -> String {
    format!("{base} ({n})")
}
