//! Tab manager for one container (center or right)

use super::{
    ContainerTag, ContentArea, ContentElement, DefaultRequest, DefaultToken, TabContext, TabRecord,
    TabStrip,
};
use crate::lifecycle::{self, SharedLifecycle, TabRemovedNotice};
use crate::namespace::SharedNamespace;
use thalis_scaffold_config::ScaffoldConfig;

/// Manages the ordered tabs of a single container
pub struct TabManager {
    component: ContainerTag,
    /// All tabs in this container, in strip order
    tabs: Vec<TabRecord>,
    /// Name of the currently active tab
    active_tab: Option<String>,
    strip: Option<TabStrip>,
    content_area: Option<ContentArea>,
    namespace: SharedNamespace,
    lifecycle: SharedLifecycle,
    default_tab_name: String,
    loading_placeholder: String,
}

impl TabManager {
    /// Create an empty manager with a strip and a content area
    pub fn new(component: ContainerTag, context: &TabContext, config: &ScaffoldConfig) -> Self {
        Self {
            component,
            tabs: Vec::new(),
            active_tab: None,
            strip: Some(TabStrip::new(config.tab_width, config.tab_spacing)),
            content_area: Some(ContentArea::new()),
            namespace: context.namespace.clone(),
            lifecycle: context.lifecycle.clone(),
            default_tab_name: config.default_tab_name.clone(),
            loading_placeholder: config.loading_placeholder.clone(),
        }
    }

    /// Drop the strip (tab buttons are then not rendered)
    pub fn without_strip(mut self) -> Self {
        self.strip = None;
        self
    }

    /// Drop the content area (activation becomes a no-op)
    pub fn without_content_area(mut self) -> Self {
        self.content_area = None;
        self
    }

    /// Add a tab and return the name it was registered under.
    ///
    /// With `keep_original_name` the name is kept as is (a cross-container
    /// move, where it is already reserved); a name already present in this
    /// container is never duplicated and gets a fresh allocation instead.
    /// Otherwise a collision-free name is allocated from the shared namespace. Content
    /// falls back to a generic line when empty. A supplied `content_element`
    /// is mounted hidden right away. Out-of-range positions append.
    pub fn add_tab(
        &mut self,
        name: &str,
        content: impl Into<String>,
        content_element: Option<ContentElement>,
        keep_original_name: bool,
        insert_position: Option<usize>,
        auto_activate: bool,
    ) -> String {
        let new_name = {
            let mut namespace = self.namespace.lock();
            if keep_original_name && self.tabs.iter().any(|t| t.name == name) {
                log::warn!(
                    "Tab '{}' already exists in {}; allocating a fresh name",
                    name,
                    self.component
                );
                namespace.allocate(name)
            } else if keep_original_name {
                namespace.reserve(name);
                name.to_string()
            } else {
                namespace.allocate(name)
            }
        };

        let mut content = content.into();
        if content.is_empty() {
            content = format!("This is the content for {new_name}");
        }

        let mut record = TabRecord::new(new_name.clone(), content);
        if let Some(mut element) = content_element {
            element.visible = false;
            if let Some(area) = self.content_area.as_mut() {
                area.attach(element.id);
            }
            record.content_element = Some(element);
        }

        match insert_position {
            Some(position) if position <= self.tabs.len() => self.tabs.insert(position, record),
            _ => self.tabs.push(record),
        }

        self.update_tabs();

        if auto_activate {
            self.set_active_tab(&new_name);
        } else if let Some(active) = self.active_tab.clone() {
            self.set_active_tab(&active);
        }

        log::info!(
            "Added tab '{}' to {} (total: {})",
            new_name,
            self.component,
            self.tabs.len()
        );
        new_name
    }

    /// Open a tab with a fresh name and switch to it
    pub fn open_tab(&mut self, name: &str, content: impl Into<String>) -> String {
        self.add_tab(name, content, None, false, None, true)
    }

    /// Remove a tab, destroying its content element.
    ///
    /// With `keep_name_reserved` the name stays in the shared set (the
    /// receiving container of a move owns it now). Removing the active tab
    /// activates its neighbour; emptying the container inserts a default tab.
    pub fn remove_tab(&mut self, name: &str, keep_name_reserved: bool) {
        let Some(index) = self.position_of(name) else {
            return;
        };

        if !keep_name_reserved {
            self.namespace.lock().release(name);
        }

        log::info!("Removing tab '{}' from {} (index {})", name, self.component, index);
        let record = self.tabs.remove(index);
        if let Some(element) = record.content_element {
            self.destroy_element(element);
        }

        self.update_tabs();

        if self.tabs.is_empty() {
            self.active_tab = None;
            if let Some(area) = self.content_area.as_mut() {
                area.clear();
            }
            self.create_default_tab();
        } else if self.active_tab.as_deref() == Some(name) {
            self.active_tab = None;
            // Prefer the tab at the same index (or previous if at end)
            let next = index.min(self.tabs.len() - 1);
            let next_name = self.tabs[next].name.clone();
            self.set_active_tab(&next_name);
        } else if let Some(active) = self.active_tab.clone() {
            self.set_active_tab(&active);
        }
    }

    /// User-initiated close: emit the removed notice, then remove.
    pub fn close_tab(&mut self, name: &str) -> bool {
        let Some(record) = self.tab(name) else {
            return false;
        };
        let notice = TabRemovedNotice {
            container: self.component,
            tab_name: name.to_string(),
            instance: record.content_element.as_ref().and_then(|e| e.instance()),
        };
        lifecycle::notify_tab_removed(&self.lifecycle, &notice);
        self.remove_tab(name, false);
        true
    }

    fn destroy_element(&mut self, element: ContentElement) {
        if let Some(area) = self.content_area.as_mut() {
            area.detach(element.id);
        }
        if let Some(instance) = element.instance() {
            lifecycle::container_detached(&self.lifecycle, instance);
        }
    }

    /// Show the named tab's content and hide every other element.
    ///
    /// The element is built from the tab's markup on first activation and
    /// reused afterwards. Without a content area this is a no-op; without a
    /// strip only the button highlighting is skipped. Unknown names change
    /// nothing.
    pub fn set_active_tab(&mut self, name: &str) {
        let Some(record) = self.tabs.iter_mut().find(|t| t.name == name) else {
            log::debug!("Ignoring activation of unknown tab '{}' in {}", name, self.component);
            return;
        };
        if let Some(strip) = self.strip.as_mut() {
            strip.set_active(name);
        }
        let Some(area) = self.content_area.as_mut() else {
            return;
        };

        let element = record
            .content_element
            .get_or_insert_with(|| ContentElement::from_markup(record.content.as_str()));
        if !area.contains(element.id) {
            area.attach(element.id);
        }

        for tab in &mut self.tabs {
            if let Some(element) = tab.content_element.as_mut() {
                element.visible = tab.name == name;
            }
        }

        self.active_tab = Some(name.to_string());
        self.namespace.lock().set_last_selected(self.component);
        log::debug!("Switched {} to tab '{}'", self.component, name);
    }

    /// Re-render the strip from the tab list
    pub fn update_tabs(&mut self) {
        if let Some(strip) = self.strip.as_mut() {
            strip.render(&self.tabs, self.active_tab.as_deref());
        }
    }

    /// Insert the default tab into an empty container.
    ///
    /// The tab shows a loading placeholder and carries a queued
    /// [`DefaultRequest`] until its markup is applied via
    /// [`TabManager::apply_default_content`]. Returns the tab name, or `None`
    /// when the container is not empty.
    pub fn create_default_tab(&mut self) -> Option<String> {
        if !self.tabs.is_empty() {
            return None;
        }
        let base = self.default_tab_name.clone();
        let placeholder = self.loading_placeholder.clone();
        let name = self.add_tab(&base, placeholder, None, false, None, true);
        if let Some(record) = self.tab_mut(&name) {
            record.default_request = Some(DefaultRequest::new());
        }
        Some(name)
    }

    /// First tab still waiting for default content (queued or in flight)
    pub fn pending_default(&self) -> Option<&str> {
        self.tabs
            .iter()
            .find(|t| t.default_request.is_some())
            .map(|t| t.name.as_str())
    }

    /// Name of the tab holding the request identified by `token`
    pub fn awaiting_default(&self, token: DefaultToken) -> Option<&str> {
        self.tabs
            .iter()
            .find(|t| t.default_request.is_some_and(|r| r.token == token))
            .map(|t| t.name.as_str())
    }

    /// Attach a request carried over from the other container
    pub fn adopt_default_request(&mut self, name: &str, request: DefaultRequest) -> bool {
        let Some(record) = self.tab_mut(name) else {
            return false;
        };
        record.default_request = Some(request);
        true
    }

    /// Hand every queued request over to whoever fetches the markup.
    ///
    /// Taken requests stay on their tab (in flight) until applied.
    pub fn take_pending_defaults(&mut self) -> Vec<(String, DefaultToken)> {
        self.tabs
            .iter_mut()
            .filter_map(|record| {
                let request = record.default_request.as_mut().filter(|r| r.queued)?;
                request.queued = false;
                Some((record.name.clone(), request.token))
            })
            .collect()
    }

    /// Replace the markup of the tab awaiting `token` and rebuild its element.
    ///
    /// Returns false when no tab here carries the token (closed, or moved
    /// while its markup was in flight); the markup is then discarded.
    pub fn apply_default_content(&mut self, token: DefaultToken, markup: String) -> bool {
        let Some(record) = self
            .tabs
            .iter_mut()
            .find(|t| t.default_request.is_some_and(|r| r.token == token))
        else {
            log::debug!(
                "Discarding default content in {}: no tab awaits it",
                self.component
            );
            return false;
        };
        record.default_request = None;
        record.content = markup;
        let name = record.name.clone();
        let stale = record.content_element.take();
        if let Some(element) = stale {
            self.destroy_element(element);
        }
        if self.active_tab.as_deref() == Some(name.as_str()) {
            self.set_active_tab(&name);
        }
        true
    }

    /// Build (if needed) and mount a tab's element without changing visibility
    pub fn ensure_content_element(&mut self, name: &str) -> Option<&mut ContentElement> {
        let record = self.tabs.iter_mut().find(|t| t.name == name)?;
        let element = record
            .content_element
            .get_or_insert_with(|| ContentElement::from_markup(record.content.as_str()));
        if let Some(area) = self.content_area.as_mut() {
            area.attach(element.id);
        }
        Some(element)
    }

    /// Rename a tab through the shared namespace. Returns the final name.
    pub fn rename_tab(&mut self, old: &str, requested: &str) -> Option<String> {
        let index = self.position_of(old)?;
        let requested = requested.trim();
        if requested.is_empty() {
            return None;
        }
        let new_name = self.namespace.lock().rename(old, requested);
        self.tabs[index].name = new_name.clone();
        if self.active_tab.as_deref() == Some(old) {
            self.active_tab = Some(new_name.clone());
        }
        self.update_tabs();
        log::info!("Renamed tab '{}' to '{}' in {}", old, new_name, self.component);
        Some(new_name)
    }

    /// Move a tab to a drop slot (0..=len, slot k sits before tab k).
    ///
    /// Dropping onto the tab's own slot or the one right after it changes
    /// nothing. Returns true if the order changed.
    pub fn reorder_tab(&mut self, name: &str, drop_index: usize) -> bool {
        let Some(current) = self.position_of(name) else {
            return false;
        };
        let drop_index = drop_index.min(self.tabs.len());
        if drop_index == current || drop_index == current + 1 {
            return false;
        }

        let record = self.tabs.remove(current);
        let target = if drop_index > current {
            drop_index - 1
        } else {
            drop_index
        };
        self.tabs.insert(target, record);
        log::debug!(
            "Moved tab '{}' from index {} to {} in {}",
            name,
            current,
            target,
            self.component
        );

        self.update_tabs();
        if let Some(active) = self.active_tab.clone() {
            self.set_active_tab(&active);
        }
        true
    }

    /// Detach a tab's element without destroying it (first half of a move)
    pub fn take_content_element(&mut self, name: &str) -> Option<ContentElement> {
        let record = self.tabs.iter_mut().find(|t| t.name == name)?;
        let element = record.content_element.take()?;
        if let Some(area) = self.content_area.as_mut() {
            area.detach(element.id);
        }
        Some(element)
    }

    /// Toggle a tab's pinned flag. Returns the new state.
    pub fn toggle_pin(&mut self, name: &str) -> Option<bool> {
        let record = self.tabs.iter_mut().find(|t| t.name == name)?;
        record.pinned = !record.pinned;
        let pinned = record.pinned;
        self.update_tabs();
        Some(pinned)
    }

    pub fn component(&self) -> ContainerTag {
        self.component
    }

    pub fn tabs(&self) -> &[TabRecord] {
        &self.tabs
    }

    pub fn tab(&self, name: &str) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| t.name == name)
    }

    pub fn tab_mut(&mut self, name: &str) -> Option<&mut TabRecord> {
        self.tabs.iter_mut().find(|t| t.name == name)
    }

    pub fn tab_names(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.name.clone()).collect()
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Names of tabs whose element is currently shown
    pub fn visible_tabs(&self) -> Vec<&str> {
        self.tabs
            .iter()
            .filter(|t| t.is_visible())
            .map(|t| t.name.as_str())
            .collect()
    }

    pub fn content_element(&self, name: &str) -> Option<&ContentElement> {
        self.tab(name)?.content_element.as_ref()
    }

    pub fn content_element_mut(&mut self, name: &str) -> Option<&mut ContentElement> {
        self.tab_mut(name)?.content_element.as_mut()
    }

    pub fn strip(&self) -> Option<&TabStrip> {
        self.strip.as_ref()
    }

    pub fn strip_mut(&mut self) -> Option<&mut TabStrip> {
        self.strip.as_mut()
    }

    pub fn content_area(&self) -> Option<&ContentArea> {
        self.content_area.as_ref()
    }

    pub fn namespace(&self) -> &SharedNamespace {
        &self.namespace
    }

    pub fn lifecycle(&self) -> &SharedLifecycle {
        &self.lifecycle
    }
}

impl std::fmt::Debug for TabManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabManager")
            .field("component", &self.component)
            .field("tabs", &self.tab_names())
            .field("active_tab", &self.active_tab)
            .field("pending_default", &self.pending_default())
            .finish()
    }
}
