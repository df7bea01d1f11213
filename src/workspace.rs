//! The workspace: both containers, their shared state, and everything that
//! spans them (drag-and-drop, program messages, default-tab content).

use crate::content_source::ContentSource;
use crate::error::TabError;
use crate::frame_program::{FrameId, frame_markup};
use crate::lifecycle::{InstanceHooks, InstanceId};
use crate::program_messages::ProgramMessage;
use crate::tab::{ContainerTag, Containers, ContentElement, DefaultToken, TabContext, TabManager};
use crate::tab_drag::{DragDropController, DragSession, DragState, DropOutcome};
use serde::Serialize;
use std::sync::Arc;
use thalis_scaffold_config::ScaffoldConfig;

/// A default tab waiting for its landing-page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDefault {
    pub container: ContainerTag,
    pub tab_name: String,
    pub path: String,
    /// Matches the request on the tab that asked; the name alone may be reused
    pub token: DefaultToken,
}

/// Markup fetched for a [`PendingDefault`] (fallback text on failure)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDefault {
    pub pending: PendingDefault,
    pub markup: String,
}

impl PendingDefault {
    /// Fetch the markup; a failed fetch yields `fallback` instead
    pub async fn fetch(self, source: &dyn ContentSource, fallback: &str) -> ResolvedDefault {
        let markup = match source.fetch_markup(&self.path).await {
            Ok(markup) => markup,
            Err(e) => {
                log::warn!("Default tab '{}' falls back to text: {}", self.tab_name, e);
                fallback.to_string()
            }
        };
        ResolvedDefault {
            pending: self,
            markup,
        }
    }
}

pub struct Workspace {
    containers: Containers,
    context: TabContext,
    source: Arc<dyn ContentSource>,
    config: ScaffoldConfig,
    right_visible: bool,
    drag_session: DragSession,
    center_drag: DragDropController,
    right_drag: DragDropController,
}

impl Workspace {
    pub fn new(config: ScaffoldConfig, source: Arc<dyn ContentSource>) -> Self {
        let context = TabContext::new();
        let center = TabManager::new(ContainerTag::Center, &context, &config);
        let right = TabManager::new(ContainerTag::Right, &context, &config);
        Self {
            containers: Containers::new(center, right),
            right_visible: config.right_sidebar_visible,
            context,
            source,
            config,
            drag_session: DragSession::new(),
            center_drag: DragDropController::new(ContainerTag::Center),
            right_drag: DragDropController::new(ContainerTag::Right),
        }
    }

    /// Give every empty container its default tab and load their content
    pub async fn initialize(&mut self) {
        for manager in self.containers.iter_mut() {
            manager.create_default_tab();
        }
        self.settle().await;
        log::info!("Workspace initialized");
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn context(&self) -> &TabContext {
        &self.context
    }

    pub fn containers(&self) -> &Containers {
        &self.containers
    }

    pub fn containers_mut(&mut self) -> &mut Containers {
        &mut self.containers
    }

    pub fn container(&self, tag: ContainerTag) -> Option<&TabManager> {
        self.containers.get(tag)
    }

    pub fn container_mut(&mut self, tag: ContainerTag) -> Option<&mut TabManager> {
        self.containers.get_mut(tag)
    }

    pub fn right_visible(&self) -> bool {
        self.right_visible
    }

    /// Show or hide the right sidebar
    pub fn set_right_visible(&mut self, visible: bool) {
        self.right_visible = visible;
    }

    pub fn last_selected(&self) -> ContainerTag {
        self.context.namespace.lock().last_selected()
    }

    /// Container new tabs from programs land in: right only when it was
    /// selected last and is on screen.
    pub fn open_target(&self) -> ContainerTag {
        if self.right_visible
            && self.containers.right.is_some()
            && self.last_selected() == ContainerTag::Right
        {
            ContainerTag::Right
        } else {
            ContainerTag::Center
        }
    }

    /// Open a tab with markup content in `tag` and focus it
    pub fn open_tab(&mut self, tag: ContainerTag, title: &str, content: &str) -> Result<String, TabError> {
        let manager = self
            .containers
            .get_mut(tag)
            .ok_or(TabError::ContainerUnavailable(tag))?;
        Ok(manager.open_tab(title, content))
    }

    /// Open an instance-scoped mini-app in `tag`, registering its hooks
    pub fn open_instance(
        &mut self,
        tag: ContainerTag,
        title: &str,
        markup: &str,
        hooks: Box<dyn InstanceHooks>,
    ) -> Result<(InstanceId, String), TabError> {
        let manager = self
            .containers
            .get_mut(tag)
            .ok_or(TabError::ContainerUnavailable(tag))?;
        let instance = self.context.lifecycle.lock().register(hooks);
        let element = ContentElement::for_instance(markup, instance);
        let name = manager.add_tab(title, markup, Some(element), false, None, true);
        Ok((instance, name))
    }

    pub fn set_active_tab(&mut self, tag: ContainerTag, name: &str) -> Result<(), TabError> {
        let manager = self
            .containers
            .get_mut(tag)
            .ok_or(TabError::ContainerUnavailable(tag))?;
        if !manager.contains(name) {
            return Err(TabError::TabNotFound {
                container: tag,
                name: name.to_string(),
            });
        }
        manager.set_active_tab(name);
        Ok(())
    }

    /// User closes a tab; an emptied container gets its default tab back
    /// once the workspace settles.
    pub fn close_tab(&mut self, tag: ContainerTag, name: &str) -> Result<(), TabError> {
        let manager = self
            .containers
            .get_mut(tag)
            .ok_or(TabError::ContainerUnavailable(tag))?;
        if manager.close_tab(name) {
            Ok(())
        } else {
            Err(TabError::TabNotFound {
                container: tag,
                name: name.to_string(),
            })
        }
    }

    /// Hand out every outstanding default-content request
    pub fn take_pending_defaults(&mut self) -> Vec<PendingDefault> {
        let path = self.config.home_page_path.clone();
        self.containers
            .iter_mut()
            .flat_map(|manager| {
                let container = manager.component();
                manager
                    .take_pending_defaults()
                    .into_iter()
                    .map(|(tab_name, token)| PendingDefault {
                        container,
                        tab_name,
                        path: path.clone(),
                        token,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Apply fetched default markup and run the home initializer.
    ///
    /// The tab is looked up again by its request token: it may have moved to
    /// the other container, been renamed, or been closed while the fetch was
    /// in flight. A tab opened later under the same name is left alone.
    /// Returns false when the requesting tab is gone.
    pub async fn apply_default(&mut self, resolved: ResolvedDefault) -> bool {
        let ResolvedDefault { pending, markup } = resolved;
        let located = self.containers.iter().find_map(|manager| {
            let name = manager.awaiting_default(pending.token)?;
            Some((manager.component(), name.to_string()))
        });
        let Some((tag, name)) = located else {
            log::debug!("Default tab '{}' closed before its content arrived", pending.tab_name);
            return false;
        };
        let Some(manager) = self.containers.get_mut(tag) else {
            return false;
        };
        if !manager.apply_default_content(pending.token, markup) {
            return false;
        }

        let source = Arc::clone(&self.source);
        if let Some(element) = manager.ensure_content_element(&name)
            && let Err(e) = source.initialize_home(element).await
        {
            log::error!("Error initializing default tab '{}': {}", name, e);
        }
        true
    }

    /// Resolve every pending default tab
    pub async fn settle(&mut self) {
        let source = Arc::clone(&self.source);
        let fallback = self.config.home_fallback_text.clone();
        for pending in self.take_pending_defaults() {
            let resolved = pending.fetch(source.as_ref(), &fallback).await;
            self.apply_default(resolved).await;
        }
    }

    pub fn drag_start(&mut self, tag: ContainerTag, name: &str) -> Result<(), TabError> {
        let controller = match tag {
            ContainerTag::Center => &mut self.center_drag,
            ContainerTag::Right => &mut self.right_drag,
        };
        controller.drag_start(&mut self.containers, &mut self.drag_session, name)
    }

    pub fn drag_over(&mut self, tag: ContainerTag, pointer_x: f32) -> Option<usize> {
        let controller = match tag {
            ContainerTag::Center => &mut self.center_drag,
            ContainerTag::Right => &mut self.right_drag,
        };
        controller.drag_over(&mut self.containers, &self.drag_session, pointer_x)
    }

    /// Drop onto `tag`'s strip. Call [`Workspace::drag_end`] afterwards, as
    /// the platform does.
    pub fn drop_tab(&mut self, tag: ContainerTag, pointer_x: f32) -> DropOutcome {
        let program_path = self.config.frame_program_path.clone();
        let controller = match tag {
            ContainerTag::Center => &mut self.center_drag,
            ContainerTag::Right => &mut self.right_drag,
        };
        controller.drop(
            &mut self.containers,
            &self.drag_session,
            pointer_x,
            &program_path,
        )
    }

    pub fn drag_end(&mut self) {
        self.center_drag
            .drag_end(&mut self.containers, &mut self.drag_session);
        self.right_drag
            .drag_end(&mut self.containers, &mut self.drag_session);
    }

    /// Full gesture: start, hover, drop, end
    pub fn drag_tab(
        &mut self,
        from: ContainerTag,
        name: &str,
        to: ContainerTag,
        pointer_x: f32,
    ) -> Result<DropOutcome, TabError> {
        self.drag_start(from, name)?;
        self.drag_over(to, pointer_x);
        let outcome = self.drop_tab(to, pointer_x);
        self.drag_end();
        Ok(outcome)
    }

    /// Inject a payload from outside the tab system (e.g. files dragged
    /// from the file browser) into the drag session
    pub fn drag_session_mut(&mut self) -> &mut DragSession {
        &mut self.drag_session
    }

    pub fn drag_state(&self, tag: ContainerTag) -> &DragState {
        match tag {
            ContainerTag::Center => self.center_drag.state(),
            ContainerTag::Right => self.right_drag.state(),
        }
    }

    /// Handle a message posted by an embedded program.
    ///
    /// `origin` is the sender frame when it could be identified. Returns the
    /// container and name of the affected tab.
    pub fn handle_program_message(
        &mut self,
        origin: Option<FrameId>,
        raw: &str,
    ) -> Option<(ContainerTag, String)> {
        match ProgramMessage::parse(raw)? {
            ProgramMessage::OpenTab { detail } => {
                let src = detail.src.as_deref().filter(|s| !s.is_empty())?;
                let target = self.open_target();
                let markup = frame_markup(src);
                let name = self
                    .containers
                    .get_mut(target)?
                    .open_tab(detail.title_or_default(), markup);
                log::info!("Program opened '{}' in {}", name, target);
                Some((target, name))
            }
            ProgramMessage::UpdateTabTitle { title } => {
                let title = title.filter(|t| !t.trim().is_empty())?;
                let (tag, old) = match origin {
                    Some(frame) => self.tab_hosting_frame(frame)?,
                    None => self.focused_tab()?,
                };
                let renamed = self.containers.get_mut(tag)?.rename_tab(&old, &title)?;
                Some((tag, renamed))
            }
        }
    }

    /// Tab whose element hosts `frame`, center searched first
    fn tab_hosting_frame(&self, frame: FrameId) -> Option<(ContainerTag, String)> {
        self.containers.iter().find_map(|manager| {
            manager
                .tabs()
                .iter()
                .find(|t| {
                    t.content_element
                        .as_ref()
                        .and_then(|e| e.frame())
                        .is_some_and(|host| host.frame_id == frame)
                })
                .map(|t| (manager.component(), t.name.clone()))
        })
    }

    /// Active (else last) tab of the last-focused container
    fn focused_tab(&self) -> Option<(ContainerTag, String)> {
        let tag = match self.last_selected() {
            ContainerTag::Right if self.containers.right.is_some() => ContainerTag::Right,
            _ => ContainerTag::Center,
        };
        let manager = self.containers.get(tag)?;
        let name = manager
            .active_tab()
            .filter(|name| manager.contains(name))
            .map(str::to_owned)
            .or_else(|| manager.tabs().last().map(|t| t.name.clone()))?;
        Some((tag, name))
    }

    /// Serializable view of both containers and the namespace
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let namespace = self.context.namespace.lock();
        let mut used_names: Vec<String> = namespace.used_names().iter().cloned().collect();
        used_names.sort();
        WorkspaceSnapshot {
            containers: self
                .containers
                .iter()
                .map(|manager| ContainerSnapshot {
                    component: manager.component(),
                    active_tab: manager.active_tab().map(str::to_owned),
                    tabs: manager
                        .tabs()
                        .iter()
                        .map(|t| TabSnapshot {
                            name: t.name.clone(),
                            pinned: t.pinned,
                            visible: t.is_visible(),
                        })
                        .collect(),
                })
                .collect(),
            used_names,
            last_selected: namespace.last_selected(),
            right_visible: self.right_visible,
        }
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("containers", &self.containers)
            .field("right_visible", &self.right_visible)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceSnapshot {
    pub containers: Vec<ContainerSnapshot>,
    pub used_names: Vec<String>,
    pub last_selected: ContainerTag,
    pub right_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerSnapshot {
    pub component: ContainerTag,
    pub active_tab: Option<String>,
    pub tabs: Vec<TabSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSnapshot {
    pub name: String,
    pub pinned: bool,
    pub visible: bool,
}
