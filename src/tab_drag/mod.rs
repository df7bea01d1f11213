//! Drag-and-drop of tabs within and between containers.
//!
//! One [`DragDropController`] per container. A drag starts on the source
//! container's controller, which writes a [`DragPayload`] into the shared
//! [`DragSession`]; `drag_over` / `drop` then run on whichever controller
//! the pointer is over.

mod drop_index;
mod payload;
mod transfer;

pub use drop_index::{drop_index, is_noop_slot};
pub use payload::{DragPayload, DragSession, PAYLOAD_FORMAT};

use crate::error::TabError;
use crate::tab::{ContainerTag, Containers};

/// Where a controller is in the drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag started from this container
    Dragging { tab_name: String },
    /// Pointer is over this strip at a valid slot
    DragOver { index: usize },
    /// Pointer is over this strip but the drag is not a tab drag, or the slot
    /// would not change anything
    DragOverInvalid,
}

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Same-container splice
    Reordered { name: String, index: usize },
    /// Tab moved in from the other container
    Moved { name: String, index: usize },
    /// Dropped at its own slot
    NoOp,
    /// Payload or source invalid; nothing changed
    Ignored,
}

#[derive(Debug)]
pub struct DragDropController {
    component: ContainerTag,
    state: DragState,
}

impl DragDropController {
    pub fn new(component: ContainerTag) -> Self {
        Self {
            component,
            state: DragState::Idle,
        }
    }

    pub fn component(&self) -> ContainerTag {
        self.component
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Begin dragging one of this container's tabs
    pub fn drag_start(
        &mut self,
        containers: &mut Containers,
        session: &mut DragSession,
        tab_name: &str,
    ) -> Result<(), TabError> {
        let manager = containers
            .get_mut(self.component)
            .ok_or(TabError::ContainerUnavailable(self.component))?;
        let index = manager
            .position_of(tab_name)
            .ok_or_else(|| TabError::TabNotFound {
                container: self.component,
                name: tab_name.to_string(),
            })?;

        let payload = DragPayload::new(self.component, index, tab_name);
        session.set_data(PAYLOAD_FORMAT, payload.encode()?);
        if let Some(strip) = manager.strip_mut() {
            strip.set_dragging(tab_name, true);
        }
        self.state = DragState::Dragging {
            tab_name: tab_name.to_string(),
        };
        debug_log!("DRAG", "drag start '{}' from {}", tab_name, self.component);
        Ok(())
    }

    /// Pointer moved over this container's strip.
    ///
    /// Shows exactly one drop indicator and returns its slot, or clears it
    /// when the drag is not a tab drag or the slot is a same-container no-op.
    pub fn drag_over(
        &mut self,
        containers: &mut Containers,
        session: &DragSession,
        pointer_x: f32,
    ) -> Option<usize> {
        let manager = containers.get_mut(self.component)?;
        let strip = manager.strip_mut()?;
        strip.clear_drop_indicator();

        let Ok(payload) = session.payload() else {
            self.state = DragState::DragOverInvalid;
            return None;
        };

        let slot = drop_index(&strip.rects(), pointer_x);
        let source_index = if payload.source_component == self.component {
            strip.position_of(&payload.tab_name)
        } else {
            None
        };
        if is_noop_slot(source_index, slot) {
            self.state = DragState::DragOverInvalid;
            return None;
        }

        strip.show_drop_indicator(slot);
        self.state = DragState::DragOver { index: slot };
        debug_trace!("DRAG", "drag over {} slot {}", self.component, slot);
        Some(slot)
    }

    /// Drag finished (dropped or cancelled): clear every strip's feedback
    pub fn drag_end(&mut self, containers: &mut Containers, session: &mut DragSession) {
        for manager in containers.iter_mut() {
            if let Some(strip) = manager.strip_mut() {
                strip.clear_dragging();
                strip.clear_drop_indicator();
            }
        }
        session.clear();
        self.state = DragState::Idle;
    }

    /// Drop onto this container's strip.
    ///
    /// Invalid payloads and vanished sources are logged and ignored without
    /// touching either container.
    pub fn drop(
        &mut self,
        containers: &mut Containers,
        session: &DragSession,
        pointer_x: f32,
        program_path: &str,
    ) -> DropOutcome {
        if let Some(strip) = containers
            .get_mut(self.component)
            .and_then(|mgr| mgr.strip_mut())
        {
            strip.clear_drop_indicator();
        }
        self.state = DragState::Idle;

        let result = session.payload().and_then(|payload| {
            if payload.source_component == self.component {
                self.reorder(containers, &payload, pointer_x)
            } else {
                transfer::move_tab(containers, &payload, self.component, pointer_x, program_path)
            }
        });

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Ignoring drop on {}: {}", self.component, e);
                DropOutcome::Ignored
            }
        }
    }

    fn reorder(
        &self,
        containers: &mut Containers,
        payload: &DragPayload,
        pointer_x: f32,
    ) -> Result<DropOutcome, TabError> {
        let manager = containers
            .get_mut(self.component)
            .ok_or(TabError::ContainerUnavailable(self.component))?;
        if !manager.contains(&payload.tab_name) {
            return Err(TabError::TabNotFound {
                container: self.component,
                name: payload.tab_name.clone(),
            });
        }

        let rects = manager.strip().map(|s| s.rects()).unwrap_or_default();
        let slot = drop_index(&rects, pointer_x);
        if manager.reorder_tab(&payload.tab_name, slot) {
            let index = manager.position_of(&payload.tab_name).unwrap_or(slot);
            Ok(DropOutcome::Reordered {
                name: payload.tab_name.clone(),
                index,
            })
        } else {
            Ok(DropOutcome::NoOp)
        }
    }
}
