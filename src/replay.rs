//! Scripted workspace sessions.
//!
//! A replay script is a JSON array of steps. Each step runs against the
//! workspace, which then settles (pending default tabs get their content)
//! before the next one.

use crate::lifecycle::InstanceHooks;
use crate::tab::{ContainerTag, TabContextAction};
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// A tab addressed by container and name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabRef {
    pub container: ContainerTag,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    OpenTab {
        container: ContainerTag,
        title: String,
        #[serde(default)]
        content: String,
    },
    /// Open an instance-scoped mini-app (chat session, task board)
    OpenInstance {
        container: ContainerTag,
        title: String,
        #[serde(default)]
        markup: String,
    },
    Activate {
        container: ContainerTag,
        name: String,
    },
    CloseTab {
        container: ContainerTag,
        name: String,
    },
    Drag {
        from: ContainerTag,
        name: String,
        to: ContainerTag,
        x: f32,
    },
    /// Navigate a frame program to a new directory
    Navigate {
        container: ContainerTag,
        name: String,
        cwd: String,
    },
    Message {
        /// Tab whose frame posts the message; unknown sender when absent
        #[serde(default)]
        from: Option<TabRef>,
        body: Value,
    },
    Context {
        container: ContainerTag,
        name: String,
        action: TabContextAction,
    },
    SetRightVisible {
        visible: bool,
    },
}

/// Hooks for replayed instances: teardown is only logged
struct ReplayInstance {
    title: String,
}

impl InstanceHooks for ReplayInstance {
    fn teardown(&mut self) {
        log::info!("Replay instance '{}' torn down", self.title);
    }
}

pub fn load_script(path: &Path) -> Result<Vec<ReplayStep>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse replay script {}", path.display()))
}

/// Run every step; a failing step is logged and skipped.
pub async fn run(workspace: &mut Workspace, steps: &[ReplayStep]) {
    for (i, step) in steps.iter().enumerate() {
        if let Err(e) = apply(workspace, step) {
            log::warn!("Replay step {} skipped: {}", i, e);
        }
        workspace.settle().await;
    }
}

fn apply(workspace: &mut Workspace, step: &ReplayStep) -> Result<()> {
    match step {
        ReplayStep::OpenTab {
            container,
            title,
            content,
        } => {
            workspace.open_tab(*container, title, content)?;
        }
        ReplayStep::OpenInstance {
            container,
            title,
            markup,
        } => {
            let hooks = Box::new(ReplayInstance {
                title: title.clone(),
            });
            workspace.open_instance(*container, title, markup, hooks)?;
        }
        ReplayStep::Activate { container, name } => {
            workspace.set_active_tab(*container, name)?;
        }
        ReplayStep::CloseTab { container, name } => {
            workspace.close_tab(*container, name)?;
        }
        ReplayStep::Drag { from, name, to, x } => {
            let outcome = workspace.drag_tab(*from, name, *to, *x)?;
            log::info!("Replay drag of '{}': {:?}", name, outcome);
        }
        ReplayStep::Navigate {
            container,
            name,
            cwd,
        } => {
            let host = workspace
                .container_mut(*container)
                .and_then(|mgr| mgr.ensure_content_element(name))
                .and_then(|element| element.frame_mut())
                .with_context(|| format!("'{name}' in {container} hosts no frame"))?;
            host.expose_state().lock().cwd = Some(cwd.clone());
        }
        ReplayStep::Message { from, body } => {
            let origin = match from {
                Some(tab) => Some(
                    workspace
                        .container(tab.container)
                        .and_then(|mgr| mgr.content_element(&tab.name))
                        .and_then(|element| element.frame())
                        .map(|host| host.frame_id)
                        .with_context(|| format!("'{}' hosts no frame", tab.name))?,
                ),
                None => None,
            };
            let outcome = workspace.handle_program_message(origin, &body.to_string());
            log::info!("Replay message handled: {:?}", outcome);
        }
        ReplayStep::Context {
            container,
            name,
            action,
        } => {
            let applied = workspace
                .container_mut(*container)
                .is_some_and(|mgr| mgr.apply_context_action(name, action));
            anyhow::ensure!(applied, "no tab '{}' in {}", name, container);
        }
        ReplayStep::SetRightVisible { visible } => workspace.set_right_visible(*visible),
    }
    Ok(())
}
