//! Tab context menu actions

use super::TabManager;
use serde::{Deserialize, Serialize};

/// Action picked from a tab's context menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabContextAction {
    /// Duplicate the tab as "<name> (Copy)"
    Clone,
    /// Close every unpinned tab
    CloseAll,
    /// Close every unpinned tab except the target
    CloseOthers,
    /// Close every unpinned tab; same set as `CloseAll`
    CloseUnpinned,
    /// Pin or unpin the target
    TogglePin,
    /// Rename the target
    Rename(String),
}

impl TabManager {
    /// Apply a context menu action to the tab named `target`.
    ///
    /// Returns false if the target is gone.
    pub fn apply_context_action(&mut self, target: &str, action: &TabContextAction) -> bool {
        let Some(record) = self.tab(target) else {
            return false;
        };
        log::debug!("Context action {:?} on '{}' in {}", action, target, self.component());

        match action {
            TabContextAction::Clone => {
                let content = record.content.clone();
                self.open_tab(&format!("{target} (Copy)"), content);
            }
            TabContextAction::CloseAll | TabContextAction::CloseUnpinned => {
                for name in self.unpinned_names(None) {
                    self.close_tab(&name);
                }
            }
            TabContextAction::CloseOthers => {
                for name in self.unpinned_names(Some(target)) {
                    self.close_tab(&name);
                }
            }
            TabContextAction::TogglePin => {
                self.toggle_pin(target);
            }
            TabContextAction::Rename(requested) => {
                self.rename_tab(target, requested);
            }
        }
        true
    }

    fn unpinned_names(&self, except: Option<&str>) -> Vec<String> {
        self.tabs()
            .iter()
            .filter(|t| !t.pinned && Some(t.name.as_str()) != except)
            .map(|t| t.name.clone())
            .collect()
    }
}
