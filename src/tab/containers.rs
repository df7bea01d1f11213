use super::{ContainerTag, TabManager};

/// The two tab containers of a workspace. Either may be absent (not mounted).
#[derive(Debug, Default)]
pub struct Containers {
    pub center: Option<TabManager>,
    pub right: Option<TabManager>,
}

impl Containers {
    pub fn new(center: TabManager, right: TabManager) -> Self {
        Self {
            center: Some(center),
            right: Some(right),
        }
    }

    pub fn get(&self, tag: ContainerTag) -> Option<&TabManager> {
        match tag {
            ContainerTag::Center => self.center.as_ref(),
            ContainerTag::Right => self.right.as_ref(),
        }
    }

    pub fn get_mut(&mut self, tag: ContainerTag) -> Option<&mut TabManager> {
        match tag {
            ContainerTag::Center => self.center.as_mut(),
            ContainerTag::Right => self.right.as_mut(),
        }
    }

    /// Borrow `(source, destination)` at once; `None` if they are the same
    /// container or either is missing.
    pub fn pair_mut(
        &mut self,
        source: ContainerTag,
        destination: ContainerTag,
    ) -> Option<(&mut TabManager, &mut TabManager)> {
        match (source, destination) {
            (ContainerTag::Center, ContainerTag::Right) => {
                Some((self.center.as_mut()?, self.right.as_mut()?))
            }
            (ContainerTag::Right, ContainerTag::Center) => {
                Some((self.right.as_mut()?, self.center.as_mut()?))
            }
            _ => None,
        }
    }

    /// Mounted managers, center first
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TabManager> {
        self.center.iter_mut().chain(self.right.iter_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabManager> {
        self.center.iter().chain(self.right.iter())
    }

    /// Container currently holding a tab with this name
    pub fn locate(&self, name: &str) -> Option<ContainerTag> {
        self.iter()
            .find(|mgr| mgr.contains(name))
            .map(TabManager::component)
    }
}
