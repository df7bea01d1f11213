//! Structural errors of tab operations.
//!
//! UI-facing operations log these and carry on; nothing here is fatal.

use crate::tab::ContainerTag;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    #[error("malformed drag payload: {0}")]
    MalformedPayload(String),

    #[error("tab '{name}' not found in {container}")]
    TabNotFound {
        container: ContainerTag,
        name: String,
    },

    #[error("{0} container is unavailable")]
    ContainerUnavailable(ContainerTag),
}
