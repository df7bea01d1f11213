// Library exports for testing and embedding in a host shell
//
// # Locking
//
// Shared workspace state (tab namespace, instance lifecycle bridge, frame
// navigation state) sits behind `parking_lot::Mutex`. Every lock is taken
// for one short critical section and never held across an `.await` or
// across a call back into a `TabManager`. Tab-removed listeners and instance
// hooks are cloned out of the lifecycle bridge and run after its lock is
// released, so they may lock the bridge themselves.

/// Crate version, reported by the CLI and the debug log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod content_source;
pub mod error;
pub mod frame_program;
pub mod lifecycle;
pub mod namespace;
pub mod program_messages;
pub mod replay;
pub mod tab;
pub mod tab_drag;
pub mod workspace;

pub use error::TabError;
pub use thalis_scaffold_config::{ContainerTag, ScaffoldConfig};
pub use workspace::Workspace;
