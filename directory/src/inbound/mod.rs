//! Inbound adapters that drive a directory session from outside events
//! while keeping channel and task details at the edge.
//!
//! Starred-change notifications are forwarded by [`notifications`]; the
//! mount/close lifecycle of one screen lives in [`screen`].

pub mod notifications;
pub mod screen;

pub use notifications::{PumpExit, pump_starred_changes};
pub use screen::DirectoryScreen;
