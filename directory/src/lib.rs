//! Contact directory assembly and live starred-section synchronisation.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] owns the records, the section builder, the starred-section
//!   merger, the published view state and the session lifecycle.
//! - [`domain::ports`] declares the contact source, change notification and
//!   header hook boundaries.
//! - [`outbound`] provides an in-memory contact directory and a JSON fixture
//!   loader.
//! - [`inbound`] wires starred-change notifications into a session.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use contact_directory::domain::{DirectoryService, DirectorySession, UserRecord};
//! use contact_directory::outbound::InMemoryContactDirectory;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let directory = Arc::new(InMemoryContactDirectory::default());
//! let ann = UserRecord::try_from_parts("u-1", "Ann").expect("valid user");
//! directory.insert_user(ann.with_phonetic("ann"));
//!
//! let session = DirectorySession::new(DirectoryService::builder(directory).build());
//! session.mount().await.expect("initial load");
//!
//! let view = session.view_state().expect("published view");
//! assert_eq!(view.section_keys(), vec!["A"]);
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::{DirectorySettings, SettingsError};
