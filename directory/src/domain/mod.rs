//! Domain primitives and services for the contact directory.
//!
//! Purpose: turn a flat list of users into an ordered, sectioned directory
//! with starred contacts pinned first, and keep that pinned section in step
//! with starred-set changes without rebuilding the rest of the list.
//!
//! Public surface:
//! - UserRecord, UserId, OrgRecord: records fetched from the provider.
//! - Section, SectionKey: one titled, keyed run of users.
//! - build_sections: partitions users by grouping key.
//! - StarredSectionMerger: pins and reconciles the starred section.
//! - DirectoryViewState: immutable snapshot published to readers.
//! - DirectoryService: loads and assembles snapshots.
//! - DirectorySession: owns the published snapshot for one screen.

pub mod directory_service;
pub mod error;
pub mod grouping;
pub mod ports;
pub mod section;
pub mod section_builder;
pub mod session;
pub mod starred_merger;
pub mod user;
pub mod view_state;

pub use self::directory_service::{
    DEFAULT_MAX_CONTACT_LIMIT, DirectoryLoad, DirectoryService, DirectoryServiceBuilder,
};
pub use self::error::DirectoryError;
pub use self::grouping::{
    FALLBACK_GROUP_KEY, GroupingField, GroupingKey, UnknownGroupingField, compare_keys, initial_of,
};
pub use self::section::{DEFAULT_STARRED_TITLE, STARRED_SECTION_KEY, Section, SectionKey};
pub use self::section_builder::build_sections;
pub use self::session::{DirectorySession, PublishOutcome, ViewStateReceiver};
pub use self::starred_merger::{Reconciliation, StarredPatch, StarredSectionMerger};
pub use self::user::{Department, OrgRecord, UserId, UserRecord, UserValidationError};
pub use self::view_state::{DirectoryViewState, HeaderItem};
