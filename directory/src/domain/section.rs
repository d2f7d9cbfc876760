//! Sections of the sectioned contact list.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::user::UserRecord;

/// Reserved key of the pinned starred section.
pub const STARRED_SECTION_KEY: &str = "☆";

/// Default title shown above the starred section.
pub const DEFAULT_STARRED_TITLE: &str = "星标好友";

/// Key identifying one section in the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey(String);

impl SectionKey {
    /// Wrap a grouping key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The reserved starred key.
    pub fn starred() -> Self {
        Self(STARRED_SECTION_KEY.to_owned())
    }

    /// Whether this is the reserved starred key.
    pub fn is_starred(&self) -> bool {
        self.0 == STARRED_SECTION_KEY
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An ordered group of users rendered under one header.
///
/// Users are held by reference; cloning a section never copies records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    key: SectionKey,
    title: String,
    #[serde(rename = "data")]
    users: Vec<Arc<UserRecord>>,
}

impl Section {
    /// Build a general section whose title matches its key.
    pub fn keyed(key: impl Into<String>, users: Vec<Arc<UserRecord>>) -> Self {
        let key = SectionKey::new(key);
        let title = key.as_str().to_owned();
        Self { key, title, users }
    }

    /// Build the pinned starred section.
    pub fn starred(title: impl Into<String>, users: Vec<Arc<UserRecord>>) -> Self {
        Self {
            key: SectionKey::starred(),
            title: title.into(),
            users,
        }
    }

    /// Section key.
    pub fn key(&self) -> &SectionKey {
        &self.key
    }

    /// Header title; equals the key for general sections.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Users in display order.
    pub fn users(&self) -> &[Arc<UserRecord>] {
        &self.users
    }

    /// Whether this is the pinned starred section.
    pub fn is_starred(&self) -> bool {
        self.key.is_starred()
    }

    /// Copy of this section with its contents swapped, key and title kept.
    #[must_use]
    pub fn with_users(&self, users: Vec<Arc<UserRecord>>) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            users,
        }
    }
}
