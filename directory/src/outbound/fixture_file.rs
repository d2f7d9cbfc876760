//! JSON fixture describing a whole contact directory.
//!
//! ```json
//! {
//!   "users": [{ "id": "u-1", "name": "Ann", "phonetic": "ann" }],
//!   "organizations": [{ "id": "o-1", "name": "HQ" }],
//!   "starred": ["u-1"]
//! }
//! ```
//!
//! User records accept `userId` as an alias for `id`, matching the provider
//! payloads the fixtures are captured from.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{OrgRecord, UserId, UserRecord};

use super::in_memory::InMemoryContactDirectory;

/// Errors raised while loading a contact fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read contact fixture at '{path}': {message}")]
    Io {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The fixture JSON is malformed or holds invalid records.
    #[error("invalid contact fixture JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

/// Parsed directory fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactFixture {
    /// Every user in the directory.
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Organisation nodes.
    #[serde(default)]
    pub organizations: Vec<OrgRecord>,
    /// Starred user ids in display order.
    #[serde(default)]
    pub starred: Vec<UserId>,
}

impl ContactFixture {
    /// Parse a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] if the JSON is malformed or a record
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        serde_json::from_str(json).map_err(|e| FixtureError::Parse {
            message: e.to_string(),
        })
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read, or
    /// [`FixtureError::Parse`] if its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, FixtureError> {
        let io_error = |e: std::io::Error| FixtureError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| FixtureError::Io {
            path: path.to_path_buf(),
            message: "path has no file name".to_owned(),
        })?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
        let contents = dir.read_to_string(file_name).map_err(io_error)?;
        Self::from_json(&contents)
    }

    /// Build an in-memory directory holding this fixture's records.
    pub fn into_directory(self) -> InMemoryContactDirectory {
        let directory = InMemoryContactDirectory::new(self.users, self.organizations);
        for id in &self.starred {
            directory.star(id);
        }
        directory
    }
}
