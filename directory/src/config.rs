//! Directory configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CONTACT_DIRECTORY_*` environment variables
//! or a configuration file, layered by OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_MAX_CONTACT_LIMIT, DEFAULT_STARRED_TITLE, DirectoryServiceBuilder, GroupingField,
    UnknownGroupingField,
};

fn default_fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("contacts.json")
}

/// Errors raised when settings cannot be applied to a service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The configured grouping field is not recognised.
    #[error(transparent)]
    InvalidGroupingField(#[from] UnknownGroupingField),
    /// The contact limit was set to zero.
    #[error("max contact limit must be greater than zero")]
    ZeroContactLimit,
}

/// Configuration values controlling directory assembly.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACT_DIRECTORY")]
pub struct DirectorySettings {
    /// Directories with at least this many users publish an empty list.
    pub max_contact_limit: Option<usize>,
    /// Turn off the starred section and its change subscription.
    #[ortho_config(default = false)]
    pub disable_starred: bool,
    /// Record field used for section keys: `phonetic` or `name`.
    pub grouping_field: Option<String>,
    /// Title shown on the starred section.
    pub starred_title: Option<String>,
    /// JSON fixture read by the snapshot tool.
    pub fixture_path: Option<PathBuf>,
}

impl DirectorySettings {
    /// Return the configured contact limit, falling back to the default.
    pub fn max_contact_limit(&self) -> usize {
        self.max_contact_limit.unwrap_or(DEFAULT_MAX_CONTACT_LIMIT)
    }

    /// Whether the starred section is enabled.
    pub fn use_starred(&self) -> bool {
        !self.disable_starred
    }

    /// Parse the configured grouping field, defaulting to phonetic.
    pub fn grouping_field(&self) -> Result<GroupingField, UnknownGroupingField> {
        self.grouping_field
            .as_deref()
            .map_or(Ok(GroupingField::default()), str::parse::<GroupingField>)
    }

    /// Return the configured starred title, falling back to the default.
    pub fn starred_title(&self) -> &str {
        self.starred_title.as_deref().unwrap_or(DEFAULT_STARRED_TITLE)
    }

    /// Return the configured fixture path, falling back to the bundled one.
    pub fn fixture_path(&self) -> PathBuf {
        self.fixture_path
            .clone()
            .unwrap_or_else(default_fixture_path)
    }

    /// Apply these settings to a service builder.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the grouping field is unknown or the
    /// contact limit is zero.
    pub fn configure(
        &self,
        builder: DirectoryServiceBuilder,
    ) -> Result<DirectoryServiceBuilder, SettingsError> {
        let limit = self.max_contact_limit();
        if limit == 0 {
            return Err(SettingsError::ZeroContactLimit);
        }
        Ok(builder
            .grouping(self.grouping_field()?)
            .max_contact_limit(limit)
            .use_starred(self.use_starred())
            .starred_title(self.starred_title()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for directory configuration parsing.

    use super::*;
    use std::ffi::OsString;
    use std::sync::Arc;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::DirectoryService;
    use crate::domain::ports::FixtureContactSource;

    const VARS: [&str; 5] = [
        "CONTACT_DIRECTORY_MAX_CONTACT_LIMIT",
        "CONTACT_DIRECTORY_DISABLE_STARRED",
        "CONTACT_DIRECTORY_GROUPING_FIELD",
        "CONTACT_DIRECTORY_STARRED_TITLE",
        "CONTACT_DIRECTORY_FIXTURE_PATH",
    ];

    fn load_from_empty_args() -> DirectorySettings {
        DirectorySettings::load_from_iter([OsString::from("directory-snapshot")])
            .expect("config should load")
    }

    fn settings(
        grouping_field: Option<&str>,
        max_contact_limit: Option<usize>,
    ) -> DirectorySettings {
        DirectorySettings {
            max_contact_limit,
            disable_starred: false,
            grouping_field: grouping_field.map(str::to_owned),
            starred_title: None,
            fixture_path: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.use_starred());
        assert_eq!(settings.max_contact_limit(), DEFAULT_MAX_CONTACT_LIMIT);
        assert_eq!(settings.grouping_field(), Ok(GroupingField::Phonetic));
        assert_eq!(settings.starred_title(), DEFAULT_STARRED_TITLE);
        assert_eq!(settings.fixture_path(), default_fixture_path());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONTACT_DIRECTORY_MAX_CONTACT_LIMIT", Some("200".to_owned())),
            ("CONTACT_DIRECTORY_DISABLE_STARRED", Some("true".to_owned())),
            ("CONTACT_DIRECTORY_GROUPING_FIELD", Some("name".to_owned())),
            ("CONTACT_DIRECTORY_STARRED_TITLE", Some("Favourites".to_owned())),
            (
                "CONTACT_DIRECTORY_FIXTURE_PATH",
                Some("/tmp/contacts.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.use_starred());
        assert_eq!(settings.max_contact_limit(), 200);
        assert_eq!(settings.grouping_field(), Ok(GroupingField::Name));
        assert_eq!(settings.starred_title(), "Favourites");
        assert_eq!(settings.fixture_path(), PathBuf::from("/tmp/contacts.json"));
    }

    #[rstest]
    #[case(Some("pinyin"), GroupingField::Phonetic)]
    #[case(Some(" Name "), GroupingField::Name)]
    #[case(None, GroupingField::Phonetic)]
    fn grouping_field_parses_known_names(
        #[case] raw: Option<&str>,
        #[case] expected: GroupingField,
    ) {
        assert_eq!(settings(raw, None).grouping_field(), Ok(expected));
    }

    #[rstest]
    fn configure_rejects_unknown_grouping_fields() {
        let builder = DirectoryService::builder(Arc::new(FixtureContactSource));
        let error = settings(Some("surname"), None)
            .configure(builder)
            .err()
            .expect("unknown field rejected");
        assert_eq!(
            error,
            SettingsError::InvalidGroupingField(UnknownGroupingField("surname".to_owned()))
        );
    }

    #[rstest]
    fn configure_rejects_a_zero_limit() {
        let builder = DirectoryService::builder(Arc::new(FixtureContactSource));
        let error = settings(None, Some(0))
            .configure(builder)
            .err()
            .expect("zero limit rejected");
        assert_eq!(error, SettingsError::ZeroContactLimit);
    }

    #[rstest]
    fn configure_applies_limit_and_starred_toggle() {
        let mut settings = settings(Some("name"), Some(42));
        settings.disable_starred = true;
        let service = settings
            .configure(DirectoryService::builder(Arc::new(FixtureContactSource)))
            .expect("settings apply")
            .build();

        assert_eq!(service.max_contact_limit(), 42);
        assert!(!service.uses_starred());
    }
}
