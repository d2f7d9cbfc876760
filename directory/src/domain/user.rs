//! Contact records fetched from the directory provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned while constructing contact records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The id contained whitespace.
    #[error("user id must not contain whitespace")]
    InvalidId,
    /// The display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// Stable provider-issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use contact_directory::domain::UserId;
    ///
    /// assert!(UserId::new("u-42").is_ok());
    /// assert!(UserId::new("u 42").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Department a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Provider department id.
    pub id: String,
    /// Department name shown in subtitles.
    pub name: String,
}

/// A person listed in the contact directory.
///
/// ## Invariants
/// - `id` is a valid [`UserId`].
/// - `name` is non-empty once trimmed of whitespace.
///
/// Records are immutable once fetched and are shared downstream behind an
/// `Arc`, so sections only hold references to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserRecordDto", into = "UserRecordDto")]
pub struct UserRecord {
    id: UserId,
    name: String,
    im_id: Option<String>,
    phones: Vec<String>,
    dept: Option<Department>,
    title: Option<String>,
    phonetic: Option<String>,
}

impl UserRecord {
    /// Build a record from validated components with no optional fields set.
    pub fn new(id: UserId, name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self {
            id,
            name,
            im_id: None,
            phones: Vec::new(),
            dept: None,
            title: None,
            phonetic: None,
        })
    }

    /// Build a record from raw string inputs.
    ///
    /// Prefer [`UserRecord::new`] when the identifier is already validated.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] if `id` is not a valid [`UserId`] or
    /// `name` is blank.
    pub fn try_from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Self::new(UserId::new(id)?, name)
    }

    /// Set the phonetic transliteration.
    #[must_use]
    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = Some(phonetic.into());
        self
    }

    /// Append a phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phones.push(phone.into());
        self
    }

    /// Set the department.
    #[must_use]
    pub fn with_department(mut self, dept: Department) -> Self {
        self.dept = Some(dept);
        self
    }

    /// Set the job title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a messaging identity distinct from the user id.
    #[must_use]
    pub fn with_im_id(mut self, im_id: impl Into<String>) -> Self {
        self.im_id = Some(im_id.into());
        self
    }

    /// Provider-issued identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown in list rows.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Messaging identity, falling back to the user id.
    pub fn im_id(&self) -> &str {
        self.im_id.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    /// All phone numbers in provider order.
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    /// First phone number, if the provider returned any.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phones.first().map(String::as_str)
    }

    /// Department, if known.
    pub fn department(&self) -> Option<&Department> {
        self.dept.as_ref()
    }

    /// Job title, if known.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Phonetic transliteration of the name used for grouping.
    pub fn phonetic(&self) -> Option<&str> {
        self.phonetic.as_deref()
    }

    /// Secondary row text: department and job title joined by `" | "`.
    ///
    /// # Examples
    /// ```
    /// use contact_directory::domain::{Department, UserRecord};
    ///
    /// let user = UserRecord::try_from_parts("u-1", "Ann")
    ///     .expect("valid user")
    ///     .with_department(Department { id: "d-1".into(), name: "Sales".into() })
    ///     .with_title("Lead");
    /// assert_eq!(user.subtitle().as_deref(), Some("Sales | Lead"));
    /// ```
    pub fn subtitle(&self) -> Option<String> {
        let dept = self
            .dept
            .as_ref()
            .map(|dept| dept.name.as_str())
            .filter(|name| !name.is_empty());
        let title = self.title.as_deref().filter(|title| !title.is_empty());
        match (dept, title) {
            (Some(dept), Some(title)) => Some(format!("{dept} | {title}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_owned()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecordDto {
    #[serde(alias = "userId")]
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    im_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    phones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dept: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phonetic: Option<String>,
}

impl From<UserRecord> for UserRecordDto {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            im_id: value.im_id,
            phones: value.phones,
            dept: value.dept,
            title: value.title,
            phonetic: value.phonetic,
        }
    }
}

impl TryFrom<UserRecordDto> for UserRecord {
    type Error = UserValidationError;

    fn try_from(value: UserRecordDto) -> Result<Self, Self::Error> {
        let mut record = Self::new(UserId::new(value.id)?, value.name)?;
        record.im_id = value.im_id;
        record.phones = value.phones;
        record.dept = value.dept;
        record.title = value.title;
        record.phonetic = value.phonetic;
        Ok(record)
    }
}

/// Organisation node returned alongside users.
///
/// The directory pipeline fetches organisations but never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgRecord {
    /// Organisation node id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parent node, absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, name: &str) -> UserRecord {
        UserRecord::try_from_parts(id, name).expect("valid user")
    }

    fn sales() -> Department {
        Department {
            id: "d-1".to_owned(),
            name: "Sales".to_owned(),
        }
    }

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("u 1", UserValidationError::InvalidId)]
    #[case(" u1", UserValidationError::InvalidId)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_blank_display_names() {
        let id = UserId::new("u-1").expect("valid id");
        assert_eq!(
            UserRecord::new(id, "   "),
            Err(UserValidationError::EmptyDisplayName)
        );
    }

    #[rstest]
    #[case("", "Ann", UserValidationError::EmptyId)]
    #[case("u-1", " ", UserValidationError::EmptyDisplayName)]
    fn try_from_parts_reports_invalid_parts(
        #[case] id: &str,
        #[case] name: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(UserRecord::try_from_parts(id, name), Err(expected));
    }

    #[rstest]
    fn subtitle_joins_department_and_title() {
        let user = record("u-1", "Ann")
            .with_department(sales())
            .with_title("Lead");
        assert_eq!(user.subtitle().as_deref(), Some("Sales | Lead"));
    }

    #[rstest]
    fn subtitle_uses_whichever_part_is_present() {
        let dept_only = record("u-1", "Ann").with_department(sales());
        let title_only = record("u-2", "Bob").with_title("Intern");
        let neither = record("u-3", "Cy");

        assert_eq!(dept_only.subtitle().as_deref(), Some("Sales"));
        assert_eq!(title_only.subtitle().as_deref(), Some("Intern"));
        assert_eq!(neither.subtitle(), None);
    }

    #[rstest]
    fn im_id_falls_back_to_user_id() {
        let plain = record("u-1", "Ann");
        let linked = record("u-2", "Bob").with_im_id("im-bob");
        assert_eq!(plain.im_id(), "u-1");
        assert_eq!(linked.im_id(), "im-bob");
    }

    #[rstest]
    fn deserialises_provider_payloads() {
        let json = r#"{
            "userId": "u-7",
            "name": "Zhang Wei",
            "phones": ["13800000000"],
            "phonetic": "zhangwei"
        }"#;
        let user: UserRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(user.id().as_str(), "u-7");
        assert_eq!(user.primary_phone(), Some("13800000000"));
        assert_eq!(user.phonetic(), Some("zhangwei"));
    }

    #[rstest]
    fn rejects_payloads_with_blank_names() {
        let json = r#"{ "id": "u-7", "name": "" }"#;
        let result = serde_json::from_str::<UserRecord>(json);
        assert!(result.is_err());
    }
}
