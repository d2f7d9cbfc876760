//! Grouping keys and the ordering applied to them.
//!
//! Grouping keys are phonetic initials, so they are ordered the way a contact
//! index reads rather than by raw code point: alphabetic keys first ignoring
//! case, everything else (`#`, digits, symbols) after them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::user::UserRecord;

/// Key used for users whose initial is not an ASCII letter.
pub const FALLBACK_GROUP_KEY: &str = "#";

/// Pure function from a user to the section key it belongs under.
pub trait GroupingKey: Send + Sync {
    /// Section key `user` belongs under.
    fn key_of(&self, user: &UserRecord) -> String;
}

impl<F> GroupingKey for F
where
    F: Fn(&UserRecord) -> String + Send + Sync,
{
    fn key_of(&self, user: &UserRecord) -> String {
        self(user)
    }
}

/// Built-in record fields a directory can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingField {
    /// Initial of the phonetic transliteration, falling back to the name.
    #[default]
    Phonetic,
    /// Initial of the display name.
    Name,
}

impl GroupingField {
    /// Configuration name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phonetic => "phonetic",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for GroupingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown grouping field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grouping field '{0}', expected 'phonetic' or 'name'")]
pub struct UnknownGroupingField(pub String);

impl FromStr for GroupingField {
    type Err = UnknownGroupingField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "phonetic" | "pinyin" => Ok(Self::Phonetic),
            "name" => Ok(Self::Name),
            _ => Err(UnknownGroupingField(value.to_owned())),
        }
    }
}

impl GroupingKey for GroupingField {
    fn key_of(&self, user: &UserRecord) -> String {
        let source = match self {
            Self::Phonetic => user
                .phonetic()
                .filter(|phonetic| !phonetic.trim().is_empty())
                .unwrap_or_else(|| user.name()),
            Self::Name => user.name(),
        };
        initial_of(source)
    }
}

/// Upper-cased ASCII initial of `text`, or [`FALLBACK_GROUP_KEY`].
///
/// # Examples
/// ```
/// use contact_directory::domain::initial_of;
///
/// assert_eq!(initial_of("zhang wei"), "Z");
/// assert_eq!(initial_of("张伟"), "#");
/// ```
pub fn initial_of(text: &str) -> String {
    match text.trim_start().chars().next() {
        Some(first) if first.is_ascii_alphabetic() => first.to_ascii_uppercase().to_string(),
        _ => FALLBACK_GROUP_KEY.to_owned(),
    }
}

/// Order two grouping keys for display.
pub fn compare_keys(left: &str, right: &str) -> Ordering {
    key_class(left)
        .cmp(&key_class(right))
        .then_with(|| fold_case(left).cmp(&fold_case(right)))
        .then_with(|| left.cmp(right))
}

fn key_class(key: &str) -> u8 {
    match key.chars().next() {
        Some(first) if first.is_alphabetic() => 0,
        _ => 1,
    }
}

fn fold_case(key: &str) -> String {
    key.chars().flat_map(char::to_lowercase).collect()
}
