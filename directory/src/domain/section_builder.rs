//! Partition a flat user list into keyed sections.

use std::collections::HashMap;
use std::sync::Arc;

use super::grouping::{GroupingKey, compare_keys};
use super::section::Section;
use super::user::UserRecord;

/// Group `users` into one section per distinct grouping key.
///
/// Sections are ordered with [`compare_keys`]; users keep their input order
/// within each section. Empty input yields no sections.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use contact_directory::domain::{GroupingField, UserRecord, build_sections};
///
/// let users = vec![
///     Arc::new(UserRecord::try_from_parts("2", "Bob").expect("valid user")),
///     Arc::new(UserRecord::try_from_parts("1", "Ann").expect("valid user")),
/// ];
/// let sections = build_sections(&users, &GroupingField::Name);
/// let keys: Vec<_> = sections.iter().map(|s| s.key().as_str()).collect();
/// assert_eq!(keys, ["A", "B"]);
/// ```
pub fn build_sections<G>(users: &[Arc<UserRecord>], grouping: &G) -> Vec<Section>
where
    G: GroupingKey + ?Sized,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Arc<UserRecord>>> = HashMap::new();

    for user in users {
        let key = grouping.key_of(user);
        groups
            .entry(key)
            .or_insert_with_key(|key| {
                order.push(key.clone());
                Vec::new()
            })
            .push(Arc::clone(user));
    }

    order.sort_by(|left, right| compare_keys(left, right));
    order
        .into_iter()
        .filter_map(|key| {
            let members = groups.remove(&key)?;
            Some(Section::keyed(key, members))
        })
        .collect()
}

#[cfg(test)]
#[path = "section_builder_tests.rs"]
mod tests;
