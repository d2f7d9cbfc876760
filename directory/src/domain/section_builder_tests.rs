//! Tests for section partitioning.

use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{GroupingField, compare_keys};

fn user(id: &str, name: &str, phonetic: &str) -> Arc<UserRecord> {
    Arc::new(UserRecord::try_from_parts(id, name).expect("valid user").with_phonetic(phonetic))
}

#[fixture]
fn mixed_users() -> Vec<Arc<UserRecord>> {
    vec![
        user("1", "张伟", "zhangwei"),
        user("2", "Ann", "ann"),
        user("3", "李娜", "lina"),
        user("4", "8-ball", "8ball"),
        user("5", "Amy", "amy"),
        user("6", "老王", "laowang"),
    ]
}

fn keys(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|section| section.key().as_str()).collect()
}

fn ids(section: &Section) -> Vec<&str> {
    section.users().iter().map(|user| user.id().as_str()).collect()
}

#[rstest]
fn empty_input_yields_no_sections() {
    let sections = build_sections(&[], &GroupingField::Phonetic);
    assert!(sections.is_empty());
}

#[rstest]
fn orders_sections_by_key_with_fallback_last(mixed_users: Vec<Arc<UserRecord>>) {
    let sections = build_sections(&mixed_users, &GroupingField::Phonetic);
    assert_eq!(keys(&sections), ["A", "L", "Z", "#"]);
}

#[rstest]
fn keeps_input_order_within_a_section(mixed_users: Vec<Arc<UserRecord>>) {
    let sections = build_sections(&mixed_users, &GroupingField::Phonetic);
    let a = sections.first().expect("A section");
    let l = sections.get(1).expect("L section");

    assert_eq!(ids(a), ["2", "5"]);
    assert_eq!(ids(l), ["3", "6"]);
}

#[rstest]
fn sections_reference_the_input_records(mixed_users: Vec<Arc<UserRecord>>) {
    let sections = build_sections(&mixed_users, &GroupingField::Phonetic);
    let zhang = sections
        .iter()
        .flat_map(|section| section.users())
        .find(|user| user.id().as_str() == "1")
        .expect("zhang is placed");
    let original = mixed_users.first().expect("input user");
    assert!(Arc::ptr_eq(zhang, original));
}

#[rstest]
fn building_twice_is_structurally_equal(mixed_users: Vec<Arc<UserRecord>>) {
    let first = build_sections(&mixed_users, &GroupingField::Phonetic);
    let second = build_sections(&mixed_users, &GroupingField::Phonetic);
    assert_eq!(first, second);
}

#[rstest]
fn section_keys_are_unique(mixed_users: Vec<Arc<UserRecord>>) {
    let sections = build_sections(&mixed_users, &GroupingField::Name);
    let mut seen = keys(&sections);
    seen.dedup();
    assert_eq!(seen.len(), sections.len());
}

#[rstest]
fn accepts_custom_grouping_functions(mixed_users: Vec<Arc<UserRecord>>) {
    let by_length = |user: &UserRecord| user.name().chars().count().to_string();
    let sections = build_sections(&mixed_users, &by_length);
    assert_eq!(keys(&sections), ["2", "3", "6"]);
}

fn generated_users(parts: &[(String, String)]) -> Vec<Arc<UserRecord>> {
    parts
        .iter()
        .enumerate()
        .map(|(index, (name, phonetic))| user(&index.to_string(), name, phonetic))
        .collect()
}

fn position(user: &UserRecord) -> usize {
    user.id().as_str().parse().expect("numeric id")
}

proptest! {
    #[test]
    fn generated_directories_build_idempotently(
        parts in prop::collection::vec(("[A-Za-z]{1,6}", "[A-Za-z0-9# ]{0,6}"), 0..32),
    ) {
        let users = generated_users(&parts);
        let first = build_sections(&users, &GroupingField::Phonetic);
        let second = build_sections(&users, &GroupingField::Phonetic);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_directories_partition_every_user_once(
        parts in prop::collection::vec(("[A-Za-z]{1,6}", "[A-Za-z0-9# ]{0,6}"), 0..32),
    ) {
        let users = generated_users(&parts);
        let sections = build_sections(&users, &GroupingField::Phonetic);

        let mut placed: Vec<usize> = sections
            .iter()
            .flat_map(|section| section.users())
            .map(|user| position(user))
            .collect();
        placed.sort_unstable();
        prop_assert_eq!(placed, (0..users.len()).collect::<Vec<_>>());

        for section in &sections {
            let positions: Vec<usize> =
                section.users().iter().map(|user| position(user)).collect();
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            for member in section.users() {
                prop_assert_eq!(
                    GroupingField::Phonetic.key_of(member),
                    section.key().as_str()
                );
            }
        }

        let keys = keys(&sections);
        prop_assert!(
            keys.windows(2)
                .all(|pair| compare_keys(pair[0], pair[1]) == std::cmp::Ordering::Less)
        );
    }
}
