//! Read model handed to the presentation layer.

use std::sync::Arc;

use serde::Serialize;

use super::section::Section;

/// Row rendered above the sectioned list (e.g. "Organisation", "Groups").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderItem {
    /// Primary label.
    pub title: String,
    /// Secondary label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    /// Icon reference understood by the presentation layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Identifier the presentation layer maps to a click handler.
    pub action: String,
}

/// Immutable snapshot of the contact directory.
///
/// ## Invariants
/// - At most one section is starred and, when present, it is the first.
/// - Section keys are unique.
/// - A degraded snapshot has no sections.
///
/// Equality is structural. Snapshots are published behind an `Arc` and never
/// mutated; every change produces a new snapshot with a new section list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryViewState {
    sections: Vec<Arc<Section>>,
    header_items: Vec<HeaderItem>,
    degraded: bool,
}

impl DirectoryViewState {
    /// Snapshot of a fully assembled directory.
    pub fn new(sections: Vec<Arc<Section>>, header_items: Vec<HeaderItem>) -> Self {
        Self {
            sections,
            header_items,
            degraded: false,
        }
    }

    /// Snapshot for a directory larger than the configured contact ceiling.
    pub fn degraded(header_items: Vec<HeaderItem>) -> Self {
        Self {
            sections: Vec::new(),
            header_items,
            degraded: true,
        }
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    /// Header rows derived at load time.
    pub fn header_items(&self) -> &[HeaderItem] {
        &self.header_items
    }

    /// Whether the oversized-directory policy produced this snapshot.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The pinned starred section, if any.
    pub fn starred_section(&self) -> Option<&Arc<Section>> {
        self.sections.first().filter(|section| section.is_starred())
    }

    /// Section keys in display order.
    pub fn section_keys(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|section| section.key().as_str())
            .collect()
    }

    /// Successor snapshot with a patched section list and the same headers.
    #[must_use]
    pub fn with_sections(&self, sections: Vec<Arc<Section>>) -> Self {
        Self {
            sections,
            header_items: self.header_items.clone(),
            degraded: self.degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;
    use rstest::rstest;

    fn section(key: &str) -> Arc<Section> {
        let user = UserRecord::try_from_parts(format!("u-{key}"), key).expect("valid user");
        Arc::new(Section::keyed(key, vec![Arc::new(user)]))
    }

    #[rstest]
    fn reports_starred_head() {
        let starred = Arc::new(Section::starred("Stars", Vec::new()));
        let view = DirectoryViewState::new(vec![Arc::clone(&starred), section("A")], Vec::new());
        let head = view.starred_section().expect("starred head");
        assert!(Arc::ptr_eq(head, &starred));
    }

    #[rstest]
    fn general_head_is_not_starred() {
        let view = DirectoryViewState::new(vec![section("A")], Vec::new());
        assert!(view.starred_section().is_none());
    }

    #[rstest]
    fn with_sections_keeps_headers_and_degradation() {
        let header = HeaderItem {
            title: "Organisation".to_owned(),
            sub_title: None,
            icon: None,
            action: "org".to_owned(),
        };
        let view = DirectoryViewState::new(vec![section("A")], vec![header.clone()]);
        let next = view.with_sections(vec![section("B")]);

        assert_eq!(next.header_items(), &[header]);
        assert_eq!(next.section_keys(), ["B"]);
        assert!(!next.is_degraded());
        assert_eq!(view.section_keys(), ["A"]);
    }

    #[rstest]
    fn degraded_snapshots_have_no_sections() {
        let view = DirectoryViewState::degraded(Vec::new());
        assert!(view.is_degraded());
        assert!(view.sections().is_empty());
    }

    #[rstest]
    fn serialises_for_presentation() {
        let view = DirectoryViewState::new(vec![section("A")], Vec::new());
        let value = serde_json::to_value(&view).expect("serialise");
        assert_eq!(value["sections"][0]["key"], "A");
        assert_eq!(value["degraded"], false);
    }
}
