//! Keeps the pinned starred section at the head of the section list.
//!
//! Every operation returns a fresh top-level list. Sections other than the
//! head are carried over as the same `Arc`, so readers can detect untouched
//! sections with [`Arc::ptr_eq`].

use std::sync::Arc;

use super::section::{DEFAULT_STARRED_TITLE, Section};
use super::user::UserRecord;

/// Which of the four reconciliation cases applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarredPatch {
    /// Head was starred and the new starred set is empty.
    Removed,
    /// Head was starred and its contents were replaced.
    Replaced,
    /// Head was not starred and a starred section was prepended.
    Prepended,
    /// Head was not starred and the new starred set is empty.
    Unchanged,
}

impl StarredPatch {
    /// Whether the section list differs from the input.
    pub const fn changes_sections(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of reconciling a section list against a new starred set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Resulting section list.
    pub sections: Vec<Arc<Section>>,
    /// Case that produced `sections`.
    pub patch: StarredPatch,
}

/// Maintains zero or one starred section pinned at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarredSectionMerger {
    title: String,
}

impl Default for StarredSectionMerger {
    fn default() -> Self {
        Self::new(DEFAULT_STARRED_TITLE)
    }
}

impl StarredSectionMerger {
    /// Merger titling the starred section `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Title given to the starred section.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Prepend the starred section to freshly built sections when `starred`
    /// is non-empty.
    pub fn merge_initial(
        &self,
        general: Vec<Section>,
        starred: &[Arc<UserRecord>],
    ) -> Vec<Arc<Section>> {
        let mut sections = Vec::with_capacity(general.len().saturating_add(1));
        if !starred.is_empty() {
            sections.push(Arc::new(self.starred_section(starred)));
        }
        sections.extend(general.into_iter().map(Arc::new));
        sections
    }

    /// Patch the head of `current` so it reflects `starred`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contact_directory::domain::{Section, StarredPatch, StarredSectionMerger, UserRecord};
    ///
    /// let ann = Arc::new(UserRecord::try_from_parts("1", "Ann").expect("valid user"));
    /// let general = vec![Arc::new(Section::keyed("A", vec![Arc::clone(&ann)]))];
    ///
    /// let merger = StarredSectionMerger::default();
    /// let outcome = merger.reconcile(&general, &[ann]);
    /// assert_eq!(outcome.patch, StarredPatch::Prepended);
    /// assert!(outcome.sections[0].is_starred());
    /// assert!(Arc::ptr_eq(&outcome.sections[1], &general[0]));
    /// ```
    pub fn reconcile(
        &self,
        current: &[Arc<Section>],
        starred: &[Arc<UserRecord>],
    ) -> Reconciliation {
        let head = current.first().filter(|section| section.is_starred());
        match (head, starred.is_empty()) {
            (Some(_), true) => Reconciliation {
                sections: current.iter().skip(1).cloned().collect(),
                patch: StarredPatch::Removed,
            },
            (Some(head), false) => {
                let mut sections = Vec::with_capacity(current.len());
                sections.push(Arc::new(head.with_users(starred.to_vec())));
                sections.extend(current.iter().skip(1).cloned());
                Reconciliation {
                    sections,
                    patch: StarredPatch::Replaced,
                }
            }
            (None, false) => {
                let mut sections = Vec::with_capacity(current.len().saturating_add(1));
                sections.push(Arc::new(self.starred_section(starred)));
                sections.extend(current.iter().cloned());
                Reconciliation {
                    sections,
                    patch: StarredPatch::Prepended,
                }
            }
            (None, true) => Reconciliation {
                sections: current.to_vec(),
                patch: StarredPatch::Unchanged,
            },
        }
    }

    fn starred_section(&self, starred: &[Arc<UserRecord>]) -> Section {
        Section::starred(self.title.clone(), starred.to_vec())
    }
}

#[cfg(test)]
#[path = "starred_merger_tests.rs"]
mod tests;
