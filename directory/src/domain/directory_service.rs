//! Directory assembly service.
//!
//! Fetches users, organisations and starred users concurrently, partitions
//! the users into sections, pins the starred section, and derives header
//! items. Starred refreshes only re-run the merge step.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::DirectoryError;
use super::grouping::{GroupingField, GroupingKey};
use super::ports::{ContactSource, HeaderItemsProvider, NoHeaderItems};
use super::section_builder::build_sections;
use super::starred_merger::{StarredPatch, StarredSectionMerger};
use super::user::{OrgRecord, UserRecord};
use super::view_state::DirectoryViewState;

/// Directories with at least this many users are not partitioned.
pub const DEFAULT_MAX_CONTACT_LIMIT: usize = 5_000;

/// Raw records returned by one full load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryLoad {
    /// Every user, in provider order.
    pub users: Vec<Arc<UserRecord>>,
    /// Fetched alongside users; not interpreted by the pipeline.
    pub organizations: Vec<OrgRecord>,
    /// Starred users in starred order.
    pub starred: Vec<Arc<UserRecord>>,
}

/// Builds and patches [`DirectoryViewState`] snapshots.
#[derive(Clone)]
pub struct DirectoryService {
    source: Arc<dyn ContactSource>,
    grouping: Arc<dyn GroupingKey>,
    header_items: Arc<dyn HeaderItemsProvider>,
    merger: StarredSectionMerger,
    max_contact_limit: usize,
    use_starred: bool,
}

/// Builder for [`DirectoryService`].
pub struct DirectoryServiceBuilder {
    service: DirectoryService,
}

impl DirectoryServiceBuilder {
    /// Group users by `grouping` instead of the phonetic initial.
    #[must_use]
    pub fn grouping(mut self, grouping: impl GroupingKey + 'static) -> Self {
        self.service.grouping = Arc::new(grouping);
        self
    }

    /// Derive header rows with `provider`.
    #[must_use]
    pub fn header_items(mut self, provider: impl HeaderItemsProvider + 'static) -> Self {
        self.service.header_items = Arc::new(provider);
        self
    }

    /// Title of the starred section.
    #[must_use]
    pub fn starred_title(mut self, title: impl Into<String>) -> Self {
        self.service.merger = StarredSectionMerger::new(title);
        self
    }

    /// Users at or above `limit` degrade the directory to an empty list.
    #[must_use]
    pub fn max_contact_limit(mut self, limit: usize) -> Self {
        self.service.max_contact_limit = limit;
        self
    }

    /// Toggle the starred feature. When off, starred users are never fetched.
    #[must_use]
    pub fn use_starred(mut self, enabled: bool) -> Self {
        self.service.use_starred = enabled;
        self
    }

    /// Finish building.
    pub fn build(self) -> DirectoryService {
        self.service
    }
}

impl DirectoryService {
    /// Start building a service over `source` with default settings.
    pub fn builder(source: Arc<dyn ContactSource>) -> DirectoryServiceBuilder {
        DirectoryServiceBuilder {
            service: Self {
                source,
                grouping: Arc::new(GroupingField::default()),
                header_items: Arc::new(NoHeaderItems),
                merger: StarredSectionMerger::default(),
                max_contact_limit: DEFAULT_MAX_CONTACT_LIMIT,
                use_starred: true,
            },
        }
    }

    /// Whether starred users are fetched and pinned.
    pub fn uses_starred(&self) -> bool {
        self.use_starred
    }

    /// User count at which the directory degrades.
    pub fn max_contact_limit(&self) -> usize {
        self.max_contact_limit
    }

    /// Fetch users, organisations and starred users concurrently.
    ///
    /// All three fetches are joined before returning; the first failure
    /// aborts the load with [`DirectoryError::SourceUnavailable`].
    pub async fn load_all(&self) -> Result<DirectoryLoad, DirectoryError> {
        let starred = async {
            if self.use_starred {
                self.source.fetch_starred_users().await
            } else {
                Ok(Vec::new())
            }
        };

        let (users, organizations, starred) = tokio::try_join!(
            self.source.fetch_all_users(true),
            self.source.fetch_all_organizations(false),
            starred
        )
        .map_err(DirectoryError::SourceUnavailable)?;

        Ok(DirectoryLoad {
            users: users.into_iter().map(Arc::new).collect(),
            organizations,
            starred: starred.into_iter().map(Arc::new).collect(),
        })
    }

    /// Turn a full load into a snapshot.
    pub fn assemble(&self, load: &DirectoryLoad) -> DirectoryViewState {
        if load.users.len() >= self.max_contact_limit {
            debug!(
                users = load.users.len(),
                limit = self.max_contact_limit,
                "directory exceeds contact limit; publishing empty section list"
            );
            let header_items = self.header_items.header_items(&load.users, &[]);
            return DirectoryViewState::degraded(header_items);
        }

        let general = build_sections(&load.users, self.grouping.as_ref());
        let sections = self.merger.merge_initial(general, &load.starred);
        let header_items = self.header_items.header_items(&load.users, &sections);
        DirectoryViewState::new(sections, header_items)
    }

    /// Fetch everything and assemble a fresh snapshot.
    pub async fn load_view(&self) -> Result<DirectoryViewState, DirectoryError> {
        let load = self.load_all().await?;
        let view = self.assemble(&load);
        info!(
            users = load.users.len(),
            organizations = load.organizations.len(),
            starred = load.starred.len(),
            sections = view.sections().len(),
            degraded = view.is_degraded(),
            "directory loaded"
        );
        Ok(view)
    }

    /// Re-fetch only the starred users.
    pub async fn fetch_starred(&self) -> Result<Vec<Arc<UserRecord>>, DirectoryError> {
        let starred = self
            .source
            .fetch_starred_users()
            .await
            .map_err(DirectoryError::StarredRefreshFailed)?;
        Ok(starred.into_iter().map(Arc::new).collect())
    }

    /// Patch `current` with a new starred set.
    ///
    /// Returns `None` when the snapshot would not change: either nothing was
    /// starred before or after, or `current` is a degraded snapshot.
    pub fn reconcile(
        &self,
        current: &DirectoryViewState,
        starred: &[Arc<UserRecord>],
    ) -> Option<(DirectoryViewState, StarredPatch)> {
        if current.is_degraded() {
            return None;
        }
        let reconciliation = self.merger.reconcile(current.sections(), starred);
        reconciliation
            .patch
            .changes_sections()
            .then(|| (current.with_sections(reconciliation.sections), reconciliation.patch))
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
