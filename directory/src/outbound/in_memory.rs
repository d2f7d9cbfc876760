//! In-process contact directory.
//!
//! Holds users, organisations and the starred id list behind a mutex and
//! broadcasts a [`StarredChanged`] event whenever the starred list changes.
//! Serves both the [`ContactSource`] and [`StarredChangeNotifier`] ports.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::ports::{
    ContactSource, ContactSourceError, StarredChangeNotifier, StarredChanged,
};
use crate::domain::{OrgRecord, UserId, UserRecord};

const CHANGE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<UserRecord>,
    organizations: Vec<OrgRecord>,
    starred: Vec<UserId>,
}

/// Contact directory kept in memory.
#[derive(Debug)]
pub struct InMemoryContactDirectory {
    state: Mutex<DirectoryState>,
    changes: broadcast::Sender<StarredChanged>,
}

impl Default for InMemoryContactDirectory {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl InMemoryContactDirectory {
    /// Directory seeded with `users` and `organizations`, nothing starred.
    pub fn new(users: Vec<UserRecord>, organizations: Vec<OrgRecord>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(DirectoryState {
                users,
                organizations,
                starred: Vec::new(),
            }),
            changes,
        }
    }

    fn state(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a user, replacing any existing user with the same id in place.
    pub fn insert_user(&self, user: UserRecord) {
        let mut state = self.state();
        match state.users.iter_mut().find(|existing| existing.id() == user.id()) {
            Some(existing) => *existing = user,
            None => state.users.push(user),
        }
    }

    /// Append an organisation node.
    pub fn insert_organization(&self, organization: OrgRecord) {
        self.state().organizations.push(organization);
    }

    /// Append `id` to the starred list. Returns `false` if already starred.
    pub fn star(&self, id: &UserId) -> bool {
        let changed = {
            let mut state = self.state();
            if state.starred.contains(id) {
                false
            } else {
                state.starred.push(id.clone());
                true
            }
        };
        if changed {
            self.announce();
        }
        changed
    }

    /// Remove `id` from the starred list. Returns `false` if it was absent.
    pub fn unstar(&self, id: &UserId) -> bool {
        let changed = {
            let mut state = self.state();
            let before = state.starred.len();
            state.starred.retain(|starred| starred != id);
            state.starred.len() != before
        };
        if changed {
            self.announce();
        }
        changed
    }

    /// Starred ids in display order, including ids with no matching user.
    pub fn starred_ids(&self) -> Vec<UserId> {
        self.state().starred.clone()
    }

    /// Number of live starred-change subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    fn announce(&self) {
        if self.changes.send(StarredChanged).is_err() {
            debug!("starred list changed with no subscribers");
        }
    }
}

#[async_trait]
impl ContactSource for InMemoryContactDirectory {
    async fn fetch_all_users(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<UserRecord>, ContactSourceError> {
        Ok(self.state().users.clone())
    }

    async fn fetch_all_organizations(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<OrgRecord>, ContactSourceError> {
        Ok(self.state().organizations.clone())
    }

    /// Starred users in starred order. Ids without a user are skipped.
    async fn fetch_starred_users(&self) -> Result<Vec<UserRecord>, ContactSourceError> {
        let state = self.state();
        Ok(state
            .starred
            .iter()
            .filter_map(|id| state.users.iter().find(|user| user.id() == id))
            .cloned()
            .collect())
    }
}

impl StarredChangeNotifier for InMemoryContactDirectory {
    fn subscribe(&self) -> broadcast::Receiver<StarredChanged> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tokio::sync::broadcast::error::TryRecvError;

    fn id(raw: &str) -> UserId {
        UserId::new(raw).expect("valid id")
    }

    #[fixture]
    fn directory() -> InMemoryContactDirectory {
        InMemoryContactDirectory::new(
            vec![
                UserRecord::try_from_parts("1", "Ann").expect("valid user"),
                UserRecord::try_from_parts("2", "Bob").expect("valid user"),
            ],
            vec![OrgRecord {
                id: "o-1".to_owned(),
                name: "HQ".to_owned(),
                parent_id: None,
            }],
        )
    }

    #[rstest]
    #[tokio::test]
    async fn starred_users_follow_starred_order(directory: InMemoryContactDirectory) {
        directory.star(&id("2"));
        directory.star(&id("1"));

        let starred = directory.fetch_starred_users().await.expect("starred");
        let names: Vec<_> = starred.iter().map(UserRecord::name).collect();
        assert_eq!(names, ["Bob", "Ann"]);
    }

    #[rstest]
    #[tokio::test]
    async fn stale_starred_ids_are_skipped(directory: InMemoryContactDirectory) {
        directory.star(&id("9"));
        directory.star(&id("1"));

        let starred = directory.fetch_starred_users().await.expect("starred");
        assert_eq!(starred.len(), 1);
        assert_eq!(directory.starred_ids(), [id("9"), id("1")]);
    }

    #[rstest]
    fn star_and_unstar_announce_only_real_changes(directory: InMemoryContactDirectory) {
        let mut receiver = directory.subscribe();

        assert!(directory.star(&id("1")));
        assert!(!directory.star(&id("1")));
        assert!(directory.unstar(&id("1")));
        assert!(!directory.unstar(&id("1")));

        assert_eq!(receiver.try_recv(), Ok(StarredChanged));
        assert_eq!(receiver.try_recv(), Ok(StarredChanged));
        assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
    }

    #[rstest]
    fn dropping_a_receiver_unsubscribes(directory: InMemoryContactDirectory) {
        let receiver = directory.subscribe();
        assert_eq!(directory.subscriber_count(), 1);
        drop(receiver);
        assert_eq!(directory.subscriber_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_user_replaces_by_id(directory: InMemoryContactDirectory) {
        directory.insert_user(UserRecord::try_from_parts("1", "Annie").expect("valid user"));
        directory.insert_user(UserRecord::try_from_parts("3", "Cat").expect("valid user"));

        let users = directory.fetch_all_users(true).await.expect("users");
        let names: Vec<_> = users.iter().map(UserRecord::name).collect();
        assert_eq!(names, ["Annie", "Bob", "Cat"]);
    }

    #[rstest]
    #[tokio::test]
    async fn organizations_are_returned_as_inserted(directory: InMemoryContactDirectory) {
        directory.insert_organization(OrgRecord {
            id: "o-2".to_owned(),
            name: "Branch".to_owned(),
            parent_id: Some("o-1".to_owned()),
        });

        let orgs = directory.fetch_all_organizations(false).await.expect("orgs");
        assert_eq!(orgs.len(), 2);
        let branch = orgs.last().expect("inserted organisation");
        assert_eq!(branch.parent_id.as_deref(), Some("o-1"));
    }
}
