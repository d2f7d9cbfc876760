//! Driven port for the external contact provider.
//!
//! The domain owns the record shapes; adapters translate whatever the
//! provider speaks into [`UserRecord`] and [`OrgRecord`] values. Every call is
//! a fresh fetch: adapters must not cache on the domain's behalf.

use async_trait::async_trait;

use crate::domain::{OrgRecord, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact source adapters.
    pub enum ContactSourceError {
        /// The provider could not be reached or refused the request.
        Unavailable {
            /// Transport or provider detail.
            message: String,
        } => "contact source unavailable: {message}",
        /// The provider answered with data that could not be decoded.
        Malformed {
            /// Decoding detail.
            message: String,
        } => "contact source returned malformed data: {message}",
    }
}

/// Port for fetching directory records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Fetch every user in the directory.
    ///
    /// `force_refresh` asks the provider to bypass its own caches.
    async fn fetch_all_users(&self, force_refresh: bool)
    -> Result<Vec<UserRecord>, ContactSourceError>;

    /// Fetch every organisation node.
    async fn fetch_all_organizations(
        &self,
        force_refresh: bool,
    ) -> Result<Vec<OrgRecord>, ContactSourceError>;

    /// Fetch the current user's starred contacts, in display order.
    async fn fetch_starred_users(&self) -> Result<Vec<UserRecord>, ContactSourceError>;
}

/// Fixture source returning an empty directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureContactSource;

#[async_trait]
impl ContactSource for FixtureContactSource {
    async fn fetch_all_users(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<UserRecord>, ContactSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_all_organizations(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<OrgRecord>, ContactSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_starred_users(&self) -> Result<Vec<UserRecord>, ContactSourceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_source_returns_an_empty_directory() {
        let source = FixtureContactSource;
        assert!(source.fetch_all_users(true).await.expect("users").is_empty());
        assert!(
            source
                .fetch_all_organizations(false)
                .await
                .expect("orgs")
                .is_empty()
        );
        assert!(source.fetch_starred_users().await.expect("starred").is_empty());
    }

    #[rstest]
    fn errors_render_their_message() {
        let err = ContactSourceError::unavailable("timeout");
        assert_eq!(err.to_string(), "contact source unavailable: timeout");
    }
}
