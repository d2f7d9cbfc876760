//! Hook deriving the header rows shown above the section list.

use std::sync::Arc;

use crate::domain::{HeaderItem, Section, UserRecord};

/// Opaque pure function from the loaded directory to header rows.
///
/// Invoked once per full load, never on starred patches.
pub trait HeaderItemsProvider: Send + Sync {
    /// Header rows for a freshly loaded directory.
    fn header_items(&self, users: &[Arc<UserRecord>], sections: &[Arc<Section>])
    -> Vec<HeaderItem>;
}

/// Provider used when no header hook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeaderItems;

impl HeaderItemsProvider for NoHeaderItems {
    fn header_items(
        &self,
        _users: &[Arc<UserRecord>],
        _sections: &[Arc<Section>],
    ) -> Vec<HeaderItem> {
        Vec::new()
    }
}

impl<F> HeaderItemsProvider for F
where
    F: Fn(&[Arc<UserRecord>], &[Arc<Section>]) -> Vec<HeaderItem> + Send + Sync,
{
    fn header_items(
        &self,
        users: &[Arc<UserRecord>],
        sections: &[Arc<Section>],
    ) -> Vec<HeaderItem> {
        self(users, sections)
    }
}
