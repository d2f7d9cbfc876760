//! Domain ports for the contact directory boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_source;
mod header_items;
mod starred_notifications;

#[cfg(test)]
pub(crate) use contact_source::MockContactSource;
pub use contact_source::{ContactSource, ContactSourceError, FixtureContactSource};
pub use header_items::{HeaderItemsProvider, NoHeaderItems};
#[cfg(test)]
pub(crate) use starred_notifications::MockStarredChangeNotifier;
pub use starred_notifications::{SilentNotifier, StarredChangeNotifier, StarredChanged};
