//! Outbound adapters implementing the directory's domain ports.
//!
//! - **in_memory**: a mutex-guarded directory that serves contacts and
//!   broadcasts starred changes
//! - **fixture_file**: loads a JSON fixture into the in-memory directory
//!
//! Adapters translate between stored representations and domain records.
//! They contain no sectioning or reconciliation logic.

pub mod fixture_file;
pub mod in_memory;

pub use fixture_file::{ContactFixture, FixtureError};
pub use in_memory::InMemoryContactDirectory;
