//! Persistence and authentication collaborators.
//!
//! The engine reads and writes records through the [`DocumentStore`] trait
//! and authenticates staff through [`AuthProvider`]. [`MemoryStore`] is the
//! in-process store behind the server and the tests; [`MemoryAuth`] is the
//! reference implementation of the auth contract. Live collections are
//! handed to callers as [`Snapshot`]s.

mod auth;
mod document_store;
mod memory;
mod record;
mod snapshot;

pub use auth::{AuthProvider, Identity, MIN_PASSWORD_LEN, MemoryAuth};
pub use document_store::DocumentStore;
pub use memory::MemoryStore;
pub use record::{Document, Filter, Record, from_document, matches_all, to_document};
pub use snapshot::{CollectionFeed, Snapshot};
