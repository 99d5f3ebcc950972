//! The persistence contract the engine relies on.

use crate::error::CollaboratorError;
use crate::models::TenantId;

use super::record::{Document, Filter, Record};
use super::snapshot::Snapshot;

/// A tenant-partitioned document database.
///
/// Every call is scoped to one tenant. Ids are opaque strings assigned on
/// create. Implementations must make `create_unless` and `update_if` atomic
/// with respect to other writers of the same collection.
pub trait DocumentStore: Send + Sync {
    /// Returns every record matching all `filters`.
    fn find<R: Record>(
        &self,
        tenant: &TenantId,
        filters: &[Filter],
    ) -> Result<Vec<R>, CollaboratorError>;

    /// Returns the record with `id`.
    ///
    /// Fails with [`CollaboratorError::NotFound`] if there is none.
    fn get<R: Record>(&self, tenant: &TenantId, id: &str) -> Result<R, CollaboratorError>;

    /// Stores `record` under a fresh id and returns it with the id set.
    fn create<R: Record>(&self, tenant: &TenantId, record: R) -> Result<R, CollaboratorError>;

    /// Stores `record` unless a record matching all of `conflicts` exists.
    ///
    /// Returns `None` when a conflicting record was found. The check and the
    /// insert happen under one write lock.
    fn create_unless<R: Record>(
        &self,
        tenant: &TenantId,
        record: R,
        conflicts: &[Filter],
    ) -> Result<Option<R>, CollaboratorError>;

    /// Merges `changes` into the record with `id` and returns the result.
    ///
    /// The `id` field cannot be changed.
    fn update<R: Record>(
        &self,
        tenant: &TenantId,
        id: &str,
        changes: Document,
    ) -> Result<R, CollaboratorError>;

    /// Merges `changes` only if the stored record matches all of `expected`.
    ///
    /// Returns `None` when the precondition failed and nothing was written.
    fn update_if<R: Record>(
        &self,
        tenant: &TenantId,
        id: &str,
        expected: &[Filter],
        changes: Document,
    ) -> Result<Option<R>, CollaboratorError>;

    /// Deletes the record with `id`.
    fn delete<R: Record>(&self, tenant: &TenantId, id: &str) -> Result<(), CollaboratorError>;

    /// Subscribes to the full contents of a collection after every write.
    fn subscribe<R: Record>(&self, tenant: &TenantId) -> Result<Snapshot<R>, CollaboratorError>;
}
