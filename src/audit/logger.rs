//! Audit logger for the append-only audit trail
//!
//! Writes one [`AuditRecord`] per call through the store's key-assigning insert
//! and reads records back by id or by subject. Records are never updated, so
//! every read is untracked.

use std::future::{ready, Ready};

use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{AuditId, UserId};
use crate::storage::KeyAssigningStore;

use super::entry::AuditRecord;

/// Append and query audit records
pub trait AuditLog {
    /// Store exactly one record for `subject_id`
    fn log_change(
        &self,
        subject_id: UserId,
        action: &str,
        changes: &str,
    ) -> CatalogResult<AuditRecord>;

    /// Asynchronous variant of [`log_change`](Self::log_change). Not supported
    /// yet: the returned future always resolves to `NotImplemented`.
    fn log_change_async(
        &self,
        subject_id: UserId,
        action: &str,
        changes: &str,
    ) -> Ready<CatalogResult<()>>;

    /// Every record in store order
    fn get_all_logs(&self) -> CatalogResult<Vec<AuditRecord>>;

    /// Records whose subject is `subject_id`; empty when there are none
    fn get_logs_for_user(&self, subject_id: UserId) -> CatalogResult<Vec<AuditRecord>>;

    /// The record with `id`, if it exists
    fn get_log_by_id(&self, id: AuditId) -> CatalogResult<Option<AuditRecord>>;
}

/// Audit log backed by an entity store
pub struct AuditLogger<'a, S> {
    store: &'a S,
}

impl<'a, S: KeyAssigningStore<AuditRecord>> AuditLogger<'a, S> {
    /// Create a new audit logger over `store`
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: KeyAssigningStore<AuditRecord>> AuditLog for AuditLogger<'_, S> {
    fn log_change(
        &self,
        subject_id: UserId,
        action: &str,
        changes: &str,
    ) -> CatalogResult<AuditRecord> {
        let record = self
            .store
            .create_with_generated_id(AuditRecord::new(Some(subject_id), action, changes))?;

        info!(
            audit_id = %record.id,
            subject = %subject_id,
            action,
            "change recorded"
        );
        Ok(record)
    }

    fn log_change_async(
        &self,
        subject_id: UserId,
        action: &str,
        _changes: &str,
    ) -> Ready<CatalogResult<()>> {
        debug!(subject = %subject_id, action, "asynchronous audit logging requested");
        ready(Err(CatalogError::NotImplemented(
            "asynchronous audit logging is not supported yet".into(),
        )))
    }

    fn get_all_logs(&self) -> CatalogResult<Vec<AuditRecord>> {
        self.store.get_all_no_tracking()
    }

    fn get_logs_for_user(&self, subject_id: UserId) -> CatalogResult<Vec<AuditRecord>> {
        Ok(self
            .store
            .get_all_no_tracking()?
            .into_iter()
            .filter(|record| record.subject_id == Some(subject_id))
            .collect())
    }

    fn get_log_by_id(&self, id: AuditId) -> CatalogResult<Option<AuditRecord>> {
        Ok(self
            .store
            .get_all_no_tracking()?
            .into_iter()
            .find(|record| record.id == id))
    }
}
