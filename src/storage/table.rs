//! In-memory table for one entity type
//!
//! Rows are keyed and ordered by identity. Each mutation commits before it
//! returns; a failed mutation leaves the rows untouched.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use super::entity::{Entity, EntityKey, StoreAssignedId};
use super::tracker::{Generation, IdentityMap};
use crate::error::{CatalogError, CatalogResult};

struct TableState<T: Entity> {
    rows: BTreeMap<T::Id, T>,
    tracker: IdentityMap<T::Id>,
    /// Highest key ever stored, deleted or not
    high_water: Option<T::Id>,
}

/// Keyed storage for a single entity type
pub struct Table<T: Entity> {
    state: RwLock<TableState<T>>,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Table<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TableState {
                rows: BTreeMap::new(),
                tracker: IdentityMap::new(),
                high_water: None,
            }),
        }
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, TableState<T>>> {
        self.state.read().map_err(|e| {
            CatalogError::Storage(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, TableState<T>>> {
        self.state.write().map_err(|e| {
            CatalogError::Storage(format!("Failed to acquire write lock: {}", e))
        })
    }

    /// Tracked read of every row
    pub fn get_all(&self) -> CatalogResult<Vec<T>> {
        let mut state = self.write()?;
        let rows: Vec<T> = state.rows.values().cloned().collect();
        for row in &rows {
            state.tracker.register(row.id());
        }
        Ok(rows)
    }

    /// Detached copies of every row
    pub fn get_all_no_tracking(&self) -> CatalogResult<Vec<T>> {
        let state = self.read()?;
        Ok(state.rows.values().cloned().collect())
    }

    /// Insert a row under its own identity
    pub fn insert(&self, entity: T) -> CatalogResult<T> {
        let mut state = self.write()?;
        let id = entity.id();

        if state.rows.contains_key(&id) {
            return Err(CatalogError::DuplicateIdentity {
                entity_type: T::ENTITY_TYPE,
                identifier: id.to_string(),
            });
        }

        state.high_water = Some(state.high_water.map_or(id, |hw| hw.max(id)));
        state.rows.insert(id, entity.clone());
        debug!(entity = T::ENTITY_TYPE, id = %id, "row inserted");
        Ok(entity)
    }

    /// Replace the row with the same identity, refusing if more than one
    /// tracked handle for it is outstanding
    pub fn update(&self, entity: T) -> CatalogResult<()> {
        let mut state = self.write()?;
        let id = entity.id();

        let handles = state.tracker.outstanding(id);
        if handles > 1 {
            warn!(
                entity = T::ENTITY_TYPE,
                id = %id,
                handles,
                generation = state.tracker.generation(),
                "update refused: conflicting tracked handles"
            );
            return Err(CatalogError::ConflictingTracker {
                entity_type: T::ENTITY_TYPE,
                identifier: id.to_string(),
                handles,
            });
        }

        let Some(row) = state.rows.get_mut(&id) else {
            return Err(CatalogError::NotFound {
                entity_type: T::ENTITY_TYPE,
                identifier: id.to_string(),
            });
        };

        *row = entity;
        state.tracker.release(id);
        debug!(entity = T::ENTITY_TYPE, id = %id, "row updated");
        Ok(())
    }

    /// Remove the row with the same identity
    pub fn delete(&self, entity: &T) -> CatalogResult<()> {
        let mut state = self.write()?;
        let id = entity.id();

        if state.rows.remove(&id).is_none() {
            return Err(CatalogError::NotFound {
                entity_type: T::ENTITY_TYPE,
                identifier: id.to_string(),
            });
        }

        state.tracker.release(id);
        debug!(entity = T::ENTITY_TYPE, id = %id, "row deleted");
        Ok(())
    }

    /// Number of tracked handles outstanding for `id`
    pub fn tracked_handles(&self, id: T::Id) -> CatalogResult<usize> {
        Ok(self.read()?.tracker.outstanding(id))
    }

    /// Discard all tracked handles and start a new tracking generation
    pub fn begin_tracking_generation(&self) -> CatalogResult<Generation> {
        Ok(self.write()?.tracker.begin_generation())
    }

    /// Number of rows
    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.read()?.rows.len())
    }
}

impl<T: StoreAssignedId> Table<T> {
    /// Insert a row under the next key after the high-water mark, replacing
    /// whatever identity the caller set
    pub fn insert_generated(&self, mut entity: T) -> CatalogResult<T> {
        let mut state = self.write()?;

        let id = match state.high_water {
            None => T::Id::first(),
            Some(hw) => hw.successor().ok_or_else(|| {
                CatalogError::Storage(format!(
                    "{} key space exhausted after {}",
                    T::ENTITY_TYPE,
                    hw
                ))
            })?,
        };
        if state.rows.contains_key(&id) {
            return Err(CatalogError::DuplicateIdentity {
                entity_type: T::ENTITY_TYPE,
                identifier: id.to_string(),
            });
        }
        entity.assign_id(id);

        state.high_water = Some(id);
        state.rows.insert(id, entity.clone());
        debug!(entity = T::ENTITY_TYPE, id = %id, "row inserted with generated key");
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditRecord;
    use crate::models::{AuditId, User, UserId};
    use chrono::NaiveDate;

    fn user(id: i64, forename: &str) -> User {
        User::new(
            UserId::new(id),
            forename,
            "Blaze",
            "jblaze@example.com",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_insert_and_read_back_in_key_order() {
        let table = Table::new();
        table.insert(user(2, "Two")).unwrap();
        table.insert(user(1, "One")).unwrap();

        let rows = table.get_all_no_tracking().unwrap();
        let ids: Vec<_> = rows.iter().map(|u| u.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();

        let err = table.insert(user(1, "B")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateIdentity { .. }));
        assert_eq!(table.get_all_no_tracking().unwrap()[0].forename, "A");
    }

    #[test]
    fn test_untracked_read_does_not_register() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();

        table.get_all_no_tracking().unwrap();
        table.get_all_no_tracking().unwrap();

        assert_eq!(table.tracked_handles(UserId::new(1)).unwrap(), 0);
        table.update(user(1, "B")).unwrap();
    }

    #[test]
    fn test_single_tracked_read_allows_update_and_releases() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();

        table.get_all().unwrap();
        assert_eq!(table.tracked_handles(UserId::new(1)).unwrap(), 1);

        table.update(user(1, "B")).unwrap();
        assert_eq!(table.tracked_handles(UserId::new(1)).unwrap(), 0);
        assert_eq!(table.get_all_no_tracking().unwrap()[0].forename, "B");
    }

    #[test]
    fn test_two_tracked_reads_conflict() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();

        table.get_all().unwrap();
        table.get_all().unwrap();

        let err = table.update(user(1, "B")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ConflictingTracker { handles: 2, .. }
        ));
        assert_eq!(table.get_all_no_tracking().unwrap()[0].forename, "A");
    }

    #[test]
    fn test_new_generation_clears_conflict() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();
        table.get_all().unwrap();
        table.get_all().unwrap();

        table.begin_tracking_generation().unwrap();

        table.update(user(1, "B")).unwrap();
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let table: Table<User> = Table::new();
        let err = table.update(user(9, "A")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let table = Table::new();
        table.insert(user(1, "A")).unwrap();
        table.get_all().unwrap();

        table.delete(&user(1, "A")).unwrap();
        assert_eq!(table.count().unwrap(), 0);
        assert_eq!(table.tracked_handles(UserId::new(1)).unwrap(), 0);

        assert!(table.delete(&user(1, "A")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_generated_keys_are_monotonic() {
        let table = Table::new();

        let first = table
            .insert_generated(AuditRecord::new(Some(UserId::new(1)), "Create", ""))
            .unwrap();
        let second = table
            .insert_generated(AuditRecord::new(Some(UserId::new(1)), "Update", ""))
            .unwrap();

        assert_eq!(first.id, AuditId::new(1));
        assert_eq!(second.id, AuditId::new(2));

        table.delete(&second).unwrap();
        let third = table
            .insert_generated(AuditRecord::new(None, "Note", ""))
            .unwrap();
        assert_eq!(third.id, AuditId::new(3));
    }

    #[test]
    fn test_generated_key_follows_explicit_inserts() {
        let table = Table::new();
        let mut seeded = AuditRecord::new(None, "Create", "");
        seeded.id = AuditId::new(10);
        table.insert(seeded).unwrap();

        let next = table
            .insert_generated(AuditRecord::new(None, "Create", ""))
            .unwrap();
        assert_eq!(next.id, AuditId::new(11));
    }

    #[test]
    fn test_exhausted_key_space_is_an_error() {
        let table = Table::new();
        let mut last = AuditRecord::new(None, "Create", "");
        last.id = AuditId::new(i64::MAX);
        table.insert(last).unwrap();

        let err = table
            .insert_generated(AuditRecord::new(None, "Create", ""))
            .unwrap_err();

        assert!(matches!(err, CatalogError::Storage(_)));
        assert_eq!(table.count().unwrap(), 1);
    }

    #[test]
    fn test_generated_key_never_overwrites() {
        let table = Table::new();
        let first = table
            .insert_generated(AuditRecord::new(None, "Create", "kept"))
            .unwrap();

        let mut stale = AuditRecord::new(None, "Create", "");
        stale.id = AuditId::new(2);
        table.insert(stale).unwrap();
        let next = table
            .insert_generated(AuditRecord::new(None, "Update", ""))
            .unwrap();

        assert_eq!(next.id, AuditId::new(3));
        let rows = table.get_all_no_tracking().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], first);
    }
}
