//! Storage layer for usercat
//!
//! An in-memory keyed store with two read modes. Tracked reads register the
//! identities they return so that a second in-flight edit of the same record
//! is caught at update time; untracked reads hand out detached copies.
//!
//! Nothing here is durable. The process starts from the seeded sample set and
//! loses all changes on exit; `export_snapshot` writes a one-way JSON copy.

pub mod entity;
pub mod file_io;
pub mod init;
pub mod table;
pub mod tracker;

pub use entity::{Entity, EntityKey, StoreAssignedId};
pub use file_io::{read_json, write_json_atomic};
pub use init::seed_sample_data;
pub use table::Table;
pub use tracker::{Generation, IdentityMap};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::AuditRecord;
use crate::error::CatalogResult;
use crate::models::User;

/// Generic persistence of one entity type
pub trait EntityStore<T: Entity> {
    /// Every record, registered for conflict detection
    fn get_all(&self) -> CatalogResult<Vec<T>>;

    /// Every record as detached copies
    fn get_all_no_tracking(&self) -> CatalogResult<Vec<T>>;

    /// Insert under the caller-supplied identity. Audit records ignore the
    /// caller's id and get the next store-assigned one.
    fn create(&self, entity: T) -> CatalogResult<T>;

    /// Replace the stored record with the same identity
    fn update(&self, entity: T) -> CatalogResult<()>;

    /// Remove the stored record with the same identity
    fn delete(&self, entity: &T) -> CatalogResult<()>;
}

/// Stores that assign identities themselves
pub trait KeyAssigningStore<T: StoreAssignedId>: EntityStore<T> {
    /// Insert under the next free identity and return the stored record
    fn create_with_generated_id(&self, entity: T) -> CatalogResult<T>;
}

/// All catalog tables
#[derive(Default)]
pub struct DataContext {
    users: Table<User>,
    audit_records: Table<AuditRecord>,
}

macro_rules! impl_entity_store {
    ($entity:ty, $table:ident, $insert:ident) => {
        impl EntityStore<$entity> for DataContext {
            fn get_all(&self) -> CatalogResult<Vec<$entity>> {
                self.$table.get_all()
            }

            fn get_all_no_tracking(&self) -> CatalogResult<Vec<$entity>> {
                self.$table.get_all_no_tracking()
            }

            fn create(&self, entity: $entity) -> CatalogResult<$entity> {
                self.$table.$insert(entity)
            }

            fn update(&self, entity: $entity) -> CatalogResult<()> {
                self.$table.update(entity)
            }

            fn delete(&self, entity: &$entity) -> CatalogResult<()> {
                self.$table.delete(entity)
            }
        }
    };
}

impl_entity_store!(User, users, insert);
// Audit ids are always assigned by the table
impl_entity_store!(AuditRecord, audit_records, insert_generated);

impl KeyAssigningStore<AuditRecord> for DataContext {
    fn create_with_generated_id(&self, entity: AuditRecord) -> CatalogResult<AuditRecord> {
        self.audit_records.insert_generated(entity)
    }
}

/// Serializable copy of the whole catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub users: Vec<User>,
    pub audit_records: Vec<AuditRecord>,
}

impl DataContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding the sample data set
    pub fn seeded() -> CatalogResult<Self> {
        let context = Self::new();
        seed_sample_data(&context)?;
        Ok(context)
    }

    /// Start a new unit of work: every tracked handle from earlier reads is
    /// discarded
    pub fn begin_tracking_generation(&self) -> CatalogResult<Generation> {
        let generation = self.users.begin_tracking_generation()?;
        self.audit_records.begin_tracking_generation()?;
        debug!(generation, "tracking generation started");
        Ok(generation)
    }

    /// Direct access to the user table
    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    /// Direct access to the audit record table
    pub fn audit_records(&self) -> &Table<AuditRecord> {
        &self.audit_records
    }

    /// Detached copy of every table
    pub fn snapshot(&self) -> CatalogResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            users: self.users.get_all_no_tracking()?,
            audit_records: self.audit_records.get_all_no_tracking()?,
        })
    }

    /// Write the snapshot to `path` as JSON
    pub fn export_snapshot(&self, path: impl AsRef<Path>) -> CatalogResult<CatalogSnapshot> {
        let path = path.as_ref();
        let snapshot = self.snapshot()?;
        write_json_atomic(path, &snapshot)?;
        info!(
            path = %path.display(),
            users = snapshot.users.len(),
            audit_records = snapshot.audit_records.len(),
            "catalog exported"
        );
        Ok(snapshot)
    }
}
