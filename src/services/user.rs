//! User service
//!
//! Every user mutation goes through here so that each one produces exactly one
//! audit record describing it. Updates and deletes read the prior state
//! through an untracked read; a tracked read at that point would itself count
//! as a second edit session when the store update runs.

use tracing::debug;

use crate::audit::{generate_diff, AuditLog, Operation};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{User, UserId};
use crate::storage::EntityStore;

/// Service for user management
pub struct UserService<'a, S, L> {
    store: &'a S,
    audit: &'a L,
}

impl<'a, S, L> UserService<'a, S, L>
where
    S: EntityStore<User>,
    L: AuditLog,
{
    /// Create a new user service
    pub fn new(store: &'a S, audit: &'a L) -> Self {
        Self { store, audit }
    }

    /// All users (tracked)
    pub fn get_all(&self) -> CatalogResult<Vec<User>> {
        self.store.get_all()
    }

    /// The user with `id` (tracked), if any
    pub fn get_by_id(&self, id: UserId) -> CatalogResult<Option<User>> {
        Ok(self.store.get_all()?.into_iter().find(|u| u.id == id))
    }

    /// Users whose active flag matches `is_active` (tracked)
    pub fn filter_by_active(&self, is_active: bool) -> CatalogResult<Vec<User>> {
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .filter(|u| u.is_active == is_active)
            .collect())
    }

    /// Create a new user
    pub fn create(&self, user: User) -> CatalogResult<User> {
        let user = self.store.create(user)?;

        self.audit
            .log_change(user.id, Operation::Create.as_str(), "User Created.")?;

        Ok(user)
    }

    /// Replace an existing user, recording which fields changed
    pub fn update(&self, user: User) -> CatalogResult<User> {
        let before = self
            .snapshot(user.id)?
            .ok_or_else(|| CatalogError::user_not_found(user.id))?;

        self.store.update(user.clone())?;

        let changes = generate_diff(&before, &user);
        self.audit
            .log_change(user.id, Operation::Update.as_str(), &changes)?;

        Ok(user)
    }

    /// Delete an existing user
    pub fn delete(&self, user: &User) -> CatalogResult<()> {
        if self.snapshot(user.id)?.is_none() {
            debug!(id = %user.id, "no prior snapshot for user being deleted");
        }

        self.store.delete(user)?;

        self.audit
            .log_change(user.id, Operation::Delete.as_str(), "User Deleted.")?;

        Ok(())
    }

    /// Untracked copy of the stored user with `id`
    fn snapshot(&self, id: UserId) -> CatalogResult<Option<User>> {
        Ok(self
            .store
            .get_all_no_tracking()?
            .into_iter()
            .find(|u| u.id == id))
    }
}
