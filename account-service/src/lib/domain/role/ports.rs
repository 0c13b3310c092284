use async_trait::async_trait;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleName;

/// Persistence operations for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Persist a new role.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Role name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, name: &RoleName, description: Option<&str>)
        -> Result<Role, RoleError>;

    /// Retrieve role by identifier.
    ///
    /// # Returns
    /// Optional role (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, RoleError>;

    /// Rename an existing role.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `NameAlreadyExists` - New name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn rename(&self, id: i64, name: &RoleName) -> Result<Role, RoleError>;

    /// Remove a role; account assignments cascade.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: i64) -> Result<(), RoleError>;
}
