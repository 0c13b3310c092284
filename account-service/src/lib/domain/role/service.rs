use std::sync::Arc;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleName;
use crate::domain::role::ports::RoleRepository;

/// Domain service for role administration.
pub struct RoleService<RR>
where
    RR: RoleRepository,
{
    repository: Arc<RR>,
}

impl<RR> RoleService<RR>
where
    RR: RoleRepository,
{
    /// Create a new role service with injected dependencies.
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    /// Create a new role.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Role name is already taken
    /// * `DatabaseError` - Database operation failed
    pub async fn create_role(&self, command: CreateRoleCommand) -> Result<Role, RoleError> {
        let role = self
            .repository
            .create(&command.name, command.description.as_deref())
            .await?;

        tracing::info!(role_id = role.id, role = %role.name, "Role created");

        Ok(role)
    }

    /// Retrieve a role by id.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `DatabaseError` - Database operation failed
    pub async fn get_role(&self, id: i64) -> Result<Role, RoleError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RoleError::NotFound(id.to_string()))
    }

    /// Rename a role.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `NameAlreadyExists` - New name is already taken
    /// * `DatabaseError` - Database operation failed
    pub async fn rename_role(&self, id: i64, name: RoleName) -> Result<Role, RoleError> {
        self.repository.rename(id, &name).await
    }

    /// Delete a role. Existing account assignments cascade away with it.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `DatabaseError` - Database operation failed
    pub async fn delete_role(&self, id: i64) -> Result<(), RoleError> {
        self.repository.delete(id).await?;

        tracing::info!(role_id = id, "Role deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestRoleRepository {}

        #[async_trait]
        impl RoleRepository for TestRoleRepository {
            #[mockall::concretize]
            async fn create(&self, name: &RoleName, description: Option<&str>) -> Result<Role, RoleError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<Role>, RoleError>;
            async fn rename(&self, id: i64, name: &RoleName) -> Result<Role, RoleError>;
            async fn delete(&self, id: i64) -> Result<(), RoleError>;
        }
    }

    #[tokio::test]
    async fn test_create_role_success() {
        let mut repository = MockTestRoleRepository::new();

        repository
            .expect_create()
            .withf(|name, description| {
                name.as_str() == "auditor" && description == &Some("Read-only access")
            })
            .times(1)
            .returning(|name, description| {
                Ok(Role {
                    id: 3,
                    name: name.clone(),
                    description: description.map(str::to_string),
                })
            });

        let service = RoleService::new(Arc::new(repository));

        let command = CreateRoleCommand {
            name: RoleName::new("auditor".to_string()).unwrap(),
            description: Some("Read-only access".to_string()),
        };

        let role = service.create_role(command).await.unwrap();
        assert_eq!(role.id, 3);
        assert_eq!(role.name.as_str(), "auditor");
    }

    #[tokio::test]
    async fn test_create_role_duplicate_name() {
        let mut repository = MockTestRoleRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|name, _| Err(RoleError::NameAlreadyExists(name.to_string())));

        let service = RoleService::new(Arc::new(repository));

        let command = CreateRoleCommand {
            name: RoleName::new("admin".to_string()).unwrap(),
            description: None,
        };

        let result = service.create_role(command).await;
        assert!(matches!(result.unwrap_err(), RoleError::NameAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_get_role_not_found() {
        let mut repository = MockTestRoleRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = RoleService::new(Arc::new(repository));

        let result = service.get_role(99).await;
        assert!(matches!(result.unwrap_err(), RoleError::NotFound(_)));
    }
}
