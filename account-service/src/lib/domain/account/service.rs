use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::ImageAttachment;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Page;
use crate::domain::account::models::Profile;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    ///
    /// # Returns
    /// Configured account service instance
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        // Hash password using auth library
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        let account = NewAccount {
            username: command.username,
            email: command.email,
            password_hash,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account, command.role).await?;

        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn get_account_details(&self, id: &AccountId) -> Result<AccountDetails, AccountError> {
        self.repository
            .find_details_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_account_details(&self, page: Page) -> Result<Vec<AccountDetails>, AccountError> {
        self.repository.list_details(page).await
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            account.username = new_username;
        }

        if let Some(new_email) = command.email {
            account.email = new_email;
        }

        if let Some(new_password) = command.password {
            account.password_hash = self
                .password_hasher
                .hash(&new_password)
                .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        if let Some(new_status) = command.status {
            account.status = new_status;
        }

        self.repository.update(account).await
    }

    async fn create_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Profile, AccountError> {
        self.repository.create_profile(id, &profile).await?;
        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Profile, AccountError> {
        self.repository.update_profile(id, &profile).await?;
        Ok(profile)
    }

    async fn attach_image(
        &self,
        id: &AccountId,
        image_name: String,
        image_url: String,
    ) -> Result<ImageAttachment, AccountError> {
        self.repository
            .attach_image(id, &image_name, &image_url)
            .await
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.soft_delete(id).await?;

        tracing::info!(account_id = %id, "Account soft-deleted");

        Ok(())
    }

    async fn purge_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.hard_delete(id).await?;

        tracing::info!(account_id = %id, "Account purged");

        Ok(())
    }
}
