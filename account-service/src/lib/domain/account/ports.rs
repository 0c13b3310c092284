use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ImageAttachment;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Page;
use crate::domain::account::models::Profile;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::models::Username;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleSpecifier;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and assign its role atomically.
    ///
    /// # Arguments
    /// * `command` - Validated command with username, email, password, and role
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UnknownRole` - The role does not resolve to an existing role
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve the joined detail view (profile, role, images) for one account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account_details(&self, id: &AccountId) -> Result<AccountDetails, AccountError>;

    /// List detail views for active accounts, ordered by account id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_account_details(&self, page: Page) -> Result<Vec<AccountDetails>, AccountError>;

    /// Update an existing account with optional fields.
    ///
    /// A new password is re-hashed before it reaches the store.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Create the profile row for an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `ProfileAlreadyExists` - Account already has a profile
    /// * `DatabaseError` - Database operation failed
    async fn create_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Profile, AccountError>;

    /// Replace the profile row for an account.
    ///
    /// # Errors
    /// * `NotFound` - Account has no profile to update
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &AccountId,
        profile: Profile,
    ) -> Result<Profile, AccountError>;

    /// Attach an image record to an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn attach_image(
        &self,
        id: &AccountId,
        image_name: String,
        image_url: String,
    ) -> Result<ImageAttachment, AccountError>;

    /// Soft-delete an account (status flag; the row stays).
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist or is already soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Hard-delete an account and its profile/assignments.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn purge_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// This is the credential store: the single source of truth for accounts,
/// roles assignments, profiles, and image links.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account and its role assignment in one transaction.
    ///
    /// Either the account row, the resolved role, and the assignment row all
    /// land, or none of them do.
    ///
    /// # Arguments
    /// * `account` - Account fields awaiting an id
    /// * `role` - Role to assign, by name or numeric id
    ///
    /// # Returns
    /// Created account entity with its store-assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UnknownRole` - The role does not resolve to an existing role
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        account: NewAccount,
        role: RoleSpecifier,
    ) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an active account by exact username.
    ///
    /// Soft-deleted accounts are not returned; this is the authentication
    /// lookup path.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_active_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve the joined detail view for one account.
    ///
    /// # Returns
    /// Optional detail view (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_details_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<AccountDetails>, AccountError>;

    /// List detail views for active accounts, ordered by account id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_details(&self, page: Page) -> Result<Vec<AccountDetails>, AccountError>;

    /// Resolve the primary role for an account.
    ///
    /// Assignments are many-to-many; the assignment with the lowest role id
    /// wins, so repeated logins always embed the same claim.
    ///
    /// # Returns
    /// Optional role (None if the account has no assignment)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_primary_role(&self, id: &AccountId) -> Result<Option<Role>, AccountError>;

    /// Update an existing account in storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Insert the profile row for an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `ProfileAlreadyExists` - Account already has a profile
    /// * `DatabaseError` - Database operation failed
    async fn create_profile(
        &self,
        id: &AccountId,
        profile: &Profile,
    ) -> Result<(), AccountError>;

    /// Replace the profile row for an account.
    ///
    /// # Errors
    /// * `NotFound` - Account has no profile row
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &AccountId,
        profile: &Profile,
    ) -> Result<(), AccountError>;

    /// Insert an image record and its account link in one transaction.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn attach_image(
        &self,
        id: &AccountId,
        image_name: &str,
        image_url: &str,
    ) -> Result<ImageAttachment, AccountError>;

    /// Flag an active account as soft-deleted.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist or is already soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn soft_delete(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Remove an account row; profile, assignments, and image links cascade.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn hard_delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
