use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::ImageAttachment;
use crate::domain::account::models::ImageRef;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Page;
use crate::domain::account::models::Profile;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleName;
use crate::domain::role::models::RoleSpecifier;

const DETAILS_SELECT: &str = r#"
    SELECT a.id, a.username, a.email, a.status, a.created_at,
           p.id AS profile_id,
           p.first_name, p.last_name, p.contact_no, p.dob, p.bio, p.country,
           r.name AS role_name,
           COALESCE(array_remove(array_agg(i.image_name ORDER BY i.id), NULL), '{}') AS image_names,
           COALESCE(array_remove(array_agg(i.image_url ORDER BY i.id), NULL), '{}') AS image_urls
    FROM accounts a
    LEFT JOIN account_profiles p ON p.account_id = a.id
    LEFT JOIN account_images ai ON ai.account_id = a.id
    LEFT JOIN images i ON i.id = ai.image_id
    LEFT JOIN LATERAL (
        SELECT roles.name
        FROM account_roles
        JOIN roles ON roles.id = account_roles.role_id
        WHERE account_roles.account_id = a.id
        ORDER BY account_roles.role_id
        LIMIT 1
    ) r ON TRUE
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_unique_violation(
        e: sqlx::Error,
        username: &Username,
        email: &EmailAddress,
    ) -> AccountError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                if db_err.constraint() == Some("accounts_username_key") {
                    return AccountError::UsernameAlreadyExists(username.as_str().to_string());
                }
                if db_err.constraint() == Some("accounts_email_key") {
                    return AccountError::EmailAlreadyExists(email.as_str().to_string());
                }
            }
        }
        AccountError::DatabaseError(e.to_string())
    }
}

/// Raw `accounts` row; converted into the domain aggregate after fetch.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    status: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            status: AccountStatus::from_i16(row.status)?,
            created_at: row.created_at,
        })
    }
}

/// Raw joined detail row (account + profile + role + image aggregates).
#[derive(sqlx::FromRow)]
struct DetailsRow {
    id: i64,
    username: String,
    email: String,
    status: i16,
    created_at: DateTime<Utc>,
    profile_id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    contact_no: Option<String>,
    dob: Option<NaiveDate>,
    bio: Option<String>,
    country: Option<String>,
    role_name: Option<String>,
    image_names: Vec<String>,
    image_urls: Vec<String>,
}

impl TryFrom<DetailsRow> for AccountDetails {
    type Error = AccountError;

    fn try_from(row: DetailsRow) -> Result<Self, Self::Error> {
        let profile = row.profile_id.map(|_| Profile {
            first_name: row.first_name,
            last_name: row.last_name,
            contact_no: row.contact_no,
            dob: row.dob,
            bio: row.bio,
            country: row.country,
        });

        let images = row
            .image_names
            .into_iter()
            .zip(row.image_urls)
            .map(|(image_name, image_url)| ImageRef {
                image_name,
                image_url,
            })
            .collect();

        Ok(AccountDetails {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            status: AccountStatus::from_i16(row.status)?,
            created_at: row.created_at,
            profile,
            role: row.role_name,
            images,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl TryFrom<RoleRow> for Role {
    type Error = AccountError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Role {
            id: row.id,
            name: RoleName::new(row.name)
                .map_err(|e| AccountError::DatabaseError(format!("Corrupt role name: {}", e)))?,
            description: row.description,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    image_name: String,
    image_url: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(
        &self,
        account: NewAccount,
        role: RoleSpecifier,
    ) -> Result<Account, AccountError> {
        // One transaction around account insert, role resolution, and the
        // assignment row: dropping the transaction on any early return rolls
        // everything back, so no partial registration is ever observable.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let row: AccountRow = sqlx::query_as(
            r#"
            INSERT INTO accounts (username, email, password_hash, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, status, created_at
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.status.as_i16())
        .bind(account.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::map_unique_violation(e, &account.username, &account.email))?;

        let role_query = match &role {
            RoleSpecifier::Id(id) => {
                sqlx::query_scalar("SELECT id FROM roles WHERE id = $1").bind(*id)
            }
            RoleSpecifier::Name(name) => {
                sqlx::query_scalar("SELECT id FROM roles WHERE name = $1").bind(name.clone())
            }
        };

        let role_id: i64 = role_query
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AccountError::UnknownRole(role.to_string()))?;

        sqlx::query("INSERT INTO account_roles (account_id, role_id) VALUES ($1, $2)")
            .bind(row.id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, status, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_active_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, status, created_at
            FROM accounts
            WHERE username = $1 AND status = $2
            "#,
        )
        .bind(username.as_str())
        .bind(AccountStatus::Active.as_i16())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_details_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<AccountDetails>, AccountError> {
        let query = format!("{} WHERE a.id = $1 GROUP BY a.id, p.id, r.name", DETAILS_SELECT);

        let row: Option<DetailsRow> = sqlx::query_as(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(AccountDetails::try_from).transpose()
    }

    async fn list_details(&self, page: Page) -> Result<Vec<AccountDetails>, AccountError> {
        let query = format!(
            "{} WHERE a.status = $1 GROUP BY a.id, p.id, r.name ORDER BY a.id LIMIT $2 OFFSET $3",
            DETAILS_SELECT
        );

        let rows: Vec<DetailsRow> = sqlx::query_as(&query)
            .bind(AccountStatus::Active.as_i16())
            .bind(page.per_page)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(AccountDetails::try_from).collect()
    }

    async fn find_primary_role(&self, id: &AccountId) -> Result<Option<Role>, AccountError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT roles.id, roles.name, roles.description
            FROM account_roles
            JOIN roles ON roles.id = account_roles.role_id
            WHERE account_roles.account_id = $1
            ORDER BY account_roles.role_id
            LIMIT 1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Role::try_from).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = $2, email = $3, password_hash = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.status.as_i16())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &account.username, &account.email))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }

    async fn create_profile(
        &self,
        id: &AccountId,
        profile: &Profile,
    ) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO account_profiles (account_id, first_name, last_name, contact_no, dob, bio, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.0)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.contact_no)
        .bind(profile.dob)
        .bind(&profile.bio)
        .bind(&profile.country)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::ProfileAlreadyExists(id.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return AccountError::NotFound(id.to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        profile: &Profile,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE account_profiles
            SET first_name = $2, last_name = $3, contact_no = $4, dob = $5, bio = $6, country = $7
            WHERE account_id = $1
            "#,
        )
        .bind(id.0)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.contact_no)
        .bind(profile.dob)
        .bind(&profile.bio)
        .bind(&profile.country)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn attach_image(
        &self,
        id: &AccountId,
        image_name: &str,
        image_url: &str,
    ) -> Result<ImageAttachment, AccountError> {
        // Image row and its account link land together or not at all
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let row: ImageRow = sqlx::query_as(
            r#"
            INSERT INTO images (image_name, image_url)
            VALUES ($1, $2)
            RETURNING id, image_name, image_url, created_at
            "#,
        )
        .bind(image_name)
        .bind(image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        sqlx::query("INSERT INTO account_images (account_id, image_id) VALUES ($1, $2)")
            .bind(id.0)
            .bind(row.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AccountError::NotFound(id.to_string());
                    }
                }
                AccountError::DatabaseError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(ImageAttachment {
            id: row.id,
            image_name: row.image_name,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }

    async fn soft_delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query("UPDATE accounts SET status = $2 WHERE id = $1 AND status = $3")
            .bind(id.0)
            .bind(AccountStatus::SoftDeleted.as_i16())
            .bind(AccountStatus::Active.as_i16())
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn hard_delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
