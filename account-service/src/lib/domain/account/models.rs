use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::AccountStatusError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::UsernameError;
use crate::domain::role::models::RoleSpecifier;

/// Account aggregate entity.
///
/// Represents a registered account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// New account awaiting persistence.
///
/// The numeric identifier is assigned by the store, so creation takes this
/// id-less shape and returns the full `Account`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account ID from string.
    ///
    /// # Arguments
    /// * `s` - Decimal id string to parse
    ///
    /// # Returns
    /// Parsed AccountId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid numeric id
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        s.parse::<i64>()
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account lifecycle status.
///
/// Deletion flips the flag instead of removing the row; a separate purge
/// path removes the row for real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    SoftDeleted,
}

impl AccountStatus {
    /// Storage representation (SMALLINT column).
    pub fn as_i16(self) -> i16 {
        match self {
            AccountStatus::Active => 1,
            AccountStatus::SoftDeleted => 2,
        }
    }

    /// Parse the storage representation.
    ///
    /// # Errors
    /// * `UnknownStatus` - Value is not a known status code
    pub fn from_i16(value: i16) -> Result<Self, AccountStatusError> {
        match value {
            1 => Ok(AccountStatus::Active),
            2 => Ok(AccountStatus::SoftDeleted),
            other => Err(AccountStatusError::UnknownStatus(other)),
        }
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// Validates length and character constraints. Matching is exact and
    /// case-sensitive; no normalization is applied.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    ///
    /// # Returns
    /// Username string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile attached 1:1 to an account. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_no: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub country: Option<String>,
}

/// Image record attached to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub id: i64,
    pub image_name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Name/url pair as it appears in aggregated detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub image_name: String,
    pub image_url: String,
}

/// Joined read model: account with its profile, role, and images.
#[derive(Debug, Clone)]
pub struct AccountDetails {
    pub id: AccountId,
    pub username: Username,
    pub email: EmailAddress,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub profile: Option<Profile>,
    pub role: Option<String>,
    pub images: Vec<ImageRef>,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub role: RoleSpecifier,
}

impl RegisterAccountCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `role` - Role to assign, by name or numeric id
    ///
    /// # Returns
    /// RegisterAccountCommand with validated fields
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        role: RoleSpecifier,
    ) -> Self {
        Self {
            username,
            email,
            password,
            role,
        }
    }
}

/// Command to update an existing account with optional validated fields.
///
/// All fields are optional to support partial updates; the updatable columns
/// are enumerated here by name, so nothing request-shaped ever reaches the
/// store.
#[derive(Debug)]
pub struct UpdateAccountCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
    pub status: Option<AccountStatus>,
}

/// Pagination window for detail listings.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub per_page: i64,
    pub offset: i64,
}

impl Page {
    const MAX_PER_PAGE: i64 = 100;

    /// Build a pagination window from 1-based page number and page size.
    ///
    /// Page numbers below 1 clamp to the first page; page sizes clamp to
    /// 1..=100.
    pub fn new(page: i64, per_page: i64) -> Self {
        let per_page = per_page.clamp(1, Self::MAX_PER_PAGE);
        let page = page.max(1);
        Self {
            per_page,
            offset: (page - 1) * per_page,
        }
    }
}
