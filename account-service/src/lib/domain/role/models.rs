use std::fmt;

use crate::domain::role::errors::RoleNameError;

/// Named capability class with a lifecycle independent from accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
    pub description: Option<String>,
}

/// Role name value type
///
/// Ensures the name is non-empty and at most 80 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 80;

    /// Create a new valid role name.
    ///
    /// # Arguments
    /// * `name` - Raw role name string
    ///
    /// # Returns
    /// Validated RoleName value object
    ///
    /// # Errors
    /// * `Empty` - Name is empty
    /// * `TooLong` - Name longer than 80 characters
    pub fn new(name: String) -> Result<Self, RoleNameError> {
        if name.is_empty() {
            return Err(RoleNameError::Empty);
        }
        if name.len() > Self::MAX_LENGTH {
            return Err(RoleNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: name.len(),
            });
        }
        Ok(Self(name))
    }

    /// Get role name as string slice.
    ///
    /// # Returns
    /// Role name string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role reference as supplied at registration: a numeric id or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSpecifier {
    Id(i64),
    Name(String),
}

impl RoleSpecifier {
    /// Interpret a raw string: all-digits means an id, anything else a name.
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(RoleSpecifier::Id)
            .unwrap_or_else(|_| RoleSpecifier::Name(raw.to_string()))
    }
}

impl fmt::Display for RoleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleSpecifier::Id(id) => id.fmt(f),
            RoleSpecifier::Name(name) => name.fmt(f),
        }
    }
}

/// Command to create a new role.
#[derive(Debug)]
pub struct CreateRoleCommand {
    pub name: RoleName,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_validation() {
        assert!(RoleName::new("admin".to_string()).is_ok());
        assert!(RoleName::new(String::new()).is_err());
        assert!(RoleName::new("x".repeat(81)).is_err());
    }

    #[test]
    fn test_role_specifier_parse() {
        assert_eq!(RoleSpecifier::parse("3"), RoleSpecifier::Id(3));
        assert_eq!(
            RoleSpecifier::parse("admin"),
            RoleSpecifier::Name("admin".to_string())
        );
    }
}
