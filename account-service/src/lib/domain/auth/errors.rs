use thiserror::Error;

/// Errors for authentication and authorization decisions.
///
/// `InvalidCredentials` deliberately covers both "no such account" and
/// "wrong password": callers must not be able to tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
