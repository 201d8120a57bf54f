use auth::JwtError;
use auth::PasswordError;
use auth::UnknownRoleError;
use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::identity::models::IdentityId;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for registration, login and identity administration.
///
/// Display strings of the user-facing variants are stable and are sent to
/// clients verbatim.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid full name: {0}")]
    InvalidFullName(#[from] FullNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] UnknownRoleError),

    // Domain-level errors
    #[error("Username already taken")]
    DuplicateUsername(String),

    #[error("Email already registered")]
    DuplicateEmail(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    Unauthenticated,

    #[error("Administrator access required")]
    Forbidden,

    #[error("User not found")]
    NotFound(IdentityId),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AccessError> for IdentityError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden | AccessError::NotFound => IdentityError::Forbidden,
        }
    }
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        IdentityError::Unknown(err.to_string())
    }
}
