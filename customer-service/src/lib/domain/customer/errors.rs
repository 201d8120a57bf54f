use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::customer::models::CustomerId;
use crate::domain::identity::errors::EmailError;

/// Error for customer field validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerFieldError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl From<EmailError> for CustomerFieldError {
    fn from(err: EmailError) -> Self {
        CustomerFieldError::InvalidFormat {
            field: "email",
            reason: err.to_string(),
        }
    }
}

/// Top-level error for customer record operations.
#[derive(Debug, Clone, Error)]
pub enum CustomerError {
    #[error("Validation failed: {0}")]
    InvalidField(#[from] CustomerFieldError),

    #[error("Customer not found")]
    NotFound(CustomerId),

    #[error("You do not have access to this customer")]
    Forbidden(CustomerId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CustomerError {
    pub fn from_access(err: AccessError, id: CustomerId) -> Self {
        match err {
            AccessError::NotFound => CustomerError::NotFound(id),
            AccessError::Forbidden => CustomerError::Forbidden(id),
        }
    }
}

impl From<anyhow::Error> for CustomerError {
    fn from(err: anyhow::Error) -> Self {
        CustomerError::Unknown(err.to_string())
    }
}
