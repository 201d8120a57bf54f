use std::fmt;

use auth::Claims;
use auth::Role;
use thiserror::Error;

use crate::domain::identity::models::IdentityId;

/// Verified identity attached to a request.
///
/// Built only from claims that passed token verification and threaded
/// explicitly from the HTTP middleware into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: IdentityId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: IdentityId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: IdentityId(claims.sub),
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Operation being attempted on customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    ReadOne,
    ReadMany,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::ReadOne => "read_one",
            Operation::ReadMany => "read_many",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Ownership predicate for multi-record reads. Computed per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Unrestricted,
    OwnedBy(IdentityId),
}

impl AccessScope {
    pub fn permits(&self, owner_id: IdentityId) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::OwnedBy(id) => *id == owner_id,
        }
    }
}

/// Outcome of a permitted access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Create: the record must be stored with this owner.
    AssignOwner(IdentityId),
    /// ReadMany: the repository must apply this scope.
    Scoped(AccessScope),
    /// ReadOne / Update / Delete on the given target is allowed.
    Granted,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Record not found")]
    NotFound,

    #[error("Access to this record is not permitted")]
    Forbidden,
}

/// Anything with a fixed owning identity.
pub trait Owned {
    fn owner_id(&self) -> IdentityId;
}
