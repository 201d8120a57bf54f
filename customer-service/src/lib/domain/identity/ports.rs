use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::Principal;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedIdentity;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::StoredCredentials;
use crate::domain::identity::models::Username;

/// Port for registration, login and token authentication.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity with the default role and issue a token.
    ///
    /// # Errors
    /// * `DuplicateUsername` - An active identity already has this username
    /// * `DuplicateEmail` - An active identity already has this email
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedIdentity, IdentityError>;

    /// Check credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedIdentity, IdentityError>;

    /// Verify a bearer token and build the request principal.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is malformed, forged or expired
    async fn authenticate_request(&self, token: &str) -> Result<Principal, IdentityError>;

    /// Current state of the principal's own identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity was deactivated after the token was issued
    async fn get_profile(&self, principal: &Principal) -> Result<Identity, IdentityError>;

    /// All active identities. Administrator only.
    async fn list_identities(&self, principal: &Principal) -> Result<Vec<Identity>, IdentityError>;

    /// Change an identity's role. Administrator only.
    ///
    /// # Errors
    /// * `Forbidden` - Principal is not an Administrator
    /// * `NotFound` - No active identity with this id
    async fn assign_role(
        &self,
        principal: &Principal,
        id: IdentityId,
        role: Role,
    ) -> Result<Identity, IdentityError>;

    /// Deactivate an identity. Administrator only; identities are never deleted.
    ///
    /// # Errors
    /// * `Forbidden` - Principal is not an Administrator
    /// * `NotFound` - No active identity with this id
    async fn deactivate_identity(
        &self,
        principal: &Principal,
        id: IdentityId,
    ) -> Result<(), IdentityError>;
}

/// Credential store: persistence for identities and their password hashes.
///
/// Every lookup only considers active identities.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `DuplicateUsername` / `DuplicateEmail` - Uniqueness constraint hit
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError>;

    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Identity>, IdentityError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError>;

    /// Identity and password hash for a login attempt. The username is
    /// compared verbatim against stored rows.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, IdentityError>;

    async fn list_active(&self) -> Result<Vec<Identity>, IdentityError>;

    /// Stamp a successful login.
    async fn record_login(&self, id: IdentityId, at: DateTime<Utc>) -> Result<(), IdentityError>;

    /// Replace the stored hash, used when upgrading legacy hashes.
    async fn update_password_hash(
        &self,
        id: IdentityId,
        password_hash: String,
    ) -> Result<(), IdentityError>;

    /// Returns `None` when no active identity has this id.
    async fn update_role(&self, id: IdentityId, role: Role)
        -> Result<Option<Identity>, IdentityError>;

    /// Returns `false` when no active identity has this id.
    async fn deactivate(&self, id: IdentityId) -> Result<bool, IdentityError>;
}
