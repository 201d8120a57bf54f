use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIssuer;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::access;
use crate::domain::access::Principal;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedIdentity;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::ports::IdentityServicePort;

/// Authenticator: registration, login and token verification.
///
/// Coordinates the credential store, the password hasher and the token
/// issuer. Hashing runs on the blocking pool so one slow hash never holds up
/// other requests.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
    dummy_hash: OnceCell<String>,
}

const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_issuer` - Issuer holding the signing secret
    pub fn new(repository: Arc<IR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: PasswordHasher::new(),
            dummy_hash: OnceCell::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(IdentityError::from)
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, IdentityError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| {
                IdentityError::Unknown(format!("Password verification task failed: {}", e))
            })
    }

    /// Burn one verification for a username with no stored credentials, so
    /// the response time does not reveal whether the account exists.
    async fn verify_dummy(&self, password: String) -> Result<(), IdentityError> {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
            .await?;
        self.verify_password(password, dummy_hash.clone()).await?;
        Ok(())
    }

    /// Re-hash a legacy hash after a successful login. Failure is logged and
    /// does not affect the login itself.
    async fn upgrade_legacy_hash(&self, id: IdentityId, password: String) {
        let result = match self.hash_password(password).await {
            Ok(password_hash) => {
                self.repository
                    .update_password_hash(id, password_hash)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::info!(identity_id = %id, "Upgraded legacy password hash"),
            Err(e) => {
                tracing::warn!(identity_id = %id, error = %e, "Failed to upgrade legacy password hash")
            }
        }
    }

    fn issue_token(&self, identity: Identity) -> Result<AuthenticatedIdentity, IdentityError> {
        let token = self
            .token_issuer
            .issue(identity.id.0, identity.username.as_str(), identity.role)
            .map_err(IdentityError::Token)?;

        Ok(AuthenticatedIdentity { identity, token })
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedIdentity, IdentityError> {
        // Username first so the first reported conflict is deterministic.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(IdentityError::DuplicateUsername(
                command.username.as_str().to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(IdentityError::DuplicateEmail(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let identity = self
            .repository
            .create(NewIdentity {
                username: command.username,
                email: command.email,
                full_name: command.full_name,
                role: Role::SalesExecutive,
                password_hash,
            })
            .await?;

        tracing::info!(
            identity_id = %identity.id,
            username = %identity.username,
            "Identity registered"
        );

        self.issue_token(identity)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedIdentity, IdentityError> {
        // Stored usernames are matched as-is; imported accounts may not meet
        // the registration rules.
        let username = command.username.trim();
        let Some(credentials) = self.repository.find_credentials(username).await? else {
            self.verify_dummy(command.password).await?;
            tracing::info!("Login rejected");
            return Err(IdentityError::InvalidCredentials);
        };

        let is_legacy = self.password_hasher.is_legacy(&credentials.password_hash);
        let is_valid = self
            .verify_password(command.password.clone(), credentials.password_hash)
            .await?;

        if !is_valid {
            tracing::info!("Login rejected");
            return Err(IdentityError::InvalidCredentials);
        }

        let mut identity = credentials.identity;

        if is_legacy {
            self.upgrade_legacy_hash(identity.id, command.password).await;
        }

        let now = Utc::now();
        self.repository.record_login(identity.id, now).await?;
        identity.last_login_at = Some(now);

        tracing::info!(
            identity_id = %identity.id,
            role = %identity.role,
            "Login succeeded"
        );

        self.issue_token(identity)
    }

    async fn authenticate_request(&self, token: &str) -> Result<Principal, IdentityError> {
        self.token_issuer
            .verify(token)
            .map(Principal::from)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Token rejected");
                IdentityError::Unauthenticated
            })
    }

    async fn get_profile(&self, principal: &Principal) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(principal.id)
            .await?
            .ok_or(IdentityError::NotFound(principal.id))
    }

    async fn list_identities(&self, principal: &Principal) -> Result<Vec<Identity>, IdentityError> {
        access::require_administrator(principal)?;
        self.repository.list_active().await
    }

    async fn assign_role(
        &self,
        principal: &Principal,
        id: IdentityId,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        access::require_administrator(principal)?;

        let identity = self
            .repository
            .update_role(id, role)
            .await?
            .ok_or(IdentityError::NotFound(id))?;

        tracing::info!(
            identity_id = %id,
            role = %role,
            assigned_by = %principal.id,
            "Role assigned"
        );

        Ok(identity)
    }

    async fn deactivate_identity(
        &self,
        principal: &Principal,
        id: IdentityId,
    ) -> Result<(), IdentityError> {
        access::require_administrator(principal)?;

        if !self.repository.deactivate(id).await? {
            return Err(IdentityError::NotFound(id));
        }

        tracing::info!(
            identity_id = %id,
            deactivated_by = %principal.id,
            "Identity deactivated"
        );

        Ok(())
    }
}
