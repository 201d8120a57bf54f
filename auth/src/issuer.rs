use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::roles::Role;

/// Default token lifetime: seven days.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 7 * 24;

/// Result of issuing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed access token
    pub access_token: String,
    pub claims: Claims,
}

/// Issues and verifies stateless, time-limited identity tokens.
///
/// Validity is a function of the signature and the `exp` claim alone; there
/// is no server-side session or revocation state.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create a token issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing secret shared by issuer and verifier
    /// * `lifetime` - How long an issued token stays valid
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for an identity, starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token could not be signed
    pub fn issue(
        &self,
        subject_id: i64,
        username: &str,
        role: Role,
    ) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject_id, username, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject_id: i64,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::new(subject_id, username, role, now, self.lifetime);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `BadSignature` - MAC does not match the signing secret
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// The signature is checked before expiry, so a forged token reports
    /// `BadSignature` even when its `exp` is in the past.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
