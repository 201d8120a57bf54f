use std::str::FromStr;

use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::FullName;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::StoredCredentials;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;

const IDENTITY_COLUMNS: &str =
    "id, username, email, full_name, role, is_active, created_at, last_login_at";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rows are trusted: input rules apply at the boundary, not to data
    /// already stored.
    fn row_to_identity(row: &PgRow) -> Result<Identity, IdentityError> {
        let full_name: Option<String> = row.try_get("full_name").map_err(database_error)?;
        let role: String = row.try_get("role").map_err(database_error)?;
        let role = Role::from_str(&role).map_err(|e| {
            IdentityError::DatabaseError(format!("Unexpected stored role: {}", e))
        })?;

        Ok(Identity {
            id: IdentityId(row.try_get("id").map_err(database_error)?),
            username: Username::from_stored(row.try_get("username").map_err(database_error)?),
            email: EmailAddress::from_stored(row.try_get("email").map_err(database_error)?),
            full_name: full_name.map(FullName::from_stored),
            role,
            active: row.try_get("is_active").map_err(database_error)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
            last_login_at: row.try_get("last_login_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> IdentityError {
    IdentityError::DatabaseError(e.to_string())
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(identity.username.as_str())
            .bind(identity.email.as_str())
            .bind(&identity.password_hash)
            .bind(identity.full_name.as_ref().map(|name| name.as_str()))
            .bind(identity.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Lost a race with a concurrent registration past the pre-checks.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("users_username_active_key") {
                            return IdentityError::DuplicateUsername(
                                identity.username.as_str().to_string(),
                            );
                        }
                        if db_err.constraint() == Some("users_email_active_key") {
                            return IdentityError::DuplicateEmail(
                                identity.email.as_str().to_string(),
                            );
                        }
                    }
                }
                database_error(e)
            })?;

        Self::row_to_identity(&row)
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 AND is_active",
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, IdentityError> {
        let sql = format!(
            "SELECT {} FROM users WHERE username = $1 AND is_active",
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = $1 AND is_active",
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, IdentityError> {
        let sql = format!(
            "SELECT {}, password_hash FROM users WHERE username = $1 AND is_active",
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match row {
            Some(row) => Ok(Some(StoredCredentials {
                identity: Self::row_to_identity(&row)?,
                password_hash: row.try_get("password_hash").map_err(database_error)?,
            })),
            None => Ok(None),
        }
    }

    async fn list_active(&self) -> Result<Vec<Identity>, IdentityError> {
        let sql = format!(
            "SELECT {} FROM users WHERE is_active ORDER BY created_at DESC, id DESC",
            IDENTITY_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(Self::row_to_identity).collect()
    }

    async fn record_login(&self, id: IdentityId, at: DateTime<Utc>) -> Result<(), IdentityError> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id.0)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: IdentityId,
        password_hash: String,
    ) -> Result<(), IdentityError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn update_role(&self, id: IdentityId, role: Role) -> Result<Option<Identity>, IdentityError> {
        let sql = format!(
            "UPDATE users SET role = $2 WHERE id = $1 AND is_active RETURNING {}",
            IDENTITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id.0)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn deactivate(&self, id: IdentityId) -> Result<bool, IdentityError> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1 AND is_active")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
