use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::identity::models::Identity;

/// Identity as sent to clients. Has no password field to leak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            username: identity.username.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            full_name: identity
                .full_name
                .as_ref()
                .map(|name| name.as_str().to_string()),
            role: identity.role,
            active: identity.active,
            created_at: identity.created_at,
            last_login_at: identity.last_login_at,
        }
    }
}

/// Payload of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub token: String,
    pub user: IdentityData,
}
