use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::identity_data::SessionData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::FullName;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .identity_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|registered| {
            ApiSuccess::with_message(
                StatusCode::CREATED,
                "User registered successfully",
                SessionData {
                    user: (&registered.identity).into(),
                    token: registered.token.access_token,
                },
            )
        })
}

/// HTTP request body for registration (raw JSON).
///
/// There is no role field: every self-registered identity starts as a
/// SalesExecutive, and a submitted `role` key is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    full_name: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, IdentityError> {
        Ok(RegisterCommand {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            full_name: match self.full_name {
                Some(full_name) => FullName::parse(full_name)?,
                None => None,
            },
        })
    }
}
