use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::identity_data::SessionData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::identity::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    // Username is not validated here: a malformed name must fail exactly
    // like an unknown one.
    let command = LoginCommand {
        username: body.username,
        password: body.password,
    };

    state
        .identity_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|authenticated| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Login successful",
                SessionData {
                    user: (&authenticated.identity).into(),
                    token: authenticated.token.access_token,
                },
            )
        })
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}
