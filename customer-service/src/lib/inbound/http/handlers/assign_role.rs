use std::str::FromStr;

use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::identity_data::IdentityData;
use super::parse_id;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::Data;
use crate::domain::access::Principal;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::router::AppState;

pub async fn assign_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AssignRoleRequest>,
) -> Result<ApiSuccess<Data<IdentityData>>, ApiError> {
    let id = IdentityId(parse_id(&id, "user")?);
    let role = Role::from_str(&body.role).map_err(IdentityError::from)?;

    state
        .identity_service
        .assign_role(&principal, id, role)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Role updated successfully",
                Data {
                    data: identity.into(),
                },
            )
        })
}

/// Accepts canonical role names and their historical spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    role: String,
}
