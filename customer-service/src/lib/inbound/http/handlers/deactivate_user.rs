use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::NoPayload;
use crate::domain::access::Principal;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::router::AppState;

pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<NoPayload>, ApiError> {
    let id = IdentityId(parse_id(&id, "user")?);

    state
        .identity_service
        .deactivate_identity(&principal, id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::with_message(StatusCode::OK, "User deactivated successfully", NoPayload {})
        })
}
