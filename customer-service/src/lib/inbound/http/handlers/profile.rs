use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::identity_data::IdentityData;
use super::ApiError;
use super::ApiSuccess;
use super::Data;
use crate::domain::access::Principal;
use crate::inbound::http::router::AppState;

pub async fn profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Data<IdentityData>>, ApiError> {
    state
        .identity_service
        .get_profile(&principal)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| {
            ApiSuccess::new(
                StatusCode::OK,
                Data {
                    data: identity.into(),
                },
            )
        })
}
