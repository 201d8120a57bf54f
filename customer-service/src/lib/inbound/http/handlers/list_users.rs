use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::identity_data::IdentityData;
use super::ApiError;
use super::ApiSuccess;
use super::Listing;
use crate::domain::access::Principal;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Listing<IdentityData>>, ApiError> {
    let identities = state.identity_service.list_identities(&principal).await?;

    let users: Vec<IdentityData> = identities.iter().map(IdentityData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, users.into()))
}
