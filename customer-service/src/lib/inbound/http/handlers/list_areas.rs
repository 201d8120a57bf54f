use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::Data;
use crate::domain::access::Principal;
use crate::inbound::http::router::AppState;

pub async fn list_areas(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Data<Vec<String>>>, ApiError> {
    let areas = state.customer_service.list_areas(&principal).await?;

    Ok(ApiSuccess::new(StatusCode::OK, Data { data: areas }))
}
