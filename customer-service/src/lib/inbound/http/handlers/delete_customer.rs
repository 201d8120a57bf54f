use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::NoPayload;
use crate::domain::access::Principal;
use crate::domain::customer::models::CustomerId;
use crate::inbound::http::router::AppState;

pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<NoPayload>, ApiError> {
    let id = CustomerId(parse_id(&id, "customer")?);

    state
        .customer_service
        .delete_customer(&principal, id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Customer deleted successfully",
                NoPayload {},
            )
        })
}
