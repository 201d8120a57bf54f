use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::customer_data::CustomerData;
use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::Data;
use crate::domain::access::Principal;
use crate::domain::customer::models::CustomerId;
use crate::inbound::http::router::AppState;

pub async fn get_customer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Data<CustomerData>>, ApiError> {
    let id = CustomerId(parse_id(&id, "customer")?);

    state
        .customer_service
        .get_customer(&principal, id)
        .await
        .map_err(ApiError::from)
        .map(|customer| {
            ApiSuccess::new(
                StatusCode::OK,
                Data {
                    data: customer.into(),
                },
            )
        })
}
