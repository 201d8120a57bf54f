use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::customer_data::CustomerData;
use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::Listing;
use crate::domain::access::Principal;
use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::optional_text;
use crate::domain::customer::models::CustomerFilters;
use crate::domain::customer::models::CustomerStatus;
use crate::inbound::http::router::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(query): ApiQuery<ListCustomersQuery>,
) -> Result<ApiSuccess<Listing<CustomerData>>, ApiError> {
    let filters = query.try_into_filters()?;

    let customers = state
        .customer_service
        .list_customers(&principal, filters)
        .await?;

    let customers: Vec<CustomerData> = customers.into_iter().map(CustomerData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, customers.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCustomersQuery {
    pub status: Option<String>,
    pub tapped: Option<bool>,
    pub area: Option<String>,
    pub search: Option<String>,
}

impl ListCustomersQuery {
    fn try_into_filters(self) -> Result<CustomerFilters, CustomerError> {
        let status = self
            .status
            .and_then(optional_text)
            .map(|s| CustomerStatus::from_str(&s))
            .transpose()?;

        Ok(CustomerFilters {
            status,
            tapped: self.tapped,
            area: self.area.and_then(optional_text),
            search: self.search.and_then(optional_text),
        })
    }
}
