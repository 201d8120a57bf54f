use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::create_customer::parse_email;
use super::customer_data::CustomerData;
use super::double_option;
use super::parse_id;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::Data;
use crate::domain::access::Principal;
use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::errors::CustomerFieldError;
use crate::domain::customer::models::optional_text;
use crate::domain::customer::models::BusinessAddress;
use crate::domain::customer::models::CompanyName;
use crate::domain::customer::models::ContactNumber;
use crate::domain::customer::models::CountryCode;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPatch;
use crate::domain::customer::models::CustomerStatus;
use crate::domain::customer::models::Latitude;
use crate::domain::customer::models::Longitude;
use crate::domain::customer::models::PersonName;
use crate::inbound::http::router::AppState;

/// Serves both `PUT` and `PATCH`: either way only the keys present in the
/// body are changed.
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateCustomerRequest>,
) -> Result<ApiSuccess<Data<CustomerData>>, ApiError> {
    let id = CustomerId(parse_id(&id, "customer")?);
    let patch = body.try_into_patch().map_err(CustomerError::from)?;

    state
        .customer_service
        .update_customer(&principal, id, patch)
        .await
        .map_err(ApiError::from)
        .map(|customer| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Customer updated successfully",
                Data {
                    data: customer.into(),
                },
            )
        })
}

/// HTTP request body for updating a customer (raw JSON).
///
/// Absent key: unchanged. `null` on a nullable field: cleared. `ownerId`,
/// `id` and `createdAt` are not fields here and are dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub country_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub designation: Option<Option<String>>,
    pub company_name: Option<String>,
    pub business_address: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub nature_of_business: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub longitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub area: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarks: Option<Option<String>>,
    pub status: Option<String>,
    pub tapped: Option<bool>,
}

/// Blank strings clear a nullable field the same way `null` does.
fn nullable<T>(
    change: Option<Option<String>>,
    parse: impl FnOnce(String) -> Result<Option<T>, CustomerFieldError>,
) -> Result<Option<Option<T>>, CustomerFieldError> {
    match change {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(value)) => parse(value).map(Some),
    }
}

fn nullable_text(change: Option<Option<String>>) -> Option<Option<String>> {
    change.map(|value| value.and_then(optional_text))
}

impl UpdateCustomerRequest {
    fn try_into_patch(self) -> Result<CustomerPatch, CustomerFieldError> {
        Ok(CustomerPatch {
            first_name: nullable(self.first_name, |v| PersonName::parse("firstName", v))?,
            last_name: nullable(self.last_name, |v| PersonName::parse("lastName", v))?,
            email: nullable(self.email, parse_email)?,
            country_code: nullable(self.country_code, CountryCode::parse)?,
            contact_number: nullable(self.contact_number, ContactNumber::parse)?,
            designation: nullable_text(self.designation),
            company_name: self.company_name.map(CompanyName::new).transpose()?,
            business_address: self.business_address.map(BusinessAddress::new).transpose()?,
            nature_of_business: nullable_text(self.nature_of_business),
            latitude: self
                .latitude
                .map(|value| value.map(Latitude::new).transpose())
                .transpose()?,
            longitude: self
                .longitude
                .map(|value| value.map(Longitude::new).transpose())
                .transpose()?,
            area: nullable_text(self.area),
            remarks: nullable_text(self.remarks),
            status: self
                .status
                .map(|s| CustomerStatus::from_str(&s))
                .transpose()?,
            tapped: self.tapped,
        })
    }
}
