use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::customer_data::CustomerData;
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
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::CustomerStatus;
use crate::domain::customer::models::Latitude;
use crate::domain::customer::models::Longitude;
use crate::domain::customer::models::PersonName;
use crate::domain::identity::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn create_customer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(body): ApiJson<CreateCustomerRequest>,
) -> Result<ApiSuccess<Data<CustomerData>>, ApiError> {
    let command = body.try_into_command().map_err(CustomerError::from)?;

    state
        .customer_service
        .create_customer(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|customer| {
            ApiSuccess::with_message(
                StatusCode::CREATED,
                "Customer created successfully",
                Data {
                    data: customer.into(),
                },
            )
        })
}

/// HTTP request body for creating a customer (raw JSON).
///
/// Has no `id`, `ownerId` or timestamps; such keys are dropped during
/// deserialization and the owner comes from the authenticated principal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub contact_number: Option<String>,
    pub designation: Option<String>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub business_address: String,
    pub nature_of_business: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area: Option<String>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub tapped: Option<bool>,
}

impl CreateCustomerRequest {
    fn try_into_command(self) -> Result<CreateCustomerCommand, CustomerFieldError> {
        Ok(CreateCustomerCommand {
            first_name: parse_optional(self.first_name, |v| PersonName::parse("firstName", v))?,
            last_name: parse_optional(self.last_name, |v| PersonName::parse("lastName", v))?,
            email: parse_optional(self.email, parse_email)?,
            country_code: parse_optional(self.country_code, CountryCode::parse)?,
            contact_number: parse_optional(self.contact_number, ContactNumber::parse)?,
            designation: self.designation.and_then(optional_text),
            company_name: CompanyName::new(self.company_name)?,
            business_address: BusinessAddress::new(self.business_address)?,
            nature_of_business: self.nature_of_business.and_then(optional_text),
            latitude: self.latitude.map(Latitude::new).transpose()?,
            longitude: self.longitude.map(Longitude::new).transpose()?,
            area: self.area.and_then(optional_text),
            remarks: self.remarks.and_then(optional_text),
            status: self
                .status
                .map(|s| CustomerStatus::from_str(&s))
                .transpose()?
                .unwrap_or_default(),
            tapped: self.tapped.unwrap_or(false),
        })
    }
}

/// Run a blank-tolerant parser over an optional raw value.
pub(super) fn parse_optional<T>(
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<Option<T>, CustomerFieldError>,
) -> Result<Option<T>, CustomerFieldError> {
    match value {
        Some(value) => parse(value),
        None => Ok(None),
    }
}

pub(super) fn parse_email(value: String) -> Result<Option<EmailAddress>, CustomerFieldError> {
    match optional_text(value) {
        Some(value) => Ok(Some(EmailAddress::new(value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_owner_id_in_body_is_dropped() {
        let request: CreateCustomerRequest = serde_json::from_value(json!({
            "companyName": "Acme",
            "businessAddress": "1 Main St",
            "ownerId": 999,
            "id": 5
        }))
        .unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.company_name.as_str(), "Acme");
        assert_eq!(command.status, CustomerStatus::Active);
        assert!(!command.tapped);
    }

    #[test]
    fn test_missing_company_name_is_rejected() {
        let request: CreateCustomerRequest = serde_json::from_value(json!({
            "businessAddress": "1 Main St"
        }))
        .unwrap();

        assert_eq!(
            request.try_into_command().unwrap_err(),
            CustomerFieldError::Empty {
                field: "companyName"
            }
        );
    }

    #[test]
    fn test_blank_optional_fields_become_absent() {
        let request = CreateCustomerRequest {
            company_name: "Acme".to_string(),
            business_address: "1 Main St".to_string(),
            email: Some("   ".to_string()),
            area: Some("".to_string()),
            ..Default::default()
        };

        let command = request.try_into_command().unwrap();
        assert_eq!(command.email, None);
        assert_eq!(command.area, None);
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let request = CreateCustomerRequest {
            company_name: "Acme".to_string(),
            business_address: "1 Main St".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            request.try_into_command(),
            Err(CustomerFieldError::InvalidFormat { field: "email", .. })
        ));
    }
}
