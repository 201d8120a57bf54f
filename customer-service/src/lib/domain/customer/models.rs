use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::Owned;
use crate::domain::customer::errors::CustomerFieldError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;

/// Customer record.
///
/// `owner_id` is fixed at creation; no patch can carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub owner_id: IdentityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub contact_number: Option<String>,
    pub designation: Option<String>,
    pub company_name: String,
    pub business_address: String,
    pub nature_of_business: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area: Option<String>,
    pub remarks: Option<String>,
    pub status: CustomerStatus,
    pub tapped: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Customer {
    fn owner_id(&self) -> IdentityId {
        self.owner_id
    }
}

/// Customer unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = CustomerFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            other => Err(CustomerFieldError::InvalidFormat {
                field: "status",
                reason: format!("expected 'active' or 'inactive', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn required_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, CustomerFieldError> {
    let value = value.trim();
    let length = value.chars().count();
    if length == 0 {
        Err(CustomerFieldError::Empty { field })
    } else if length > max {
        Err(CustomerFieldError::TooLong {
            field,
            max,
            actual: length,
        })
    } else {
        Ok(value.to_string())
    }
}

/// Trims free text and maps blank input to `None`.
pub fn optional_text(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Company name: required, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    const MAX_LENGTH: usize = 255;

    pub fn new(value: String) -> Result<Self, CustomerFieldError> {
        required_text("companyName", value, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Business address: required, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessAddress(String);

impl BusinessAddress {
    const MAX_LENGTH: usize = 500;

    pub fn new(value: String) -> Result<Self, CustomerFieldError> {
        required_text("businessAddress", value, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First or last name of the contact person, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    pub fn parse(field: &'static str, value: String) -> Result<Option<Self>, CustomerFieldError> {
        match optional_text(value) {
            None => Ok(None),
            Some(value) => {
                let length = value.chars().count();
                if length > Self::MAX_LENGTH {
                    Err(CustomerFieldError::TooLong {
                        field,
                        max: Self::MAX_LENGTH,
                        actual: length,
                    })
                } else {
                    Ok(Some(Self(value)))
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Dialling prefix: optional `+` followed by 1-4 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn parse(value: String) -> Result<Option<Self>, CustomerFieldError> {
        let Some(value) = optional_text(value) else {
            return Ok(None);
        };

        let digits = value.strip_prefix('+').unwrap_or(&value);
        if (1..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Some(Self(value)))
        } else {
            Err(CustomerFieldError::InvalidFormat {
                field: "countryCode",
                reason: "expected an optional '+' followed by 1 to 4 digits".to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number: digits, spaces, hyphens and parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNumber(String);

impl ContactNumber {
    pub fn parse(value: String) -> Result<Option<Self>, CustomerFieldError> {
        let Some(value) = optional_text(value) else {
            return Ok(None);
        };

        if value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
        {
            Ok(Some(Self(value)))
        } else {
            Err(CustomerFieldError::InvalidFormat {
                field: "contactNumber",
                reason: "only digits, spaces, '-', '(' and ')' are allowed".to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latitude(f64);

impl Latitude {
    pub fn new(value: f64) -> Result<Self, CustomerFieldError> {
        within("latitude", value, -90.0, 90.0).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Longitude(f64);

impl Longitude {
    pub fn new(value: f64) -> Result<Self, CustomerFieldError> {
        within("longitude", value, -180.0, 180.0).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, CustomerFieldError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CustomerFieldError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

/// Command to create a customer. Carries no owner: the access filter assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCustomerCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub country_code: Option<CountryCode>,
    pub contact_number: Option<ContactNumber>,
    pub designation: Option<String>,
    pub company_name: CompanyName,
    pub business_address: BusinessAddress,
    pub nature_of_business: Option<String>,
    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
    pub area: Option<String>,
    pub remarks: Option<String>,
    pub status: CustomerStatus,
    pub tapped: bool,
}

/// Customer row to be inserted, with its owner already decided.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub owner_id: IdentityId,
    pub fields: CreateCustomerCommand,
}

/// Partial update.
///
/// `None` leaves a field unchanged. For nullable fields `Some(None)` clears
/// the stored value. Identity, owner and creation time are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub first_name: Option<Option<PersonName>>,
    pub last_name: Option<Option<PersonName>>,
    pub email: Option<Option<EmailAddress>>,
    pub country_code: Option<Option<CountryCode>>,
    pub contact_number: Option<Option<ContactNumber>>,
    pub designation: Option<Option<String>>,
    pub company_name: Option<CompanyName>,
    pub business_address: Option<BusinessAddress>,
    pub nature_of_business: Option<Option<String>>,
    pub latitude: Option<Option<Latitude>>,
    pub longitude: Option<Option<Longitude>>,
    pub area: Option<Option<String>>,
    pub remarks: Option<Option<String>>,
    pub status: Option<CustomerStatus>,
    pub tapped: Option<bool>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self == &CustomerPatch::default()
    }

    /// Apply the patch to an in-memory record and bump `updated_at`.
    pub fn apply_to(&self, customer: &mut Customer, now: DateTime<Utc>) {
        fn text<T>(slot: &mut Option<String>, change: &Option<Option<T>>, f: fn(&T) -> &str) {
            if let Some(value) = change {
                *slot = value.as_ref().map(|v| f(v).to_string());
            }
        }

        text(&mut customer.first_name, &self.first_name, PersonName::as_str);
        text(&mut customer.last_name, &self.last_name, PersonName::as_str);
        text(&mut customer.email, &self.email, EmailAddress::as_str);
        text(&mut customer.country_code, &self.country_code, CountryCode::as_str);
        text(
            &mut customer.contact_number,
            &self.contact_number,
            ContactNumber::as_str,
        );
        text(&mut customer.designation, &self.designation, String::as_str);
        text(
            &mut customer.nature_of_business,
            &self.nature_of_business,
            String::as_str,
        );
        text(&mut customer.area, &self.area, String::as_str);
        text(&mut customer.remarks, &self.remarks, String::as_str);

        if let Some(company_name) = &self.company_name {
            customer.company_name = company_name.as_str().to_string();
        }
        if let Some(business_address) = &self.business_address {
            customer.business_address = business_address.as_str().to_string();
        }
        if let Some(latitude) = self.latitude {
            customer.latitude = latitude.map(|l| l.value());
        }
        if let Some(longitude) = self.longitude {
            customer.longitude = longitude.map(|l| l.value());
        }
        if let Some(status) = self.status {
            customer.status = status;
        }
        if let Some(tapped) = self.tapped {
            customer.tapped = tapped;
        }
        customer.updated_at = now;
    }
}

/// Optional narrowing of a multi-record read, applied on top of the scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilters {
    pub status: Option<CustomerStatus>,
    pub tapped: Option<bool>,
    pub area: Option<String>,
    /// Case-insensitive substring of company name, first/last name or email.
    pub search: Option<String>,
}

impl CustomerFilters {
    pub fn matches(&self, customer: &Customer) -> bool {
        if self.status.is_some_and(|status| status != customer.status) {
            return false;
        }
        if self.tapped.is_some_and(|tapped| tapped != customer.tapped) {
            return false;
        }
        if let Some(area) = &self.area {
            if customer.area.as_deref() != Some(area.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystacks = [
                Some(customer.company_name.as_str()),
                customer.first_name.as_deref(),
                customer.last_name.as_deref(),
                customer.email.as_deref(),
            ];
            return haystacks
                .into_iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(&needle));
        }
        true
    }
}
