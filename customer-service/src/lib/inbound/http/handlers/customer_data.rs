use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::customer::models::Customer;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub id: i64,
    pub owner_id: i64,
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
    pub status: &'static str,
    pub tapped: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerData {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.0,
            owner_id: customer.owner_id.0,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            country_code: customer.country_code,
            contact_number: customer.contact_number,
            designation: customer.designation,
            company_name: customer.company_name,
            business_address: customer.business_address,
            nature_of_business: customer.nature_of_business,
            latitude: customer.latitude,
            longitude: customer.longitude,
            area: customer.area,
            remarks: customer.remarks,
            status: customer.status.as_str(),
            tapped: customer.tapped,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}
